//! `drydock status` command
//!
//! Reports what the build directory proves about the project. Never runs
//! anything.

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::{GlobalArgs, StatusArgs};
use drydock::util::Shell;

pub fn execute(args: StatusArgs, global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    let session = Session::new(global, shell, None, None)?;
    let status = session.orchestrator().status();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    println!("build root: {}", status.build_root.display());
    println!("configured: {}", yes_no(status.configured));
    println!("built:      {}", yes_no(status.built));
    println!("artifact:   {}", status.artifact.display());
    Ok(())
}
