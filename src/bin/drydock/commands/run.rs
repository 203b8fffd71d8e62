//! `drydock run` command

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::{GlobalArgs, RunArgs};
use drydock::util::Shell;

pub fn execute(args: RunArgs, global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    let session = Session::new(global, shell, args.profile.selected(), None)?;
    session.orchestrator().run(&args.args)?;
    Ok(())
}
