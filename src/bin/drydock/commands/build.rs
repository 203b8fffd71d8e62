//! `drydock build` command

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::{BuildArgs, GlobalArgs};
use drydock::core::Stage;
use drydock::util::Shell;

pub fn execute(args: BuildArgs, global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    let session = Session::new(global, shell, args.profile.selected(), args.jobs)?;
    session.orchestrator().run_stage(Stage::Build)?;
    Ok(())
}
