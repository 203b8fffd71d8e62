//! `drydock configure` command

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::{ConfigureArgs, GlobalArgs};
use drydock::core::Stage;
use drydock::util::Shell;

pub fn execute(args: ConfigureArgs, global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    let session = Session::new(global, shell, args.profile.selected(), None)?;
    session.orchestrator().run_stage(Stage::Configure)?;
    Ok(())
}
