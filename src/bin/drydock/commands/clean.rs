//! `drydock clean` command

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::GlobalArgs;
use drydock::util::Shell;

pub fn execute(global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    let session = Session::new(global, shell, None, None)?;
    session.orchestrator().clean()?;
    Ok(())
}
