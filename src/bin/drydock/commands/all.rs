//! `drydock all` command

use std::sync::Arc;

use anyhow::Result;

use super::Session;
use crate::cli::{AllArgs, GlobalArgs};
use drydock::ops::StageError;
use drydock::util::Shell;

pub fn execute(args: AllArgs, global: &GlobalArgs, shell: Arc<Shell>) -> Result<()> {
    if !args.with_run && !args.args.is_empty() {
        return Err(StageError::invalid_invocation(
            "arguments after `--` are only used with `--with-run`",
        )
        .into());
    }

    let session = Session::new(global, shell, args.profile.selected(), args.jobs)?;
    session.orchestrator().run_all(args.with_run, &args.args)?;
    Ok(())
}
