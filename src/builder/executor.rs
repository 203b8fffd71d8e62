//! Running stage commands.

use std::sync::Arc;

use anyhow::Result;

use crate::core::Command;
use crate::util::process::{ExecutionResult, ProcessBuilder};
use crate::util::shell::Shell;

/// Runs one external command to completion.
///
/// Implementations must not classify failures: a non-zero exit status is an
/// `Ok` result. `Err` is reserved for commands that could not be run at all.
pub trait CommandRunner {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult> {
        (**self).run(command)
    }
}

/// Runs commands as child processes, echoing their output through the shell.
pub struct ProcessRunner {
    shell: Arc<Shell>,
}

impl ProcessRunner {
    pub fn new(shell: Arc<Shell>) -> Self {
        ProcessRunner { shell }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult> {
        let mut process = ProcessBuilder::from_command(command);

        // Output is piped, so tools that colorize only on a TTY need a nudge.
        if self.shell.use_color() {
            process = process.env("CLICOLOR_FORCE", "1");
        }

        process.exec_streaming(&mut &*self.shell)
    }
}
