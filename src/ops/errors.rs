//! Stage failure types and exit codes.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{Command, Stage};
use crate::util::process::ExecutionResult;

/// Exit code used when no better one is available.
pub const GENERIC_FAILURE: i32 = 1;

/// Exit code for invalid invocations (matches clap's usage errors).
pub const USAGE_FAILURE: i32 = 2;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a requested stage did not complete.
///
/// A missing prerequisite is not an error: it is handled by running the
/// prerequisite first.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum StageError {
    /// An external command exited unsuccessfully.
    #[error("{stage} stage failed: command {}", describe_status(.result))]
    #[diagnostic(code(drydock::stage::command_failed))]
    CommandFailed {
        stage: Stage,
        command: Command,
        result: ExecutionResult,
    },

    /// The build ran but the expected executable is not there.
    #[error("{stage} stage could not find the build artifact at {}", .path.display())]
    #[diagnostic(
        code(drydock::stage::artifact_not_found),
        help("Check that `build.artifact` in drydock.toml names the executable your CMake project produces")
    )]
    ArtifactNotFound { stage: Stage, path: PathBuf },

    /// Unrecognized request or malformed arguments; nothing was spawned.
    #[error("invalid invocation: {message}")]
    #[diagnostic(code(drydock::invalid_invocation))]
    InvalidInvocation { message: String },

    /// The external program could not be started.
    #[error("{stage} stage could not run `{}`", .command.program().display())]
    #[diagnostic(
        code(drydock::stage::spawn_failed),
        help("Install CMake and ensure it's in your PATH, or set `[toolchain] cmake`/`ctest` in drydock.toml")
    )]
    Spawn {
        stage: Stage,
        command: Command,
        #[source]
        source: BoxError,
    },

    /// A filesystem operation performed by the orchestrator itself failed.
    #[error("{stage} stage failed")]
    #[diagnostic(code(drydock::stage::filesystem))]
    Filesystem {
        stage: Stage,
        #[source]
        source: BoxError,
    },
}

fn describe_status(result: &ExecutionResult) -> String {
    match result.code() {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl StageError {
    pub fn invalid_invocation(message: impl Into<String>) -> Self {
        StageError::InvalidInvocation {
            message: message.into(),
        }
    }

    /// The stage this error is attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            StageError::CommandFailed { stage, .. }
            | StageError::ArtifactNotFound { stage, .. }
            | StageError::Spawn { stage, .. }
            | StageError::Filesystem { stage, .. } => Some(*stage),
            StageError::InvalidInvocation { .. } => None,
        }
    }

    /// Process exit code for this failure.
    ///
    /// A failing external command propagates its own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            StageError::CommandFailed { result, .. } => result
                .code()
                .filter(|code| *code != 0)
                .unwrap_or(GENERIC_FAILURE),
            StageError::InvalidInvocation { .. } => USAGE_FAILURE,
            _ => GENERIC_FAILURE,
        }
    }

    /// Captured output worth showing, if any.
    pub fn captured_output(&self) -> Option<&[String]> {
        match self {
            StageError::CommandFailed { result, .. } => Some(result.lines()),
            _ => None,
        }
    }
}
