//! Failure reports.
//!
//! A report is the `error:` block printed when an invocation fails. For stage
//! failures it lays out what ran and where, one labelled field per line:
//!
//! ```text
//! error: build stage failed: command exited with status 2
//!       stage: build
//!     command: cmake --build /src/build --config Debug
//!   directory: /src
//!      status: 2
//! ```

use std::fmt;

use miette::Diagnostic as _;

use crate::core::Stage;
use crate::ops::errors::StageError;

/// Shown when configure fails, since a half-written cache is the usual cause.
pub const RECONFIGURE: &str = "Run `drydock clean` and try again to regenerate the build tree";

/// A rendered-on-demand description of one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    title: String,
    fields: Vec<(&'static str, String)>,
    help: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            fields: Vec::new(),
            help: Vec::new(),
        }
    }

    fn field(mut self, label: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((label, value.to_string()));
        self
    }

    fn help(mut self, text: impl Into<String>) -> Self {
        self.help.push(text.into());
        self
    }

    pub fn from_stage_error(err: &StageError) -> Self {
        let mut report = Report::new(err.to_string());
        if let Some(stage) = err.stage() {
            report = report.field("stage", stage);
        }

        report = match err {
            StageError::CommandFailed {
                stage,
                command,
                result,
            } => {
                let status = match result.code() {
                    Some(code) => code.to_string(),
                    None => "terminated by a signal".to_string(),
                };
                let report = report
                    .field("command", command)
                    .field("directory", command.cwd().display())
                    .field("status", status);
                if *stage == Stage::Configure {
                    report.help(RECONFIGURE)
                } else {
                    report
                }
            }
            StageError::ArtifactNotFound { path, .. } => report.field("expected", path.display()),
            StageError::Spawn {
                command, source, ..
            } => report
                .field("command", command)
                .field("directory", command.cwd().display())
                .field("cause", source),
            StageError::Filesystem { source, .. } => report.field("cause", source),
            StageError::InvalidInvocation { .. } => report,
        };

        if let Some(help) = err.help() {
            report = report.help(help.to_string());
        }
        report
    }

    /// Report any error, using the stage layout when one is underneath.
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(stage_err) = err.downcast_ref::<StageError>() {
            return Report::from_stage_error(stage_err);
        }

        err.chain()
            .skip(1)
            .fold(Report::new(err.to_string()), |report, cause| {
                report.field("cause", cause)
            })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The value of the first field named `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn render(&self, color: bool) -> String {
        let (error, help) = if color {
            ("\x1b[1;31merror\x1b[0m", "\x1b[1;32mhelp\x1b[0m")
        } else {
            ("error", "help")
        };

        let mut out = format!("{}: {}\n", error, self.title);
        let width = self.fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0) + 2;
        for (label, value) in &self.fields {
            out.push_str(&format!("{:>width$}: {}\n", label, value, width = width));
        }
        for text in &self.help {
            out.push_str(&format!("{}: {}\n", help, text));
        }
        out
    }

    /// Print to stderr.
    pub fn emit(&self, color: bool) {
        eprint!("{}", self.render(color));
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
