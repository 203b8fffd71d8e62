//! Centralized shell output.
//!
//! The Shell module provides a unified API for all CLI output:
//! - Status messages with consistent formatting
//! - Live forwarding of child process output
//! - Quiet and verbose modes
//!
//! # Design Principles
//!
//! 1. **Commands never manage spacing/indentation directly** - Shell handles all formatting
//! 2. **Status lines go to stderr** - stdout carries only what child processes print there
//! 3. **Quiet mode buffers** - child output is not echoed, and is replayed on failure

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crate::core::Stage;

/// Shell output mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellMode {
    pub verbosity: Verbosity,
    pub color: ColorChoice,
}

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, child output is not echoed
    Quiet,
    /// Default: status messages + live child output
    #[default]
    Normal,
    /// --verbose: also notes about skipped prerequisites
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Which pipe a line of child output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Status types for output messages.
///
/// Shell handles all formatting - callers just specify the semantic status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Removed,
    Fresh,

    // In-progress statuses (cyan)
    Configuring,
    Building,
    Testing,
    Running,

    // Warning statuses (yellow)
    Skipped,
}

impl Status {
    /// The in-progress status announcing `stage`.
    pub fn for_stage(stage: Stage) -> Status {
        match stage {
            Stage::Configure => Status::Configuring,
            Stage::Build => Status::Building,
            Stage::Test => Status::Testing,
            Stage::Run => Status::Running,
            Stage::Clean => Status::Removed,
        }
    }

    /// Get the display text for this status.
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Fresh => "Fresh",
            Status::Configuring => "Configuring",
            Status::Building => "Building",
            Status::Testing => "Testing",
            Status::Running => "Running",
            Status::Skipped => "Skipped",
        }
    }

    /// Get the ANSI color code for this status.
    fn color_code(&self) -> &'static str {
        match self {
            // Success: bold green
            Status::Finished | Status::Removed | Status::Fresh => "\x1b[1;32m",
            // In-progress: bold cyan
            Status::Configuring | Status::Building | Status::Testing | Status::Running => {
                "\x1b[1;36m"
            }
            // Warning: bold yellow
            Status::Skipped => "\x1b[1;33m",
        }
    }

    /// Get the width for alignment (12 characters).
    fn width(&self) -> usize {
        12
    }
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match mode.color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell { mode, use_color }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Shell::new(ShellMode { verbosity, color })
    }

    /// A shell that prints no status lines and never uses color.
    pub fn quiet() -> Self {
        Shell::new(ShellMode {
            verbosity: Verbosity::Quiet,
            color: ColorChoice::Never,
        })
    }

    /// Check if shell is in quiet mode.
    pub fn is_quiet(&self) -> bool {
        self.mode.verbosity == Verbosity::Quiet
    }

    /// Check if shell is in verbose mode.
    pub fn is_verbose(&self) -> bool {
        self.mode.verbosity == Verbosity::Verbose
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// Nothing is printed in quiet mode.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() {
            return;
        }

        let prefix = self.format_status(status);
        eprintln!("{} {}", prefix, msg);
    }

    /// Print a status message only in verbose mode.
    pub fn verbose_status(&self, status: Status, msg: impl Display) {
        if self.is_verbose() {
            self.status(status, msg);
        }
    }

    /// Forward one line of child output to the matching stream.
    ///
    /// Suppressed in quiet mode.
    pub fn output_line(&self, stream: OutputStream, line: &str) {
        if self.is_quiet() {
            return;
        }
        match stream {
            OutputStream::Stdout => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
            OutputStream::Stderr => eprintln!("{}", line),
        }
    }

    /// Print previously captured child output to stderr, regardless of mode.
    pub fn replay(&self, lines: &[String]) {
        let mut err = io::stderr().lock();
        for line in lines {
            let _ = writeln!(err, "{}", line);
        }
    }

    /// Format a status prefix with optional color.
    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            let color = status.color_code();
            format!("{}{:>width$}\x1b[0m", color, text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
