//! Immutable descriptions of external commands.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// An external command: program, argument vector and working directory.
///
/// Arguments are kept as a vector of OS strings and passed to the child
/// process as-is; no shell is involved and paths are never re-encoded.
/// Builder methods consume `self`, so a `Command` cannot be altered once it
/// has been handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: PathBuf,
    create_cwd: bool,
    inherit_stdin: bool,
}

impl Command {
    /// Create a command for `program`, run from `cwd`.
    pub fn new(program: impl AsRef<Path>, cwd: impl AsRef<Path>) -> Self {
        Command {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            create_cwd: false,
            inherit_stdin: false,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Ask the executor to create the working directory before spawning.
    pub fn create_cwd(mut self) -> Self {
        self.create_cwd = true;
        self
    }

    /// Let the child read from this process's stdin instead of an empty one.
    pub fn inherit_stdin(mut self) -> Self {
        self.inherit_stdin = true;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn creates_cwd(&self) -> bool {
        self.create_cwd
    }

    pub fn inherits_stdin(&self) -> bool {
        self.inherit_stdin
    }
}

impl fmt::Display for Command {
    /// Human-readable rendering for diagnostics. Not meant to be re-parsed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
