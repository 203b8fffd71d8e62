//! Subprocess execution utilities.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use crate::core::Command;
use crate::util::fs::ensure_dir;
use crate::util::shell::{OutputStream, Shell};

/// Receives child output one line at a time, as soon as it is read.
pub trait OutputSink {
    fn line(&mut self, stream: OutputStream, line: &str);
}

impl OutputSink for &Shell {
    fn line(&mut self, stream: OutputStream, line: &str) {
        self.output_line(stream, line);
    }
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct CapturedLines {
    pub lines: Vec<String>,
}

impl OutputSink for CapturedLines {
    fn line(&mut self, _stream: OutputStream, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn line(&mut self, _stream: OutputStream, _line: &str) {}
}

/// Outcome of a finished child process.
///
/// Stdout and stderr are interleaved in the order lines were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    status: Option<i32>,
    output: Vec<String>,
}

impl ExecutionResult {
    /// `status` is `None` when the child was terminated by a signal.
    pub fn new(status: Option<i32>, output: Vec<String>) -> Self {
        ExecutionResult { status, output }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.status
    }

    pub fn lines(&self) -> &[String] {
        &self.output
    }

    /// The captured output joined back into one string.
    pub fn output(&self) -> String {
        self.output.join("\n")
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
    create_cwd: bool,
    inherit_stdin: bool,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
            create_cwd: false,
            inherit_stdin: false,
        }
    }

    /// Create a process builder mirroring a stage command.
    pub fn from_command(command: &Command) -> Self {
        ProcessBuilder {
            program: command.program().to_path_buf(),
            args: command.get_args().to_vec(),
            env: HashMap::new(),
            cwd: Some(command.cwd().to_path_buf()),
            create_cwd: command.creates_cwd(),
            inherit_stdin: command.inherits_stdin(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Build the Command.
    fn build_command(&self) -> StdCommand {
        let mut cmd = StdCommand::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command, forwarding each output line to `sink` as it arrives.
    ///
    /// Stdin is empty unless the command asked to inherit it.
    ///
    /// Blocks until the child exits. A non-zero exit status is reported in the
    /// returned [`ExecutionResult`], not as an error; `Err` means the process
    /// could not be started or its output could not be read.
    pub fn exec_streaming(&self, sink: &mut dyn OutputSink) -> Result<ExecutionResult> {
        if self.create_cwd {
            if let Some(ref cwd) = self.cwd {
                ensure_dir(cwd)?;
            }
        }

        let mut cmd = self.build_command();
        // Only the artifact itself may read what the user pipes in.
        cmd.stdin(if self.inherit_stdin {
            Stdio::inherit()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("running `{}`", self.display_command());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader(stdout, OutputStream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader(stderr, OutputStream::Stderr, tx.clone()));
        }
        // Only the readers hold senders now; the loop ends once both pipes close.
        drop(tx);

        let mut output = Vec::new();
        let mut read_error = None;
        for message in rx {
            match message {
                Ok((stream, line)) => {
                    sink.line(stream, &line);
                    output.push(line);
                }
                Err(e) => {
                    read_error.get_or_insert(e);
                }
            }
        }

        for reader in readers {
            let _ = reader.join();
        }

        let status = child
            .wait()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        if let Some(e) = read_error {
            return Err(e).with_context(|| {
                format!("failed to read output of `{}`", self.program.display())
            });
        }

        Ok(ExecutionResult::new(status.code(), output))
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Drain `pipe` on its own thread, sending each line (without its terminator).
fn spawn_line_reader<R>(
    pipe: R,
    stream: OutputStream,
    tx: Sender<io::Result<(OutputStream, String)>>,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf)
                        .trim_end_matches(&['\r', '\n'][..])
                        .to_string();
                    if tx.send(Ok((stream, line))).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    })
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

/// Find CTest.
pub fn find_ctest() -> Option<PathBuf> {
    find_executable("ctest")
}
