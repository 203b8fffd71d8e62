//! Test utilities and mocks for Drydock unit tests.
//!
//! [`MockToolchain`] stands in for cmake/ctest and the built executable. It
//! records every command it is asked to run and reproduces the filesystem
//! evidence a real toolchain leaves behind, so the orchestrator's
//! satisfaction checks see the same facts they would after a real build.
//!
//! # Example
//!
//! ```rust,ignore
//! use drydock::test_support::{MockToolchain, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ProjectFixture::new();
//!     let mut toolchain = MockToolchain::new(&fixture.ctx);
//!     toolchain.build_status = 2;
//!     // Hand `&mut toolchain` to an Orchestrator...
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::artifact::resolve;
use crate::builder::context::BuildContext;
use crate::builder::executor::CommandRunner;
use crate::core::build_root::CONFIGURE_MARKER;
use crate::core::{Command, Stage};
use crate::util::process::ExecutionResult;

pub use fixtures::*;

/// Simulated cmake/ctest toolchain.
#[derive(Debug, Clone)]
pub struct MockToolchain {
    cmake: PathBuf,
    ctest: PathBuf,
    build_root: PathBuf,
    artifact: PathBuf,
    /// Exit status returned by `cmake -S ... -B ...`
    pub configure_status: i32,
    /// Exit status returned by `cmake --build`
    pub build_status: i32,
    /// Exit status returned by `ctest`
    pub test_status: i32,
    /// Exit status returned by the artifact itself
    pub run_status: i32,
    /// Whether a successful build writes the artifact
    pub produce_artifact: bool,
    /// Programs that fail to spawn
    pub missing_programs: Vec<PathBuf>,
    issued: Vec<Command>,
}

impl MockToolchain {
    /// A toolchain where every command succeeds.
    pub fn new(ctx: &BuildContext) -> Self {
        MockToolchain {
            cmake: ctx.cmake.clone(),
            ctest: ctx.ctest.clone(),
            build_root: ctx.build_root.path().to_path_buf(),
            artifact: resolve(ctx.build_root.path(), &ctx.artifact).path,
            configure_status: 0,
            build_status: 0,
            test_status: 0,
            run_status: 0,
            produce_artifact: true,
            missing_programs: Vec::new(),
            issued: Vec::new(),
        }
    }

    /// Every command run so far, in order.
    pub fn issued(&self) -> &[Command] {
        &self.issued
    }

    /// The stage each issued command belongs to, in order.
    pub fn issued_stages(&self) -> Vec<Stage> {
        self.issued
            .iter()
            .filter_map(|cmd| self.classify(cmd))
            .collect()
    }

    /// How many commands of `stage` were run.
    pub fn count(&self, stage: Stage) -> usize {
        self.issued_stages().iter().filter(|s| **s == stage).count()
    }

    /// Which stage a command belongs to, judged the way a reader of the
    /// command line would.
    pub fn classify(&self, command: &Command) -> Option<Stage> {
        let program = command.program();
        let first = command.get_args().first().and_then(|a| a.to_str());
        if program == self.cmake && first == Some("-S") {
            Some(Stage::Configure)
        } else if program == self.cmake && first == Some("--build") {
            Some(Stage::Build)
        } else if program == self.ctest {
            Some(Stage::Test)
        } else if program == self.artifact {
            Some(Stage::Run)
        } else {
            None
        }
    }

    fn touch(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, "")?;
        Ok(())
    }
}

impl CommandRunner for MockToolchain {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult> {
        if self.missing_programs.iter().any(|p| p == command.program()) {
            bail!("failed to spawn `{}`", command.program().display());
        }

        self.issued.push(command.clone());

        let status = match self.classify(command) {
            Some(Stage::Configure) => {
                if self.configure_status == 0 {
                    Self::touch(&self.build_root.join(CONFIGURE_MARKER))?;
                }
                self.configure_status
            }
            Some(Stage::Build) => {
                if self.build_status == 0 && self.produce_artifact {
                    Self::touch(&self.artifact)?;
                }
                self.build_status
            }
            Some(Stage::Test) => self.test_status,
            Some(Stage::Run) => self.run_status,
            Some(Stage::Clean) | None => bail!("unexpected command `{}`", command),
        };

        let output = vec![format!("mock: {}", command)];
        Ok(ExecutionResult::new(Some(status), output))
    }
}
