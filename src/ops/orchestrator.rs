//! Stage orchestration.
//!
//! Stage completion is never remembered between calls. Whether Configure or
//! Build is satisfied is decided on every request by probing the build root:
//!
//! - Configure is satisfied when the configuration marker exists.
//! - Build is satisfied when the primary artifact exists.
//! - Test and Run are never satisfied; they run every time they are asked for.
//!
//! Requesting a stage first runs each unsatisfied prerequisite, in order
//! (auto-chaining). The first failing command stops everything after it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::builder::artifact::{resolve, ResolvedArtifact};
use crate::builder::cmake::CMakeCommands;
use crate::builder::context::BuildContext;
use crate::builder::executor::CommandRunner;
use crate::core::{Command, Stage};
use crate::ops::errors::StageError;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::shell::{format_duration, Shell, Status};

/// Snapshot of what the build root currently proves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub build_root: PathBuf,
    pub configured: bool,
    pub built: bool,
    pub artifact: PathBuf,
}

/// Whether a stage may pull in its prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chaining {
    Auto,
    /// The caller has just run the prerequisites itself.
    Off,
}

/// Drives stages for one project through a [`CommandRunner`].
pub struct Orchestrator<'a, R: CommandRunner> {
    ctx: &'a BuildContext,
    runner: R,
    shell: Arc<Shell>,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    pub fn new(ctx: &'a BuildContext, runner: R, shell: Arc<Shell>) -> Self {
        Orchestrator { ctx, runner, shell }
    }

    /// Get the build context.
    pub fn context(&self) -> &BuildContext {
        self.ctx
    }

    /// Where the primary artifact is expected, and whether it is there.
    pub fn artifact(&self) -> ResolvedArtifact {
        resolve(self.ctx.build_root.path(), &self.ctx.artifact)
    }

    /// Whether filesystem evidence shows `stage` has completed.
    pub fn is_satisfied(&self, stage: Stage) -> bool {
        match stage {
            Stage::Configure => self.ctx.build_root.is_configured(),
            Stage::Build => self.artifact().exists,
            Stage::Test | Stage::Run | Stage::Clean => false,
        }
    }

    pub fn status(&self) -> StageStatus {
        let artifact = self.artifact();
        StageStatus {
            build_root: self.ctx.build_root.path().to_path_buf(),
            configured: self.is_satisfied(Stage::Configure),
            built: artifact.exists,
            artifact: artifact.path,
        }
    }

    /// Run `target`, auto-chaining any unsatisfied prerequisites first.
    pub fn run_stage(&mut self, target: Stage) -> Result<(), StageError> {
        self.run_stage_inner(target, &[], Chaining::Auto)
    }

    /// Run the artifact with `extra_args` appended verbatim.
    pub fn run(&mut self, extra_args: &[String]) -> Result<(), StageError> {
        self.run_stage_inner(Stage::Run, extra_args, Chaining::Auto)
    }

    /// Configure, Build and Test (and Run, if asked), each executed
    /// unconditionally, stopping at the first failure.
    pub fn run_all(&mut self, include_run: bool, run_args: &[String]) -> Result<(), StageError> {
        let mut sequence = vec![Stage::Configure, Stage::Build, Stage::Test];
        if include_run {
            sequence.push(Stage::Run);
        }

        for stage in sequence {
            let args: &[String] = if stage == Stage::Run { run_args } else { &[] };
            self.run_stage_inner(stage, args, Chaining::Off)?;
        }
        Ok(())
    }

    /// Remove the build root. Missing is fine; nothing is spawned.
    pub fn clean(&mut self) -> Result<(), StageError> {
        let root = self.ctx.build_root.path();
        let removed = remove_dir_all_if_exists(root).map_err(|e| StageError::Filesystem {
            stage: Stage::Clean,
            source: e.into(),
        })?;

        if removed {
            self.shell.status(Status::Removed, root.display());
        } else {
            self.shell
                .status(Status::Skipped, format!("{} does not exist", root.display()));
        }
        Ok(())
    }

    fn run_stage_inner(
        &mut self,
        target: Stage,
        extra_args: &[String],
        chaining: Chaining,
    ) -> Result<(), StageError> {
        if target == Stage::Clean {
            return self.clean();
        }

        if chaining == Chaining::Auto {
            self.ensure_prerequisites(target)?;
        }

        let commands = CMakeCommands::new(self.ctx);
        let command = match target {
            Stage::Configure => commands.configure(),
            Stage::Build => commands.build(),
            Stage::Test => {
                self.require_artifact(Stage::Test)?;
                commands.test()
            }
            Stage::Run => {
                let artifact = self.require_artifact(Stage::Run)?;
                commands.run(&artifact, extra_args)
            }
            Stage::Clean => return self.clean(),
        };

        self.execute(target, command)
    }

    fn ensure_prerequisites(&mut self, target: Stage) -> Result<(), StageError> {
        for &prerequisite in target.prerequisites() {
            if self.is_satisfied(prerequisite) {
                self.shell.verbose_status(
                    Status::Fresh,
                    format!("{} (needed by {})", prerequisite, target),
                );
                continue;
            }

            tracing::info!("{} is required by {} and will run first", prerequisite, target);
            self.run_stage_inner(prerequisite, &[], Chaining::Auto)?;
        }
        Ok(())
    }

    fn require_artifact(&self, stage: Stage) -> Result<PathBuf, StageError> {
        let artifact = self.artifact();
        if !artifact.exists {
            return Err(StageError::ArtifactNotFound {
                stage,
                path: artifact.path,
            });
        }
        Ok(artifact.path)
    }

    fn execute(&mut self, stage: Stage, command: Command) -> Result<(), StageError> {
        self.shell.status(Status::for_stage(stage), &command);
        let start = Instant::now();

        let result = match self.runner.run(&command) {
            Ok(result) => result,
            Err(e) => {
                return Err(StageError::Spawn {
                    stage,
                    command,
                    source: e.into(),
                })
            }
        };

        if !result.success() {
            tracing::debug!("{} stage failed with {:?}", stage, result.code());
            return Err(StageError::CommandFailed {
                stage,
                command,
                result,
            });
        }

        self.shell.status(
            Status::Finished,
            format!("{} in {}", stage, format_duration(start.elapsed())),
        );
        Ok(())
    }
}
