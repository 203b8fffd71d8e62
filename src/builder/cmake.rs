//! CMake/CTest command templates for each stage.

use std::path::Path;

use crate::builder::context::BuildContext;
use crate::core::Command;

/// Builds the external command for each stage of a CMake project.
pub struct CMakeCommands<'a> {
    ctx: &'a BuildContext,
}

impl<'a> CMakeCommands<'a> {
    pub fn new(ctx: &'a BuildContext) -> Self {
        CMakeCommands { ctx }
    }

    /// `cmake -S <src> -B <build> -DCMAKE_BUILD_TYPE=<profile> ...`
    ///
    /// Runs from inside the build root, which is created first if missing.
    pub fn configure(&self) -> Command {
        let mut cmd = Command::new(&self.ctx.cmake, self.ctx.build_root.path())
            .create_cwd()
            .arg("-S")
            .arg(&self.ctx.source_dir)
            .arg("-B")
            .arg(self.ctx.build_root.path())
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.ctx.profile));

        if let Some(ref generator) = self.ctx.generator {
            cmd = cmd.arg("-G").arg(generator);
        }

        cmd.args(&self.ctx.configure_args)
    }

    /// `cmake --build <build> --config <profile> [--parallel N] [--target ...]`
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.ctx.cmake, &self.ctx.source_dir)
            .arg("--build")
            .arg(self.ctx.build_root.path())
            // Multi-config generators (Visual Studio, Ninja Multi-Config)
            .arg("--config")
            .arg(self.ctx.profile.as_cmake_str());

        if let Some(jobs) = self.ctx.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }

        if !self.ctx.targets.is_empty() {
            cmd = cmd.arg("--target").args(&self.ctx.targets);
        }

        cmd
    }

    /// `ctest --test-dir <build> -C <profile> --output-on-failure ...`
    pub fn test(&self) -> Command {
        let mut cmd = Command::new(&self.ctx.ctest, self.ctx.build_root.path())
            .arg("--test-dir")
            .arg(self.ctx.build_root.path())
            .arg("-C")
            .arg(self.ctx.profile.as_cmake_str())
            .arg("--output-on-failure");

        if let Some(jobs) = self.ctx.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }

        cmd.args(&self.ctx.test_args)
    }

    /// The artifact itself, with pass-through arguments appended verbatim.
    /// It is the only command that reads the user's stdin.
    pub fn run(&self, artifact: &Path, extra_args: &[String]) -> Command {
        Command::new(artifact, &self.ctx.source_dir)
            .args(extra_args)
            .inherit_stdin()
    }
}
