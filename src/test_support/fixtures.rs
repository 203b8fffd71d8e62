//! Test fixtures for common test scenarios.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::builder::context::{BuildContext, BuildOverrides};
use crate::util::config::Config;

/// A throwaway project directory with a build context pointing at it.
///
/// The toolchain programs are fixed names so [`super::MockToolchain`] can
/// recognize them; nothing is ever spawned.
pub struct ProjectFixture {
    pub dir: TempDir,
    pub ctx: BuildContext,
}

impl ProjectFixture {
    /// A project named after its temp directory, artifact `app`.
    pub fn new() -> Self {
        Self::with_config(Config::default(), BuildOverrides::default())
    }

    /// A project with custom configuration and flags.
    pub fn with_config(mut config: Config, overrides: BuildOverrides) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(
            dir.path().join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.20)\nproject(app C)\nadd_executable(app main.c)\n",
        )
        .expect("failed to write CMakeLists.txt");

        config.toolchain.cmake.get_or_insert_with(|| PathBuf::from("cmake"));
        config.toolchain.ctest.get_or_insert_with(|| PathBuf::from("ctest"));
        config.build.artifact.get_or_insert_with(|| "app".to_string());

        let ctx = BuildContext::new(dir.path(), &config, &overrides)
            .expect("failed to create build context");

        ProjectFixture { dir, ctx }
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
