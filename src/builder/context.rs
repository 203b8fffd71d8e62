//! Build context - project paths, toolchain programs and profile.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{BuildRoot, Profile};
use crate::ops::errors::StageError;
use crate::util::config::Config;
use crate::util::fs::absolutize;
use crate::util::process::{find_cmake, find_ctest};

/// Default build output directory, relative to the project root.
pub const DEFAULT_BUILD_ROOT: &str = "build";

/// Values given on the command line; each one beats the configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub build_root: Option<PathBuf>,
    pub profile: Option<Profile>,
    pub jobs: Option<usize>,
}

/// Everything needed to construct stage commands for one project.
///
/// Built once per invocation from configuration and flags, then passed by
/// reference. Nothing in here changes while stages run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Directory holding the top-level `CMakeLists.txt`
    pub source_dir: PathBuf,

    /// Build output directory
    pub build_root: BuildRoot,

    /// Logical name of the primary executable
    pub artifact: String,

    /// Build profile
    pub profile: Profile,

    /// `cmake` program
    pub cmake: PathBuf,

    /// `ctest` program
    pub ctest: PathBuf,

    /// CMake generator, if pinned
    pub generator: Option<String>,

    /// Parallel build jobs
    pub jobs: Option<usize>,

    /// Extra configure arguments
    pub configure_args: Vec<String>,

    /// CMake targets to build (empty = default target)
    pub targets: Vec<String>,

    /// Extra test runner arguments
    pub test_args: Vec<String>,
}

impl BuildContext {
    /// Create a build context for the project at `source_dir`.
    pub fn new(source_dir: &Path, config: &Config, overrides: &BuildOverrides) -> Result<Self> {
        let build_root = overrides
            .build_root
            .as_deref()
            .map(|p| absolutize(source_dir, p))
            .or_else(|| config.build.build_root.clone())
            .unwrap_or_else(|| source_dir.join(DEFAULT_BUILD_ROOT));

        let profile = match overrides.profile {
            Some(profile) => profile,
            None => config.profile()?.unwrap_or_default(),
        };

        let artifact = config
            .build
            .artifact
            .clone()
            .unwrap_or_else(|| default_artifact_name(source_dir));

        let cmake = config
            .toolchain
            .cmake
            .clone()
            .or_else(find_cmake)
            .unwrap_or_else(|| PathBuf::from("cmake"));
        let ctest = config
            .toolchain
            .ctest
            .clone()
            .or_else(find_ctest)
            .unwrap_or_else(|| PathBuf::from("ctest"));

        let jobs = overrides.jobs.or(config.build.jobs);
        if jobs == Some(0) {
            return Err(StageError::invalid_invocation("job count must be at least 1").into());
        }

        Ok(BuildContext {
            source_dir: source_dir.to_path_buf(),
            build_root: BuildRoot::new(build_root),
            artifact,
            profile,
            cmake,
            ctest,
            generator: config.build.generator.clone(),
            jobs,
            configure_args: config.build.configure_args.clone(),
            targets: config.build.targets.clone(),
            test_args: config.test.args.clone(),
        })
    }
}

/// The project directory's name, used when no artifact name is configured.
fn default_artifact_name(source_dir: &Path) -> String {
    source_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("app")
        .to_string()
}
