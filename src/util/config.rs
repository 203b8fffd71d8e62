//! Configuration file support for Drydock.
//!
//! Drydock reads two configuration files:
//! - Global: `~/.drydock/config.toml` - User-wide defaults
//! - Project: `drydock.toml` next to the top-level `CMakeLists.txt`
//!
//! Project config takes precedence over global config, and command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Profile;
use crate::util::fs::read_to_string;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "drydock.toml";

/// Drydock configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Toolchain program overrides
    pub toolchain: ToolchainSettings,

    /// Test runner settings
    pub test: TestConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build output directory, relative to the project root
    pub build_root: Option<PathBuf>,

    /// Default profile (debug, release, relwithdebinfo, minsizerel)
    pub profile: Option<String>,

    /// Logical name of the primary executable produced by the build
    pub artifact: Option<String>,

    /// CMake generator passed to `-G`
    pub generator: Option<String>,

    /// Default number of parallel jobs (None = let the generator decide)
    pub jobs: Option<usize>,

    /// Extra arguments appended to the configure command
    #[serde(default)]
    pub configure_args: Vec<String>,

    /// Build only these CMake targets
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Paths to the external toolchain programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to `cmake`
    pub cmake: Option<PathBuf>,

    /// Path to `ctest`
    pub ctest: Option<PathBuf>,
}

/// Test-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Extra arguments appended to the test runner command
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.build_root.is_some() {
            self.build.build_root = other.build.build_root;
        }
        if other.build.profile.is_some() {
            self.build.profile = other.build.profile;
        }
        if other.build.artifact.is_some() {
            self.build.artifact = other.build.artifact;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if !other.build.configure_args.is_empty() {
            self.build.configure_args = other.build.configure_args;
        }
        if !other.build.targets.is_empty() {
            self.build.targets = other.build.targets;
        }

        if other.toolchain.cmake.is_some() {
            self.toolchain.cmake = other.toolchain.cmake;
        }
        if other.toolchain.ctest.is_some() {
            self.toolchain.ctest = other.toolchain.ctest;
        }

        if !other.test.args.is_empty() {
            self.test.args = other.test.args;
        }
    }

    /// Parse the configured default profile.
    pub fn profile(&self) -> Result<Option<Profile>> {
        self.build
            .profile
            .as_deref()
            .map(|s| s.parse::<Profile>().map_err(anyhow::Error::msg))
            .transpose()
            .context("invalid `build.profile` in configuration")
    }

    /// Resolve relative paths in this config against `base`.
    ///
    /// Applied to each file before merging so that a path always means what
    /// it meant in the file it came from.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        let root = |p: PathBuf| crate::util::fs::absolutize(base, &p);
        self.build.build_root = self.build.build_root.map(root);
        // Bare program names are looked up on PATH; only paths with a
        // directory component are rooted.
        let root_program = |p: PathBuf| {
            if p.components().count() > 1 {
                crate::util::fs::absolutize(base, &p)
            } else {
                p
            }
        };
        self.toolchain.cmake = self.toolchain.cmake.map(root_program);
        self.toolchain.ctest = self.toolchain.ctest.map(root_program);
        self
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (drydock.toml)
/// 2. Global config (~/.drydock/config.toml)
/// 3. Defaults
///
/// A project config that exists but cannot be parsed is an error; a broken
/// global config only produces a warning.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        let base = global_path.parent().unwrap_or(Path::new("."));
        config.merge(global.rooted_at(base));
    }

    if project_path.exists() {
        let project = Config::load(project_path)?;
        let base = project_path.parent().unwrap_or(Path::new("."));
        config.merge(project.rooted_at(base));
    }

    Ok(config)
}

/// Get the global drydock config directory (~/.drydock).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".drydock"))
}
