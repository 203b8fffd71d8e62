//! Global context for Drydock operations.
//!
//! Provides centralized access to configuration paths and the project root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_dir, load_config, Config, PROJECT_CONFIG_FILE};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Drydock data (~/.drydock/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = match std::env::var_os("DRYDOCK_HOME") {
            Some(home) => PathBuf::from(home),
            None => global_config_dir().unwrap_or_else(|| PathBuf::from(".drydock")),
        };

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Override the home directory (used by tests to isolate global config).
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the project root: the nearest directory at or above cwd holding a
    /// `drydock.toml`. Falls back to cwd itself.
    pub fn find_project_root(&self) -> PathBuf {
        let mut current = self.cwd.clone();
        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return current;
            }
            if !current.pop() {
                return self.cwd.clone();
            }
        }
    }

    /// Load the merged global and project configuration for `project_root`.
    pub fn load_config(&self, project_root: &Path) -> Result<Config> {
        load_config(&self.config_path(), &project_root.join(PROJECT_CONFIG_FILE))
    }
}
