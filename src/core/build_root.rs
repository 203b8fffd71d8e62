//! The build output directory and the evidence it holds.
//!
//! The build root is the only persisted state. Nothing here caches anything:
//! every query goes to the filesystem, so each invocation of the tool sees the
//! same facts regardless of what earlier processes did.

use std::path::{Path, PathBuf};

/// File written by `cmake` once a build tree has been configured.
pub const CONFIGURE_MARKER: &str = "CMakeCache.txt";

/// The single mutable artifact directory owned by the external toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRoot {
    path: PathBuf,
}

impl BuildRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BuildRoot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Path of the configuration marker.
    pub fn configure_marker(&self) -> PathBuf {
        self.path.join(CONFIGURE_MARKER)
    }

    /// Whether the build tree has been configured.
    ///
    /// Only existence is checked; a marker with unreadable contents still
    /// counts as configured and the toolchain reports the problem itself.
    pub fn is_configured(&self) -> bool {
        self.configure_marker().is_file()
    }
}
