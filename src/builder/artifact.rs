//! Locating compiled executables in the build root.

use std::path::{Path, PathBuf};

/// Where an artifact should be, and whether it is there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolve `logical_name` under `root` using the host executable suffix.
pub fn resolve(root: &Path, logical_name: &str) -> ResolvedArtifact {
    resolve_with_suffix(root, logical_name, std::env::consts::EXE_SUFFIX)
}

/// Resolve `logical_name` under `root`, appending `suffix` unless the name
/// already ends with it. Never touches the filesystem beyond a stat.
pub fn resolve_with_suffix(root: &Path, logical_name: &str, suffix: &str) -> ResolvedArtifact {
    let file_name = if suffix.is_empty() || logical_name.ends_with(suffix) {
        logical_name.to_string()
    } else {
        format!("{}{}", logical_name, suffix)
    };

    let path = root.join(file_name);
    let exists = path.is_file();
    ResolvedArtifact { path, exists }
}
