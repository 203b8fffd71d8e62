//! CMake command construction and execution.
//!
//! This module turns a [`BuildContext`] into concrete stage commands and
//! runs them.

pub mod artifact;
pub mod cmake;
pub mod context;
pub mod executor;

pub use artifact::ResolvedArtifact;
pub use cmake::CMakeCommands;
pub use context::{BuildContext, BuildOverrides};
pub use executor::{CommandRunner, ProcessRunner};
