//! Drydock - a staged front end for CMake projects
//!
//! This crate drives the configure, build, test and run stages of a CMake
//! project, deciding which stages still need to run by looking at the build
//! directory.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Drydock unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a simulated toolchain and throwaway projects.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildRoot, Command, Profile, Stage};

pub use builder::{BuildContext, BuildOverrides, CommandRunner, ProcessRunner};
pub use ops::{Orchestrator, StageError, StageStatus};
pub use util::context::GlobalContext;
