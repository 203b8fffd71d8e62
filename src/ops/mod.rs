//! High-level operations.
//!
//! This module contains the stage orchestrator behind every Drydock command
//! and the reports printed when one fails.

pub mod errors;
pub mod orchestrator;
pub mod report;

pub use errors::StageError;
pub use orchestrator::{Orchestrator, StageStatus};
pub use report::Report;
