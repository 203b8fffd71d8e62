//! Core data types

pub mod build_root;
pub mod command;
pub mod profile;
pub mod stage;

pub use build_root::BuildRoot;
pub use command::Command;
pub use profile::Profile;
pub use stage::Stage;
