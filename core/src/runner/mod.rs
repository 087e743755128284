//! runner/mod.rs
//! Corpus walking, workspace management and run configuration.

pub mod config;
pub mod controller;
pub mod corpus;
pub mod workspace;

pub use config::*;
pub use controller::*;
pub use corpus::Corpus;
pub use workspace::{remove_if_exists, Workspace};
