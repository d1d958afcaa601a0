//! Core module - project layout, configuration and publishing

pub mod config;
pub mod project;
pub mod sync;

pub use config::Config;
pub use project::{Project, ProjectError};
pub use sync::{sync_file, SyncError, SyncOutcome};
