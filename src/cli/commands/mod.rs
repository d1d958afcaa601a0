//! CLI command implementations

pub mod completions;
pub mod sync;
pub mod validate;
