//! AISMM Toolkit
//!
//! Validates the hand-authored AI Security Maturity Model definition and
//! publishes it to the web application.

pub mod cli;
pub mod core;
pub mod schema;
pub mod yaml;
