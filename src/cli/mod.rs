//! CLI module - argument parsing, command dispatch and exit statuses

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GlobalOpts, ReportFormat};

use crate::cli::commands::validate::ValidationFailed;
use crate::core::SyncError;
use crate::yaml::LoadError;

/// Exit status when the document has structural defects
pub const EXIT_DEFECTS: u8 = 1;
/// Exit status for fatal errors (tabs, syntax, unknown shape, I/O)
pub const EXIT_FATAL: u8 = 2;
/// Exit status when the input file does not exist
pub const EXIT_MISSING_INPUT: u8 = 3;

/// Map a command failure to the process exit status
pub fn exit_code_for(report: &miette::Report) -> u8 {
    if report.downcast_ref::<ValidationFailed>().is_some() {
        return EXIT_DEFECTS;
    }
    if let Some(LoadError::NotFound { .. }) = report.downcast_ref::<LoadError>() {
        return EXIT_MISSING_INPUT;
    }
    if let Some(SyncError::SourceNotFound(_)) = report.downcast_ref::<SyncError>() {
        return EXIT_MISSING_INPUT;
    }
    EXIT_FATAL
}

/// Install the stderr log subscriber
pub fn init_logging(global: &GlobalOpts) {
    let level = if global.verbose {
        tracing::Level::DEBUG
    } else if global.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    // A second install (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
