//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, sync::SyncArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "aismm")]
#[command(author, version, about = "AI Security Maturity Model toolkit")]
#[command(long_about = "AI Security Maturity Model toolkit.\n\nValidate the hand-authored AISMM definition (legacy v1.x or structured v2.x layout) and publish it to the web application.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .aismm/ or aismm_definition/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the definition file structure
    Validate(ValidateArgs),

    /// Copy the definition into the web application
    Sync(SyncArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON document (for programming)
    Json,
}
