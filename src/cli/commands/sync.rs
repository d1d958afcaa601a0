//! `aismm sync` command - publish the definition to the web application

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::validate::{check_file, print_defects, ValidationFailed};
use crate::cli::GlobalOpts;
use crate::core::{sync_file, Config, Project};

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Validate the definition first; nothing is copied when it fails
    #[arg(long)]
    pub validate: bool,

    /// Source definition (default: aismm_definition/aismm.yaml in the project)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Destination file (default: webapp/public/aismm.yaml in the project)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

pub fn run(args: SyncArgs, global: &GlobalOpts) -> Result<()> {
    let project =
        Project::locate(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load(&project);

    // Paths given on the command line are relative to the working directory,
    // configured ones to the project root
    let source = args
        .source
        .unwrap_or_else(|| config.definition_path(&project));
    let dest = args
        .dest
        .unwrap_or_else(|| config.sync_destination_path(&project));

    if !global.quiet {
        println!("{} Syncing AISMM YAML to webapp...", style("→").blue());
    }

    if args.validate {
        let checked = check_file(&source)?;
        if !checked.report.is_valid() {
            print_defects(&checked.report.defects);
            return Err(ValidationFailed {
                count: checked.report.defects.len(),
            }
            .into());
        }
    }

    let outcome = sync_file(&source, &dest)?;

    if let (Some(dir), false) = (&outcome.created_dir, global.quiet) {
        println!("Created directory: {}", dir.display());
    }
    println!(
        "{} Successfully copied {} to {} ({} bytes)",
        style("✓").green(),
        source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string()),
        outcome.destination.display(),
        outcome.bytes
    );

    Ok(())
}
