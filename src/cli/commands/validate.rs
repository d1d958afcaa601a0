//! `aismm validate` command - check the definition's structure

use console::style;
use miette::{Diagnostic, IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::{GlobalOpts, ReportFormat};
use crate::core::{Config, Project};
use crate::schema::{self, Defect, Shape, Summary, ValidationReport};
use crate::yaml::load_document;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Definition file (default: aismm_definition/aismm.yaml in the project)
    #[arg()]
    pub file: Option<PathBuf>,

    /// Report format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// The document parsed but has structural defects
#[derive(Debug, Error, Diagnostic)]
#[error("Validation failed with {count} issue(s)")]
#[diagnostic(code(aismm::validate::failed))]
pub struct ValidationFailed {
    pub count: usize,
}

/// A validated document and, when it passed, its summary
pub struct Checked {
    pub report: ValidationReport,
    pub summary: Option<Summary>,
}

/// Load, detect and validate `path`. Fatal errors are returned; structural
/// defects are in the report.
pub fn check_file(path: &Path) -> Result<Checked> {
    let doc = load_document(path)?;
    let report = schema::validate(&doc)?;
    let summary = if report.is_valid() {
        schema::summarize(&doc, report.shape)
    } else {
        None
    };
    Ok(Checked { report, summary })
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    shape: Shape,
    valid: bool,
    defects: &'a [Defect],
    summary: Option<&'a Summary>,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let path = match args.file {
        Some(file) => file,
        None => {
            let project = Project::locate(global.project.as_deref())
                .map_err(|e| miette::miette!("{}", e))?;
            Config::load(&project).definition_path(&project)
        }
    };

    if args.format == ReportFormat::Text && !global.quiet {
        println!(
            "{} Validating {}",
            style("→").blue(),
            path.display()
        );
    }

    let checked = check_file(&path)?;
    let report = &checked.report;

    match args.format {
        ReportFormat::Json => {
            let json = JsonReport {
                file: path.display().to_string(),
                shape: report.shape,
                valid: report.is_valid(),
                defects: &report.defects,
                summary: checked.summary.as_ref(),
            };
            let out = serde_json::to_string_pretty(&json).into_diagnostic()?;
            println!("{}", out);
        }
        ReportFormat::Text => {
            println!(
                "Detected AISMM structure version: {} ({})",
                report.shape.version_label(),
                report.shape
            );
            if report.is_valid() {
                println!();
                println!(
                    "{} YAML parsed and structure validated successfully.",
                    style("✓").green().bold()
                );
                if let (Some(summary), false) = (&checked.summary, global.quiet) {
                    println!();
                    print_summary(summary);
                }
            } else {
                print_defects(&report.defects);
            }
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(ValidationFailed {
            count: report.defects.len(),
        }
        .into())
    }
}

/// Print the failure header and one line per defect, in discovery order
pub(crate) fn print_defects(defects: &[Defect]) {
    println!();
    println!(
        "{} with {} issue(s):",
        style("Validation FAILED").red().bold(),
        defects.len()
    );
    for defect in defects {
        println!(" - {}", defect);
    }
}

fn print_summary(summary: &Summary) {
    let yes_no = |b: bool| if b { "Yes" } else { "No" };

    match summary {
        Summary::Legacy {
            pillars,
            domains,
            questions,
            key_controls,
            mitre_atlas,
            owasp_genai,
        } => {
            println!("Pillars: {}", style(pillars).cyan());
            println!("Domains: {}", style(domains).cyan());
            println!("Total questions (embedded): {}", style(questions).cyan());
            println!("Total key_controls: {}", style(key_controls).cyan());
            println!("MITRE ATLAS mappings: {}", yes_no(*mitre_atlas));
            println!("OWASP GenAI mappings: {}", yes_no(*owasp_genai));
        }
        Summary::Structured {
            components,
            domains,
            questions,
            frameworks,
        } => {
            println!("Components: {}", style(components).cyan());
            println!("Total domains: {}", style(domains).cyan());
            println!("Total assessment questions: {}", style(questions).cyan());
            if frameworks.is_empty() {
                println!("Framework mappings: none");
            } else {
                println!("Framework mappings: {}", frameworks.join(", "));
            }
        }
    }
}
