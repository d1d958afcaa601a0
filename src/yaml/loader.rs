//! Definition document loading
//!
//! Reads the whole file, refuses tab-indented text before the parser ever
//! sees it, then lowers the parsed YAML into a [`Node`] tree.

use miette::Diagnostic;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::yaml::diagnostics::{TabCharacterError, YamlSyntaxError};
use crate::yaml::node::Node;

/// Errors that stop a run before any structural validation
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("YAML file not found at {}", path.display())]
    #[diagnostic(
        code(aismm::load::not_found),
        help("Pass the file explicitly, or set `definition` in .aismm/config.yaml")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(aismm::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tabs(#[from] TabCharacterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] YamlSyntaxError),
}

/// Read and parse the document at `path`
pub fn load_document(path: &Path) -> Result<Node, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "read definition");

    let filename = path.display().to_string();
    parse_document(&text, &filename)
}

/// Parse in-memory text. `filename` is only used for diagnostics.
pub fn parse_document(text: &str, filename: &str) -> Result<Node, LoadError> {
    if let Some(err) = TabCharacterError::scan(text, filename) {
        tracing::debug!(lines = ?err.lines(), "rejecting tab-indented document");
        return Err(err.into());
    }

    let mut value: serde_yml::Value = serde_yml::from_str(text)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, text, filename))?;
    // Expand `<<: *anchor` merge keys into their host mappings
    value
        .apply_merge()
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, text, filename))?;

    Ok(Node::from(value))
}
