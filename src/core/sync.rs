//! Publishing the definition to the web application
//!
//! A verbatim copy: no parsing, no re-serialization.

use miette::Diagnostic;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a successful sync did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub destination: PathBuf,
    pub bytes: u64,
    /// Set when the destination directory had to be created
    pub created_dir: Option<PathBuf>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum SyncError {
    #[error("Source file not found at {}", .0.display())]
    #[diagnostic(code(aismm::sync::source_missing))]
    SourceNotFound(PathBuf),

    #[error("Error creating directory {}", path.display())]
    #[diagnostic(code(aismm::sync::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error copying file to {}", path.display())]
    #[diagnostic(code(aismm::sync::copy))]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Copy `source` to `destination`, creating parent directories as needed
pub fn sync_file(source: &Path, destination: &Path) -> Result<SyncOutcome, SyncError> {
    if !source.is_file() {
        return Err(SyncError::SourceNotFound(source.to_path_buf()));
    }

    let mut created_dir = None;
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| SyncError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            tracing::debug!(dir = %parent.display(), "created destination directory");
            created_dir = Some(parent.to_path_buf());
        }
    }

    let bytes = std::fs::copy(source, destination).map_err(|source| SyncError::Copy {
        path: destination.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        from = %source.display(),
        to = %destination.display(),
        bytes,
        "copied definition"
    );

    Ok(SyncOutcome {
        destination: destination.to_path_buf(),
        bytes,
        created_dir,
    })
}
