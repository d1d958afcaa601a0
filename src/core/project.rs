//! Project discovery and conventional paths

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-project configuration directory
pub const CONFIG_DIR: &str = ".aismm";
/// Directory holding the hand-authored definition
pub const DEFINITION_DIR: &str = "aismm_definition";

/// Represents an AISMM checkout
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing `.aismm/` or `aismm_definition/`
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(CONFIG_DIR).is_dir() || current.join(DEFINITION_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Use `path` as the root without looking for markers
    pub fn at(path: &Path) -> Self {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self { root }
    }

    /// Resolve the project for a command: an explicit root wins, otherwise
    /// discovery from the working directory, otherwise the working directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        if let Some(path) = explicit {
            if !path.is_dir() {
                return Err(ProjectError::NotADirectory(path.to_path_buf()));
            }
            return Ok(Self::at(path));
        }

        match Self::discover() {
            Ok(project) => Ok(project),
            Err(ProjectError::NotFound { searched_from }) => {
                tracing::debug!(
                    from = %searched_from.display(),
                    "no project markers found, using working directory"
                );
                Ok(Self::at(&searched_from))
            }
            Err(e) => Err(e),
        }
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the `.aismm` configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Resolve a possibly relative path against the root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an AISMM project (searched from {searched_from:?})")]
    NotFound { searched_from: PathBuf },

    #[error("project root {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_finds_definition_dir() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(DEFINITION_DIR)).unwrap();

        let subdir = tmp.path().join("webapp/src/components");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_finds_config_dir() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(CONFIG_DIR)).unwrap();

        let project = Project::discover_from(tmp.path()).unwrap();
        assert!(project.config_dir().is_dir());
    }

    #[test]
    fn test_locate_rejects_missing_explicit_root() {
        let tmp = tempdir().unwrap();
        let err = Project::locate(Some(&tmp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, ProjectError::NotADirectory(_)));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let tmp = tempdir().unwrap();
        let project = Project::at(tmp.path());
        let abs = tmp.path().join("x.yaml");
        assert_eq!(project.resolve(&abs), abs);
        assert_eq!(
            project.resolve(Path::new("a/b.yaml")),
            project.root().join("a/b.yaml")
        );
    }
}
