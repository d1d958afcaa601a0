//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::Project;

/// Default location of the definition, relative to the project root
pub const DEFAULT_DEFINITION: &str = "aismm_definition/aismm.yaml";
/// Default sync destination, relative to the project root
pub const DEFAULT_SYNC_DESTINATION: &str = "webapp/public/aismm.yaml";

/// AISMM configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the definition file
    pub definition: Option<PathBuf>,

    /// Where `aismm sync` copies the definition
    pub sync_destination: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: &Project) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (applied lazily by the accessors)

        // 2. Global user config (~/.config/aismm/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.aismm/config.yaml)
        let project_path = project.config_dir().join("config.yaml");
        if let Some(project_config) = Self::read(&project_path) {
            config.merge(project_config);
        }

        // 4. Environment variables
        if let Ok(definition) = std::env::var("AISMM_DEFINITION") {
            config.definition = Some(PathBuf::from(definition));
        }
        if let Ok(dest) = std::env::var("AISMM_SYNC_DEST") {
            config.sync_destination = Some(PathBuf::from(dest));
        }

        config
    }

    fn read(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "aismm")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.definition.is_some() {
            self.definition = other.definition;
        }
        if other.sync_destination.is_some() {
            self.sync_destination = other.sync_destination;
        }
    }

    /// Absolute path of the definition file
    pub fn definition_path(&self, project: &Project) -> PathBuf {
        let relative = self
            .definition
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEFINITION));
        project.resolve(&relative)
    }

    /// Absolute path of the sync destination
    pub fn sync_destination_path(&self, project: &Project) -> PathBuf {
        let relative = self
            .sync_destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYNC_DESTINATION));
        project.resolve(&relative)
    }
}
