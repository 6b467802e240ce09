//! Configuration types and parsing for bdp.yml

use crate::error::{CoreError, CoreResult};
use crate::identifier::is_valid_identifier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a project directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["bdp.yml", "bdp.yaml"];

/// Database location used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "bdp.duckdb";

/// In-memory database location
pub const MEMORY_DB_PATH: &str = ":memory:";

/// Project configuration from bdp.yml. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory (relative to the project root) holding asset files
    #[serde(default = "default_datasets_path")]
    pub datasets_path: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Namespace of metadata lines (`<namespace>.name = ...`)
    #[serde(default = "default_metadata_namespace")]
    pub metadata_namespace: String,

    /// Program used to run script assets
    #[serde(default = "default_script_interpreter")]
    pub script_interpreter: String,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (file path or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datasets_path: default_datasets_path(),
            database: DatabaseConfig::default(),
            metadata_namespace: default_metadata_namespace(),
            script_interpreter: default_script_interpreter(),
        }
    }
}

fn default_datasets_path() -> String {
    "datasets".to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_metadata_namespace() -> String {
    "dataset".to_string()
}

fn default_script_interpreter() -> String {
    "bash".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_file(dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the config file in `dir`, if any
    pub fn find_file(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if !is_valid_identifier(&self.metadata_namespace) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "metadata_namespace '{}' must be a valid identifier",
                    self.metadata_namespace
                ),
            });
        }
        if self.datasets_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "datasets_path cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        if self.script_interpreter.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "script_interpreter cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute datasets directory for a project root
    pub fn datasets_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.datasets_path)
    }

    /// Database location for a project root.
    ///
    /// Relative file paths resolve against the root; `:memory:` is kept.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        resolve_db_path(&self.database.path, root)
    }
}

/// Resolve a database location against `root` unless absolute or in-memory.
pub fn resolve_db_path(path: &str, root: &Path) -> String {
    if path == MEMORY_DB_PATH || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
