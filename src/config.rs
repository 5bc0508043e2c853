//! Configuration loading.
//!
//! Settings come from an optional YAML file; every field has a serde default
//! so an absent or partial file works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    #[serde(default)]
    pub dependencies: DependenciesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            dependencies: DependenciesConfig::default(),
        }
    }
}

/// Dependency edge behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependenciesConfig {
    /// Reject edges that would close a dependency cycle (default: false,
    /// cycles are accepted as they always were).
    #[serde(default)]
    pub reject_cycles: bool,
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("worktask").join("worktask.db"))
        .unwrap_or_else(|| PathBuf::from("worktask.db"))
}

impl Config {
    /// Load configuration from the given file, or defaults when no path is
    /// supplied. A missing explicit file is an error; a missing default is
    /// not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                let config: Config = serde_yaml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?;
                debug!(config = ?config, "loaded config");
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = Config::load(None).unwrap();
        assert!(!config.dependencies.reject_cycles);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("dependencies:\n  reject_cycles: true\n").unwrap();
        assert!(config.dependencies.reject_cycles);
        assert!(config.database.ends_with("worktask.db"));
    }
}
