//! Configuration shared by both binaries.
//!
//! Values come from an optional YAML file; command-line flags override them.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::TASKS_FILE;

/// Application directory under the platform config/data dirs.
pub const APP_DIR: &str = "taskbook";

/// Config file name.
const CONFIG_FILE: &str = "config.yaml";

/// Default bookstore API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the task tracker keeps its JSON file
    pub tasks_file: PathBuf,

    pub bookstore: BookstoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookstoreConfig {
    /// Server root; endpoints live under `/api/books`
    pub base_url: String,

    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(TASKS_FILE),
            bookstore: BookstoreConfig::default(),
        }
    }
}

impl Default for BookstoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BookstoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        if config.bookstore.timeout_secs == 0 {
            eyre::bail!("bookstore.timeout_secs must be greater than zero");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tasks_file, PathBuf::from("tasks.json"));
        assert_eq!(config.bookstore.base_url, "http://localhost:5000");
        assert_eq!(config.bookstore.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("bookstore:\n  timeout_secs: 12\n").unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("tasks.json"));
        assert_eq!(config.bookstore.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bookstore.timeout_secs, 12);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "tasks_file: /tmp/my-tasks.json\nbookstore:\n  base_url: http://books.local:8080\n  timeout_secs: 3\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("/tmp/my-tasks.json"));
        assert_eq!(config.bookstore.base_url, "http://books.local:8080");
        assert_eq!(config.bookstore.timeout_secs, 3);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Config::from_yaml("bookstore:\n  timeout_secs: 0\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(Config::from_yaml("bookstore: [unclosed").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.yaml"))).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "tasks_file: work.json\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("work.json"));
    }
}
