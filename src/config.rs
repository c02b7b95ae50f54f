//! Configuration: ~/.rackspec/config.json plus environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration. Every field has a default; the config file may
/// specify any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit Chrome/Chromium binary; auto-discovered when unset.
    pub browser_binary: Option<PathBuf>,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Navigation/request timeout for the browser, in milliseconds.
    pub nav_timeout_ms: u64,
    /// How long to wait for the specifications region to appear.
    pub settle_timeout_ms: u64,
    /// Poll interval while waiting for the region.
    pub poll_interval_ms: u64,
    /// Timeout for static (non-browser) fetches.
    pub http_timeout_ms: u64,
    /// Data directory holding the database; defaults to ~/.rackspec.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_binary: None,
            headless: true,
            nav_timeout_ms: 30_000,
            settle_timeout_ms: 10_000,
            poll_interval_ms: 250,
            http_timeout_ms: 20_000,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load from the default config path, falling back to defaults when no
    /// file exists. Environment variables override file values.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid config: {}", path.display()))
    }

    fn apply_env(&mut self) {
        if let Ok(bin) = std::env::var("RACKSPEC_BROWSER") {
            if !bin.is_empty() {
                self.browser_binary = Some(PathBuf::from(bin));
            }
        }
        if std::env::var_os("RACKSPEC_HEADFUL").is_some() {
            self.headless = false;
        }
        if let Ok(dir) = std::env::var("RACKSPEC_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
    }

    /// ~/.rackspec/config.json
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rackspec").join("config.json"))
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".rackspec")
        })
    }

    /// Path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("sheets.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.headless);
        assert_eq!(config.nav_timeout_ms, 30_000);
        assert_eq!(config.settle_timeout_ms, 10_000);
        assert!(config.browser_binary.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"headless": false, "settle_timeout_ms": 3000}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.headless);
        assert_eq!(config.settle_timeout_ms, 3000);
        // Untouched fields fall back to defaults.
        assert_eq!(config.nav_timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_db_path_under_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/rackspec")),
            ..Config::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/srv/rackspec/sheets.db"));
    }
}
