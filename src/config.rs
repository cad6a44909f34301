//! Configuration management for showbrowse
//!
//! Handles config file loading and environment overrides.
//! Config is stored at ~/.config/showbrowse/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::tvmaze::DEFAULT_BASE_URL;
use crate::coordinator::PREFERRED_SHOW_ID;
use crate::models::ShowId;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SHOWBROWSE_API_URL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TVMaze API base URL
    pub api_base_url: String,
    /// Show opened on start when present in the catalog
    pub default_show_id: ShowId,
    /// Start the TUI on the default show's episodes instead of the show list
    pub open_default_show: bool,
    /// Tracing filter directive (e.g. "showbrowse=debug")
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            default_show_id: PREFERRED_SHOW_ID,
            open_default_show: true,
            log_level: None,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/showbrowse/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("showbrowse").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
            .with_env_overrides()
    }

    /// Load config from an explicit path; unreadable or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path` when given, else from the default location
    pub fn resolve(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from(p).with_env_overrides(),
            None => Self::load(),
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }

    /// Directory for rolling log files
    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join("showbrowse").join("logs"))
            .unwrap_or_else(|| std::env::temp_dir().join("showbrowse").join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.tvmaze.com");
        assert_eq!(config.default_show_id, 82);
        assert!(config.open_default_show);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("default_show_id = 169").unwrap();
        assert_eq!(config.default_show_id, 169);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("showbrowse-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "open_default_show = false\nlog_level = \"showbrowse=debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert!(!config.open_default_show);
        assert_eq!(config.log_level.as_deref(), Some("showbrowse=debug"));
        assert_eq!(config.default_show_id, 82);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_or_invalid_file_gives_default() {
        let missing = std::env::temp_dir().join("showbrowse-does-not-exist.toml");
        assert_eq!(Config::load_from(&missing), Config::default());

        let dir = std::env::temp_dir().join(format!("showbrowse-invalid-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "default_show_id = \"not a number\"").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
        let _ = std::fs::remove_dir_all(dir);
    }
}
