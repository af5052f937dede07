//! Layered configuration
//!
//! Resolution order, highest priority first:
//! 1. Environment variables (`AKASYS_API_URL`, `AKASYS_API_TOKEN`)
//! 2. Config file (`<config dir>/akasys/config.toml`)
//! 3. Built-in defaults (local backend on port 8000, no token)
//!
//! The `login` command persists the issued bearer token back into the
//! config file so subsequent commands are authenticated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "AKASYS_API_URL";
/// Environment variable overriding the stored bearer token
pub const API_TOKEN_ENV: &str = "AKASYS_API_TOKEN";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Resolved configuration for the CLI and server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the upstream Akasys backend
    pub api_url: String,
    /// Bearer token from a previous `login`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl Config {
    /// Load config from the default location with env overrides applied
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load config from an explicit path with env overrides applied
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(ref p) if p.exists() => {
                let raw = fs::read_to_string(p)?;
                let parsed: Config = toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("{}: {}", p.display(), e)))?;
                debug!(path = %p.display(), "Loaded config file");
                parsed
            }
            _ => Config::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = url;
        }
        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            config.token = Some(token);
        }

        Ok(config)
    }

    /// Persist this config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = default_config_path()
            .ok_or_else(|| Error::Config("No config directory available".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Persist this config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("serialize config: {}", e)))?;
        fs::write(path, raw)?;
        Ok(())
    }
}

/// Default config file path (`~/.config/akasys/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("akasys").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_file() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        // Env vars may override in CI; the URL is always non-empty either way
        assert!(!config.api_url.is_empty());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("akasys").join("config.toml");

        let config = Config {
            api_url: "http://backend.test:9000".to_string(),
            token: Some("tok123".to_string()),
        };
        config.save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let reloaded: Config = toml::from_str(&raw).unwrap();
        assert_eq!(reloaded.api_url, "http://backend.test:9000");
        assert_eq!(reloaded.token.as_deref(), Some("tok123"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [not toml").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
