//! Application configuration.

use crate::backend::utils::paths::{get_app_dir, get_config_path};
use crate::utils::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "SURVEY_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every API path is appended to, e.g. `http://host/api`.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` style environment settings.
    pub system_proxy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the token file. Defaults to the application directory.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
            user_agent: concat!("SurveyConsole/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

impl ApiConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: "storage.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path of the token storage file.
    pub fn path(&self) -> Result<PathBuf> {
        let dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => get_app_dir()?,
        };
        Ok(dir.join(&self.file_name))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Survey Console".to_string(),
            width: 1280.0,
            height: 832.0,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the application directory and applies
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&get_config_path()?)?;
        Ok(config.with_api_url(std::env::var(API_URL_ENV).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        info!("Loading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| {
            warn!("Invalid config file {}: {e}", path.display());
            crate::simple_error!(Config, "Invalid config file {}: {}", path.display(), e)
        })
    }

    /// Replaces the API base URL when an override is given.
    pub fn with_api_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorKind;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "api": { "base_url": "https://surveys.example/api" } }"#)
            .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://surveys.example/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn api_url_override_ignores_blank_values() {
        let config = AppConfig::default().with_api_url(Some("  ".to_string()));
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);

        let config = AppConfig::default().with_api_url(Some("http://10.0.0.2/api".to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.2/api");
    }

    #[test]
    fn storage_path_uses_configured_directory() {
        let storage = StorageConfig {
            directory: Some(PathBuf::from("/tmp/console")),
            file_name: "tokens.json".to_string(),
        };
        assert_eq!(storage.path().unwrap(), PathBuf::from("/tmp/console/tokens.json"));
    }
}
