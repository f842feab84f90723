//! Configuration for shelf
//!
//! Where the remote store lives, how long a request may take, and how the
//! collection view starts out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::view::PageSize;

/// Client-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Remote store settings
    pub api: ApiConfig,
    /// Collection view settings
    pub view: ViewConfig,
}

/// Remote store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the `/books` paths are appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 100,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Collection view settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page when the dashboard opens (5, 10, 20, 50 or 100)
    pub default_page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::default().get(),
        }
    }
}

impl ViewConfig {
    pub fn page_size(&self) -> Result<PageSize, ConfigError> {
        PageSize::try_from(self.default_page_size).map_err(|size| {
            ConfigError::OutOfRange(format!(
                "default_page_size must be one of 5, 10, 20, 50, 100 (got {})",
                size
            ))
        })
    }
}

impl ShelfConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/shelf/config.toml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shelf").join("config.toml"))
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the default config file if it exists, otherwise use defaults
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidUrl(self.api.base_url.clone())),
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "timeout_secs must be positive".to_string(),
            ));
        }

        self.view.page_size()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ShelfConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.timeout(), Duration::from_secs(100));
        assert_eq!(config.view.page_size().unwrap(), PageSize::Ten);
    }

    #[test]
    fn test_toml_roundtrip_and_partial() {
        let config = ShelfConfig::from_toml(
            r#"
            [api]
            base_url = "https://books.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://books.example.com/api");
        assert_eq!(config.api.timeout_secs, 100);

        let toml = config.to_toml().unwrap();
        assert_eq!(ShelfConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_json_serialization() {
        let config = ShelfConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(ShelfConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ShelfConfig::default();
        config.view.default_page_size = 7;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));

        let mut config = ShelfConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ShelfConfig::default();
        config.api.base_url = "localhost".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\ndefault_page_size = 20").unwrap();
        let config = ShelfConfig::load(file.path()).unwrap();
        assert_eq!(config.view.page_size().unwrap(), PageSize::Twenty);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[view]\ndefault_page_size = 3").unwrap();
        assert!(ShelfConfig::load(bad.path()).is_err());
    }
}
