//! Configuration types for kaiwa.
//!
//! Configuration is an optional JSON file; every field has a default so an
//! empty object (or no file at all) is valid. The endpoint can additionally
//! be overridden from the environment.

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "KAIWA_ENDPOINT";

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Main configuration for kaiwa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Chat endpoint receiving `POST` requests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Language of the interface strings.
    #[serde(default)]
    pub locale: Locale,

    /// Color theme.
    #[serde(default)]
    pub theme: ThemeName,

    /// Per-request timeout. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

fn default_endpoint() -> String {
    "http://localhost:8005/api/chat".into()
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

/// Named color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    /// Dark theme.
    #[default]
    Mocha,
    /// Light theme.
    Latte,
    /// High contrast theme.
    HighContrast,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            locale: Locale::default(),
            theme: ThemeName::default(),
            request_timeout_seconds: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.endpoint_url()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults, then apply the
    /// environment override.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.set_endpoint(endpoint)?;
        }
        Ok(config)
    }

    /// Replace the endpoint after validating it.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Result<(), ConfigError> {
        let endpoint = endpoint.into();
        parse_endpoint(&endpoint)?;
        self.endpoint = endpoint;
        Ok(())
    }

    /// The endpoint as a parsed URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint(&self.endpoint)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8005/api/chat");
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.theme, ThemeName::Mocha);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"endpoint": "https://chat.example.com/api/chat", "locale": "en", "theme": "high_contrast", "request_timeout_seconds": 30}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "https://chat.example.com/api/chat");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.theme, ThemeName::HighContrast);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_rejects_bad_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "not a url"}}"#).unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ endpoint").unwrap();
        assert!(matches!(
            Config::load(file.path()).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_set_endpoint_validates_scheme() {
        let mut config = Config::default();
        assert!(config.set_endpoint("ftp://example.com/chat").is_err());
        assert_eq!(config.endpoint, "http://localhost:8005/api/chat");

        config.set_endpoint("http://127.0.0.1:9000/api/chat").unwrap();
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:9000/api/chat"
        );
    }
}
