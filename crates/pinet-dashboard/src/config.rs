//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Substring of the sample `.env` URL that marks the API as not configured
const PLACEHOLDER_URL: &str = "your_pinet_api_ip";

/// Top-level configuration for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Web server settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// PiNet API connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address and port to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// JSON file listing the hosts shown on the page
    #[serde(default = "default_hosts_file")]
    pub hosts_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
            hosts_file: default_hosts_file(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_hosts_file() -> PathBuf {
    PathBuf::from("data/hosts.json")
}

/// PiNet API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the PiNet API
    #[serde(default)]
    pub url: Option<String>,
    /// Shared API key
    #[serde(default)]
    pub key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    /// URL and key, if both are set and the URL is not the sample placeholder
    ///
    /// # Errors
    /// Returns [`DashboardError::NotConfigured`] otherwise.
    pub fn credentials(&self) -> Result<(&str, &str), DashboardError> {
        match (self.url.as_deref(), self.key.as_deref()) {
            (Some(url), Some(key))
                if !url.is_empty() && !key.is_empty() && !url.contains(PLACEHOLDER_URL) =>
            {
                Ok((url, key))
            }
            _ => Err(DashboardError::NotConfigured),
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_default() -> eyre::Result<Self> {
        // Check environment variable
        if let Ok(path) = std::env::var("PINET_DASHBOARD_CONFIG") {
            return Self::load(Path::new(&path));
        }

        // Try common paths
        let paths = [
            PathBuf::from("pinet-dashboard.toml"),
            PathBuf::from("/etc/pinet/dashboard.toml"),
            dirs::config_dir()
                .map(|p| p.join("pinet/dashboard.toml"))
                .unwrap_or_default(),
        ];

        for path in paths {
            if path.is_file() {
                return Self::load(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Apply `PINET_API_URL` and `PINET_API_KEY` from the environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var("PINET_API_URL").ok(),
            std::env::var("PINET_API_KEY").ok(),
        )
    }

    /// Replace the API URL and key with any values that are set
    #[must_use]
    pub fn with_overrides(mut self, url: Option<String>, key: Option<String>) -> Self {
        if url.is_some() {
            self.api.url = url;
        }
        if key.is_some() {
            self.api.key = key;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dashboard.bind, "0.0.0.0:5001");
        assert_eq!(config.dashboard.hosts_file, PathBuf::from("data/hosts.json"));
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert!(config.api.credentials().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [dashboard]
            bind = "127.0.0.1:8000"

            [api]
            url = "http://192.168.1.50:5000"
            key = "secret"
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.bind, "127.0.0.1:8000");
        assert_eq!(config.dashboard.log_level, "info");
        assert_eq!(config.api.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.api.credentials().unwrap(),
            ("http://192.168.1.50:5000", "secret")
        );
    }

    #[test]
    fn test_placeholder_url_is_not_configured() {
        let config = Config::default().with_overrides(
            Some("http://your_pinet_api_ip:5000".to_string()),
            Some("secret".to_string()),
        );
        assert!(matches!(
            config.api.credentials(),
            Err(DashboardError::NotConfigured)
        ));
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let config =
            Config::default().with_overrides(Some("http://192.168.1.50:5000".to_string()), None);
        assert!(config.api.credentials().is_err());
    }

    #[test]
    fn test_overrides_keep_unset_values() {
        let mut config = Config::default();
        config.api.url = Some("http://file:5000".to_string());
        config.api.key = Some("file-key".to_string());

        let config = config.with_overrides(None, Some("env-key".to_string()));

        assert_eq!(config.api.url.as_deref(), Some("http://file:5000"));
        assert_eq!(config.api.key.as_deref(), Some("env-key"));
    }
}
