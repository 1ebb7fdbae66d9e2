//! Connection configuration
//!
//! A connection is described by a small YAML (or JSON) document:
//!
//! ```yaml
//! api_key: sk_test_...
//! max_network_retries: 10
//! requests_per_second: 25
//! ```
//!
//! Only `api_key` is required, and it may instead come from the
//! `STRIPE_API_KEY` environment variable. A key set in the config wins.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when the config has no key
pub const API_KEY_ENV: &str = "STRIPE_API_KEY";

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Retries on transient network failure
pub const DEFAULT_MAX_NETWORK_RETRIES: u32 = 10;

/// Stripe allows 25 read requests per second in test mode
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 25;

/// Stripe connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Secret or restricted API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (override for tests and proxies)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum retries on transient failure
    #[serde(default = "default_max_network_retries")]
    pub max_network_retries: u32,

    /// Client-side request budget; 0 disables the limiter
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pinned `Stripe-Version` header
    #[serde(default)]
    pub stripe_version: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_network_retries() -> u32 {
    DEFAULT_MAX_NETWORK_RETRIES
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

fn default_timeout_secs() -> u64 {
    80
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            max_network_retries: default_max_network_retries(),
            requests_per_second: default_requests_per_second(),
            timeout_secs: default_timeout_secs(),
            stripe_version: None,
        }
    }
}

impl ConnectionConfig {
    /// Config with only an API key set
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Point the connection at another endpoint
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse from a YAML string (JSON is valid YAML)
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Resolve the API key, falling back to `STRIPE_API_KEY`
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolve the API key against an explicit environment value
    pub fn resolve_api_key_with(&self, env_value: Option<String>) -> Result<String> {
        self.api_key
            .clone()
            .none_if_empty()
            .or_else(|| env_value.none_if_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, "https://api.stripe.com");
        assert_eq!(config.max_network_retries, 10);
        assert_eq!(config.requests_per_second, 25);
        assert_eq!(config.timeout(), Duration::from_secs(80));
    }

    #[test]
    fn test_parse_yaml() {
        let config = ConnectionConfig::from_yaml_str(
            r"
api_key: sk_test_123
max_network_retries: 2
stripe_version: '2023-10-16'
",
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk_test_123"));
        assert_eq!(config.max_network_retries, 2);
        assert_eq!(config.stripe_version.as_deref(), Some("2023-10-16"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_json() {
        let config =
            ConnectionConfig::from_yaml_str(r#"{"api_key": "sk_test_json", "timeout_secs": 5}"#)
                .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk_test_json"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            ConnectionConfig::from_yaml_str("  \n").unwrap(),
            ConnectionConfig::default()
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ConnectionConfig::from_yaml_str("base_url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = ConnectionConfig::from_yaml_str("base_url: ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: sk_test_file").unwrap();

        let config = ConnectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk_test_file"));

        let err = ConnectionConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let config = ConnectionConfig::with_api_key("sk_config");
        assert_eq!(
            config
                .resolve_api_key_with(Some("sk_env".to_string()))
                .unwrap(),
            "sk_config"
        );
    }

    #[test]
    fn test_resolve_api_key_env_fallback() {
        let config = ConnectionConfig::default();
        assert_eq!(
            config
                .resolve_api_key_with(Some("sk_env".to_string()))
                .unwrap(),
            "sk_env"
        );

        let empty = ConnectionConfig::with_api_key("");
        assert_eq!(
            empty
                .resolve_api_key_with(Some("sk_env".to_string()))
                .unwrap(),
            "sk_env"
        );
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let err = ConnectionConfig::default()
            .resolve_api_key_with(None)
            .unwrap_err();
        assert_eq!(err.to_string(), "api_key must be configured");
    }
}
