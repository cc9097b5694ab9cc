//! PIM API client configuration.
//!
//! Points the client at a site's base URL. Override via environment
//! variables or explicit construction for staging/testing.

use url::Url;

use crate::retry::DEFAULT_MAX_RETRIES;

/// Default base URL of a local development site.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for connecting to a PIM site.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct PimApiConfig {
    /// Site root. Methods are called at `{base_url}/api/method/{method}`.
    pub base_url: Url,
    /// Value of the `Authorization` header, e.g. `token <key>:<secret>`.
    /// Requests are sent without it when `None`.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after a request fails to reach the server.
    pub max_retries: u32,
}

impl std::fmt::Debug for PimApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PimApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl PimApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PIM_API_BASE_URL` (default: `http://127.0.0.1:8000`)
    /// - `PIM_API_TOKEN` (optional)
    /// - `PIM_TIMEOUT_SECS` (default: 30)
    /// - `PIM_MAX_RETRIES` (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("PIM_API_BASE_URL", DEFAULT_BASE_URL)?,
            api_token: std::env::var("PIM_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs: std::env::var("PIM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            max_retries: std::env::var("PIM_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }

    /// Create a configuration for an explicit base URL with no token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            api_token: None,
            timeout_secs: 30,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a configuration pointing to a local stub server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed
    /// (should not occur for valid port numbers, but avoids `expect()`).
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            api_token: None,
            timeout_secs: 5,
            max_retries: 1,
        })
    }

    /// Replace the API token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

fn parse_url(label: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(label.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("PIM_API_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_builds_valid_config() {
        let cfg = PimApiConfig::local(8123).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8123/");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(cfg.api_token.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = PimApiConfig::local(8000)
            .unwrap()
            .with_token("token abc:s3cret");
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_PIM_VAR_12345", DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TEST_BAD_URL_PIM", "not a url");
        let result = env_url("TEST_BAD_URL_PIM", DEFAULT_BASE_URL);
        std::env::remove_var("TEST_BAD_URL_PIM");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == "TEST_BAD_URL_PIM"));
    }

    #[test]
    fn for_base_url_rejects_garbage() {
        assert!(PimApiConfig::for_base_url("::").is_err());
        assert!(PimApiConfig::for_base_url("https://pim.example.com").is_ok());
    }
}
