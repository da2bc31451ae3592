//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUMERA_API_URL` - Base URL of the admin backend API (e.g.,
//!   `https://api.lumera.example/api`)
//!
//! ## Optional
//! - `LUMERA_DATA_DIR` - Directory for persisted session entries
//!   (default: `.lumera`)
//! - `LUMERA_HTTP_TIMEOUT_SECS` - Transport-level request timeout in seconds
//!   (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DATA_DIR: &str = ".lumera";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the admin backend API. Endpoint paths (`/products`,
    /// `/admins/login`, ...) are appended to it.
    pub base_url: Url,
    /// Directory holding the persisted session entries.
    pub data_dir: PathBuf,
    /// Transport-level request timeout applied to every call.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration with default data directory and timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `LUMERA_API_URL` is missing or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url("LUMERA_API_URL", &get_required_env("LUMERA_API_URL")?)?;
        let data_dir = PathBuf::from(get_env_or_default("LUMERA_DATA_DIR", DEFAULT_DATA_DIR));
        let timeout = parse_timeout(
            "LUMERA_HTTP_TIMEOUT_SECS",
            &get_env_or_default(
                "LUMERA_HTTP_TIMEOUT_SECS",
                &DEFAULT_TIMEOUT_SECS.to_string(),
            ),
        )?;

        Ok(Self {
            base_url,
            data_dir,
            timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and sanity-check a base URL.
///
/// Only `http`/`https` URLs make sense here; anything else is almost
/// certainly a misconfigured variable.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Parse a timeout value in whole seconds.
fn parse_timeout(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_accepts_http_and_https() {
        assert!(parse_base_url("TEST", "https://api.lumera.example/api").is_ok());
        assert!(parse_base_url("TEST", "http://localhost:4000").is_ok());
    }

    #[test]
    fn parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("TEST", "ftp://api.lumera.example").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(parse_base_url("TEST", "not a url").is_err());
    }

    #[test]
    fn parse_timeout_accepts_whole_seconds() {
        assert_eq!(parse_timeout("TEST", "45").unwrap(), Duration::from_secs(45));
    }

    #[test]
    fn parse_timeout_rejects_non_numbers() {
        assert!(parse_timeout("TEST", "soon").is_err());
    }

    #[test]
    fn new_applies_defaults() {
        let config = ApiConfig::new(Url::parse("http://localhost:4000/api").unwrap());
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
