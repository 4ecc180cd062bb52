//! Remote endpoint configuration.
//!
//! Loaded once at host startup. This is the only place in the crate where
//! an error can surface to the host; everything downstream recovers
//! internally.

use std::time::Duration;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for the content generation service.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Base URL of the generation service; endpoint paths are appended.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub api_key: Option<String>,
    /// Per-attempt timeout. A timed-out attempt is a transport failure and
    /// the strategy ladder advances past it.
    pub timeout: Duration,
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl RemoteConfig {
    /// Builds a config pointing at `base_url` with defaults for the rest.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `CONTENT_API_BASE_URL` is required; `CONTENT_API_KEY` and
    /// `CONTENT_API_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let base_url = std::env::var("CONTENT_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("CONTENT_API_BASE_URL".to_string()))?;
        reqwest::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidValue("CONTENT_API_BASE_URL".to_string(), e.to_string())
        })?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let api_key = std::env::var("CONTENT_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let timeout_str = std::env::var("CONTENT_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "CONTENT_API_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a positive integer", timeout_str),
            )
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "CONTENT_API_TIMEOUT_SECS".to_string(),
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
