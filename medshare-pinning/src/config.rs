//! Client configuration.

use medshare_core::constants::*;
use medshare_core::error::{MedshareError, Result};
use medshare_core::types::Credentials;

/// Pinata client configuration.
///
/// Credentials are read once, at construction, and never change afterwards.
#[derive(Clone, Debug)]
pub struct PinataConfig {
    /// REST API base URL (e.g. "https://api.pinata.cloud")
    pub api_url: String,
    /// Gateway base URL; CIDs are appended as a path segment
    pub gateway_url: String,
    /// Credentials, if any complete form was supplied
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Stats lookups in flight during an access-log batch (1 = sequential)
    pub access_log_concurrency: usize,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            credentials: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            access_log_concurrency: DEFAULT_ACCESS_LOG_CONCURRENCY,
        }
    }
}

impl PinataConfig {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_seconds = match non_empty(ENV_TIMEOUT_SECONDS) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                MedshareError::ConfigError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECONDS, raw
                ))
            })?,
            None => defaults.timeout_seconds,
        };

        Ok(Self {
            api_url: non_empty(ENV_API_URL).unwrap_or(defaults.api_url),
            gateway_url: non_empty(ENV_GATEWAY_URL).unwrap_or(defaults.gateway_url),
            credentials: Credentials::from_parts(
                lookup(ENV_API_KEY),
                lookup(ENV_API_SECRET),
                lookup(ENV_JWT),
            ),
            timeout_seconds,
            access_log_concurrency: defaults.access_log_concurrency,
        })
    }

    /// Uses an API key pair.
    pub fn with_api_key(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::api_key(key, secret));
        self
    }

    /// Uses a bearer token (JWT).
    pub fn with_jwt(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::bearer(token));
        self
    }

    /// Replaces the credentials wholesale.
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Overrides the gateway base URL.
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Overrides the REST API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Overrides access-log concurrency. Values below 1 are treated as 1.
    pub fn with_access_log_concurrency(mut self, concurrency: usize) -> Self {
        self.access_log_concurrency = concurrency.max(1);
        self
    }

    /// True when a complete credential form is present.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}
