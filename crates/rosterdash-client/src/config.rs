//! Configuration for the API client.
//!
//! Loaded from environment variables; every variable has a default so a
//! bare environment talks to a local backend.

use std::time::Duration;

use crate::error::ClientError;

/// Default REST base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `ROSTERDASH_API_URL` -- REST base URL (default `http://localhost:8080/api`)
    /// - `ROSTERDASH_TIMEOUT_MS` -- request timeout in milliseconds (default 10000)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ROSTERDASH_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        if api_url.is_empty() {
            return Err(ClientError::Config(String::from(
                "ROSTERDASH_API_URL must not be empty",
            )));
        }

        let timeout_ms: u64 = lookup("ROSTERDASH_TIMEOUT_MS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_MS.to_string())
            .trim()
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid ROSTERDASH_TIMEOUT_MS: {e}")))?;

        Ok(Self {
            api_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}
