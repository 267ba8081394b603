//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//! Nested keys use `__` as the separator, e.g. `BACKEND__BASE_URL`.

use serde::Deserialize;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Backend service configuration.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the backend service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL the `/integrations/...` routes are served under.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl BackendConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
