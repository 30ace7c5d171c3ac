//! Executor configuration.
//!
//! Values come from `HTTPX_*` environment variables (e.g. `HTTPX_TIMEOUT_MS`,
//! `HTTPX_USER_AGENT`) or from any [`config::Config`] the caller assembles.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Prefix of the environment variables read by [`ExecutorConfig::from_env`].
pub const ENV_PREFIX: &str = "HTTPX";

/// Default cap on buffered in-process response bodies (16 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Default redirect limit for live requests.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error("failed to load executor configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Settings shared by the bundled executors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// User-Agent sent by the live executor.
    pub user_agent: String,
    /// Default deadline in milliseconds, used when the request sets none.
    pub timeout_ms: Option<u64>,
    /// Redirects followed by the live executor.
    pub max_redirects: usize,
    /// Largest response body the in-process executor buffers.
    pub body_limit: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("httpx/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ExecutorConfig {
    /// Loads the configuration from `HTTPX_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value of the wrong type.
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Self::from_config(source)
    }

    /// Deserializes the configuration from an assembled [`config::Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a key holds a value of the wrong type.
    pub fn from_config(source: config::Config) -> Result<Self, ConfigError> {
        let config = source.try_deserialize()?;
        tracing::debug!(?config, "loaded executor configuration");
        Ok(config)
    }

    /// The default deadline as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ExecutorConfig::default();
        assert!(config.user_agent.starts_with("httpx/"));
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.body_limit, 16 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_fill_in_defaults() {
        let source = config::Config::builder()
            .set_override("timeout_ms", 250_i64)
            .unwrap()
            .set_override("user_agent", "probe/1.0")
            .unwrap()
            .build()
            .unwrap();

        let config = ExecutorConfig::from_config(source).unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let source = config::Config::builder()
            .set_override("max_redirects", "many")
            .unwrap()
            .build()
            .unwrap();

        assert!(ExecutorConfig::from_config(source).is_err());
    }
}
