//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key (file name) the bearer token is persisted under.
pub const TOKEN_KEY: &str = "auth_token";

/// Frontend route the guard redirects unauthenticated navigation to.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the originally requested path through login.
pub const REDIRECT_PARAM: &str = "redirect";

/// Client configuration
///
/// The base URL is fixed configuration, never computed per-request. Timeouts
/// are explicit: the request timeout bounds every call the client makes, and
/// the bootstrap deadline additionally bounds the startup verification so a
/// hung backend cannot block startup indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8000/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Overall deadline for the startup token verification, in seconds
    pub bootstrap_deadline_secs: u64,
}

impl ClientConfig {
    /// Configuration pointing at the given backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Message("base_url: cannot be empty".into()));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Message(format!("base_url: invalid URL - {e}")))?;
        if self.bootstrap_deadline_secs == 0 {
            return Err(ConfigError::Message(
                "bootstrap_deadline_secs: must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Bootstrap deadline as a [`Duration`]
    pub fn bootstrap_deadline(&self) -> Duration {
        Duration::from_secs(self.bootstrap_deadline_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            bootstrap_deadline_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_base_url() {
        let config = ClientConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_base_url() {
        let config = ClientConfig::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_bootstrap_deadline() {
        let config = ClientConfig {
            bootstrap_deadline_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
