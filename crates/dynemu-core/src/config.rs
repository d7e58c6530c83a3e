use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "DYNEMU_API_KEY";

/// Public address of the emulation service; only the location, not the
/// client identity.
pub const DEFAULT_BASE_URL: &str = "https://api.malcore.io";

/// Client identification sent with every submission.
pub const USER_AGENT: &str = concat!("dynemu/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the remote emulation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    /// `None` lets a hanging service block the run indefinitely.
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// Build a config reading the credential from [`API_KEY_ENV`].
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key_from(env::var(API_KEY_ENV).ok())?;
        Ok(Self::new(base_url, api_key))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validate a raw credential value; blank values count as missing.
pub fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey { var: API_KEY_ENV }),
    }
}
