//! Configuration for the API client
//!
//! Built from the shared `[api]` configuration section, with environment
//! overrides applied by [`ClientConfig::from_env`].

use crate::error::{ApiError, ApiResult};
use entity_admin_core::config::{ApiConfig, Config, DEFAULT_BASE_URL};
use std::time::Duration;

/// Default `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = concat!("entity-admin-api-client/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL resource paths are joined onto
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            token: api.token.clone(),
            timeout: api.timeout_secs.map(Duration::from_secs),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from the config file (if any) and environment
    ///
    /// Reads the following environment variables:
    /// - `ENTITY_ADMIN_API_URL`: Base URL of the backend
    /// - `ENTITY_ADMIN_TOKEN`: Bearer token
    /// - `ENTITY_ADMIN_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Config::load(None)?;
        config.apply_env_overrides()?;
        Ok(Self::from(&config.schema.api))
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Join a resource path onto the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{} (must start with http:// or https://)",
                self.base_url
            )));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
