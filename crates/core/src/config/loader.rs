//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::Path;

/// Overrides `api.base_url`
pub const ENV_API_URL: &str = "ENTITY_ADMIN_API_URL";
/// Overrides `api.token`
pub const ENV_TOKEN: &str = "ENTITY_ADMIN_TOKEN";
/// Overrides `api.timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "ENTITY_ADMIN_TIMEOUT_SECS";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults.
    ///
    /// An explicitly given path must exist; standard locations are optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            tracing::debug!(path = %p, "Loading configuration");
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self {
            schema: toml::from_str(content)?,
            path: None,
        })
    }

    /// Apply `ENTITY_ADMIN_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment, test fixtures)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.schema.api.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.schema.api.token = Some(token);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let parsed = secs.parse::<u64>().map_err(|_| {
                Error::new(
                    ErrorCode::InvalidConfigValue,
                    format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"),
                )
            })?;
            self.schema.api.timeout_secs = Some(parsed);
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "entity-admin.toml",
        ".entity-admin.toml",
        ".config/entity-admin.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {path}"))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {path}"))
}
