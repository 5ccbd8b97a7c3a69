//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL all resource paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds; absent means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Persistent UI state settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StateConfig {
    /// Where the key-value state file lives (defaults to the user config dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StateConfig {
    /// Resolve the state file path, falling back to `<config_dir>/entity-admin/state.json`
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("entity-admin")
                .join("state.json")
        })
    }
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format (text, json)
    #[serde(default = "default_format")]
    pub format: String,

    /// Ask before deleting records
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            confirm_delete: true,
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}
