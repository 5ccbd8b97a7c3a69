//! Per-invocation settings and the backend client

use clap::ValueEnum;
use entity_admin_api_client::fixtures;
use entity_admin_api_client::{AdminClient, ClientConfig};
use entity_admin_core::config::Config;
use entity_admin_core::state::{AppState, FileStore};
use entity_admin_core::{Error, ErrorCode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables and status lines
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Flags shared by every subcommand
pub struct GlobalArgs {
    pub format: Option<OutputFormat>,
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub offline: bool,
}

pub struct Context {
    pub client: AdminClient,
    pub format: OutputFormat,
    pub confirm_delete: bool,
    state_path: PathBuf,
}

impl Context {
    /// Load configuration, apply environment and flag overrides, and connect
    pub fn build(args: &GlobalArgs) -> anyhow::Result<Self> {
        let mut config = Config::load(args.config.as_deref())?;
        config.apply_env_overrides()?;
        if let Some(url) = &args.base_url {
            config.schema.api.base_url.clone_from(url);
        }

        let format = match args.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.schema.output.format, true).map_err(|_| {
                Error::new(
                    ErrorCode::InvalidConfigValue,
                    format!("output.format must be text or json, got {:?}", config.schema.output.format),
                )
            })?,
        };

        let client = if args.offline {
            debug!("Using in-memory demo backend");
            AdminClient::with_transport(Arc::new(fixtures::demo_backend()?))
        } else {
            let client_config = ClientConfig::from(&config.schema.api);
            debug!(base_url = %client_config.base_url, "Using HTTP backend");
            AdminClient::with_config(client_config)?
        };

        Ok(Self {
            client,
            format,
            confirm_delete: config.schema.output.confirm_delete,
            state_path: config.schema.state.resolved_path(),
        })
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Console state persisted next to the user's configuration
    pub fn state(&self) -> AppState<FileStore> {
        AppState::load(FileStore::new(&self.state_path))
    }
}
