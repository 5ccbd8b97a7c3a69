//! Entity admin console
//!
//! Terminal front end for the entity admin backend: list, inspect, create,
//! update and delete records, and keep track of the active console section.

use clap::{Parser, Subcommand};
use entity_admin_api_client::{ApiError, RecordId, ResourceKind};
use entity_admin_core::error::exit_codes;
use entity_admin_core::Category;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod failure;
mod render;

use context::{Context, GlobalArgs, OutputFormat};
use failure::Notified;

/// Administrative console for entities, branches, users and reference data
#[derive(Parser)]
#[command(name = "entity-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Use a built-in demo dataset held in memory; changes are discarded on exit
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the REST resources the console manages
    Resources,

    /// List console sections, marking the active one
    Sections,

    /// Show the active section, or switch to another
    Section {
        /// Section to activate
        id: Option<String>,

        /// Forget the persisted section
        #[arg(long, conflicts_with = "id")]
        reset: bool,
    },

    /// List every record of a resource
    List {
        /// Resource path or name (e.g. `locations`, `branches`)
        kind: ResourceKind,
    },

    /// Show one record
    Get {
        /// Resource path or name
        kind: ResourceKind,
        /// Record id
        id: RecordId,
    },

    /// Validate and create a record
    Create {
        /// Resource path or name
        kind: ResourceKind,
        #[command(flatten)]
        input: Input,
    },

    /// Validate and update the given fields of a record
    Update {
        /// Resource path or name
        kind: ResourceKind,
        /// Record id
        id: RecordId,
        #[command(flatten)]
        input: Input,
    },

    /// Delete a record
    Delete {
        /// Resource path or name
        kind: ResourceKind,
        /// Record id
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Record body, inline or from a file
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct Input {
    /// JSON object
    #[arg(short, long)]
    data: Option<String>,

    /// File containing a JSON object
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Input {
    fn read(&self) -> anyhow::Result<String> {
        match (&self.data, &self.file) {
            (Some(data), _) => Ok(data.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display())),
            (None, None) => anyhow::bail!("Either --data or --file is required"),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        Some(EnvFilter::new("entity_admin=debug"))
    } else {
        EnvFilter::try_from_default_env().ok()
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let globals = GlobalArgs {
        format: cli.format,
        config: cli.config,
        base_url: cli.base_url,
        offline: cli.offline,
    };
    let ctx = Context::build(&globals)?;

    match cli.command {
        Commands::Resources => commands::resources::run(&ctx),
        Commands::Sections => commands::sections::list(&ctx),
        Commands::Section { id, reset } => commands::sections::show_or_set(&ctx, id.as_deref(), reset),
        Commands::List { kind } => commands::records::list(&ctx, kind).await,
        Commands::Get { kind, id } => commands::records::get(&ctx, kind, id).await,
        Commands::Create { kind, input } => {
            let body = input.read()?;
            commands::records::create(&ctx, kind, &body).await
        }
        Commands::Update { kind, id, input } => {
            let body = input.read()?;
            commands::records::update(&ctx, kind, id, &body).await
        }
        Commands::Delete { kind, id, yes } => commands::records::delete(&ctx, kind, id, yes).await,
    }
}

/// Exit code for an error that was not already reported
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(core) = err.downcast_ref::<entity_admin_core::Error>() {
        return match core.code.category() {
            Category::Configuration => exit_codes::CONFIG_ERROR,
            Category::Validation => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::FAILURE,
        };
    }
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Core(_) | ApiError::Config(_) | ApiError::InvalidUrl(_)) => {
            exit_codes::CONFIG_ERROR
        }
        Some(_) => exit_codes::API_ERROR,
        None => exit_codes::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<Notified>() {
                Some(notified) => notified.exit_code,
                None => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    exit_code_for(&e)
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
