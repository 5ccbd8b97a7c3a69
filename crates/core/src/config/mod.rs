//! Configuration loading and schema definitions

mod loader;
mod schema;

pub use loader::{Config, ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOKEN};
pub use schema::*;
