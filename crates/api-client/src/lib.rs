//! Typed REST client for the entity admin backend
//!
//! One generic [`ApiService`] covers every collection the backend exposes;
//! a binding table in [`resources`] ties each path to its record types.
//!
//! # Features
//!
//! - **Typed records**: full, create and patch shapes for each of the eight record types
//! - **Client-side validation**: checked before anything is sent
//! - **Pluggable transport**: HTTP via `reqwest`, or an in-memory backend
//! - **Request correlation**: every HTTP call carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust
//! use entity_admin_api_client::prelude::*;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let client = AdminClient::with_transport(Arc::new(MemoryTransport::new()));
//!
//! let created = client
//!     .locations()
//!     .create_validated(&NewLocation::new("Nampula"))
//!     .await?;
//! assert_eq!(created.id, 1);
//!
//! let all = client.locations().get_all().await?;
//! assert_eq!(all, vec![created]);
//! # Ok::<(), ApiError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod lookup;
pub mod models;
pub mod resources;
pub mod service;
pub mod transport;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use models::RecordId;
pub use resources::{Resource, ResourceKind, ResourceVisitor};
pub use service::ApiService;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::AdminClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::lookup::{BranchDirectory, Lookup};
    pub use crate::models::*;
    pub use crate::resources::{Resource, ResourceKind, ResourceVisitor};
    pub use crate::service::ApiService;
    pub use crate::transport::{HttpTransport, MemoryTransport, Transport};
}
