//! Core utilities for the entity admin console
//!
//! This crate provides functionality shared by the API client and the CLI:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Validation**: Fluent field validation used by record forms
//! - **Configuration**: TOML-based configuration with environment overrides
//! - **Sections**: The catalog of create/manage screens
//! - **State**: The persisted active section over a pluggable key-value store
//!
//! # Example
//!
//! ```rust
//! use entity_admin_core::state::{AppState, MemoryStore};
//!
//! let mut state = AppState::load(MemoryStore::new());
//! assert_eq!(state.active_section().id, "locations-create");
//!
//! state.set_active_section("users-manage").unwrap();
//! assert_eq!(state.active_section().label, "Manage Users");
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod sections;
pub mod state;
pub mod validation;

pub use error::{Category, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Category, Error, ErrorCode, Result, ResultExt};
    pub use crate::sections::{Section, SectionAction, SECTIONS};
    pub use crate::state::{AppState, FileStore, KeyValueStore, MemoryStore};
    pub use crate::validation::{ValidationResult, Validator};
}
