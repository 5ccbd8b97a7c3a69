//! Coded errors
//!
//! Every failure surfaced by the core crate carries an [`ErrorCode`], and
//! optionally what was being attempted and how to recover. The binary maps
//! the code's category onto its process exit code.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes, grouped by thousands into categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Internal = 1001,

    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    InvalidConfigValue = 3003,

    ValidationError = 4000,
    InvalidFormat = 4002,

    StateCorrupted = 5001,
    UnknownSection = 5002,
}

/// Broad kind of an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    Io,
    Configuration,
    Validation,
    State,
}

impl ErrorCode {
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Internal => Category::General,
            Self::IoError | Self::FileNotFound | Self::PermissionDenied => Category::Io,
            Self::ConfigNotFound | Self::ConfigParseError | Self::InvalidConfigValue => {
                Category::Configuration
            }
            Self::ValidationError | Self::InvalidFormat => Category::Validation,
            Self::StateCorrupted | Self::UnknownSection => Category::State,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Core error
#[derive(Error, Debug)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// What was being attempted
    pub context: Option<String>,
    /// How the user can recover
    pub suggestion: Option<String>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  while: {context}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// An explicitly requested config file does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create an entity-admin.toml file or use --config to specify a path")
    }

    pub fn unknown_section(id: &str) -> Self {
        Self::new(ErrorCode::UnknownSection, format!("Unknown section: {id}"))
            .with_suggestion("Run `entity-admin sections` to list the available sections")
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes used by the binary
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const API_ERROR: i32 = 4;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("Invalid JSON: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("Invalid TOML: {err}")).with_source(err)
    }
}

/// Attach context to a core `Result`
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
