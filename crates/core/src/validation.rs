//! Client-side record checks
//!
//! Forms run these rules before a record is sent to the backend. Every
//! failing field is reported, not just the first.
//!
//! # Example
//!
//! ```rust
//! use entity_admin_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Maputo")
//!     .email("email", "admin@example.org")
//!     .date("expirydate", "2030-12-31")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted for date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time formats accepted for time-of-day fields
pub const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex")
});

/// One failed (or warned) field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Wire name of the field
    pub field: String,
    /// Message shown next to the field
    pub message: String,
    /// Rule that fired (`REQUIRED`, `EMAIL`, ...)
    pub code: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a [`Validator`] run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no rule failed; warnings do not count
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Names of the fields with errors, in report order
    #[must_use]
    pub fn failed_fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// `Ok` when valid, otherwise a `ValidationError` listing every failure
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let failures: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(Error::new(
            ErrorCode::ValidationError,
            format!("Validation failed: {}", failures.join("; ")),
        ))
    }
}

/// Fluent validator builder
///
/// Format rules (`email`, `date`, `time`) accept an empty value so that a
/// blank field is only reported once, by `required`.
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.result.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
            code: code.to_string(),
        });
    }

    fn check(mut self, field: &str, ok: bool, code: &str, message: impl Into<String>) -> Self {
        if !ok {
            self.fail(field, code, message);
        }
        self
    }

    /// Field must contain something other than whitespace
    #[must_use]
    pub fn required(self, field: &str, value: &str) -> Self {
        self.check(field, !value.trim().is_empty(), "REQUIRED", "Field is required")
    }

    /// At most `max` characters
    #[must_use]
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        self.check(
            field,
            len <= max,
            "MAX_LENGTH",
            format!("Must be at most {max} characters (got {len})"),
        )
    }

    #[must_use]
    pub fn email(self, field: &str, value: &str) -> Self {
        let ok = value.is_empty() || EMAIL_RE.is_match(value);
        self.check(field, ok, "EMAIL", format!("Invalid email address: {value}"))
    }

    #[must_use]
    pub fn optional_email(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.email(field, v),
            None => self,
        }
    }

    /// `YYYY-MM-DD` calendar date
    #[must_use]
    pub fn date(self, field: &str, value: &str) -> Self {
        let ok = value.is_empty() || NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok();
        self.check(field, ok, "DATE", format!("Invalid date {value:?}, expected YYYY-MM-DD"))
    }

    #[must_use]
    pub fn optional_date(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.date(field, v),
            None => self,
        }
    }

    /// `HH:MM` or `HH:MM:SS` time of day
    #[must_use]
    pub fn time(self, field: &str, value: &str) -> Self {
        let ok = value.is_empty()
            || TIME_FORMATS
                .iter()
                .any(|fmt| NaiveTime::parse_from_str(value, fmt).is_ok());
        self.check(field, ok, "TIME", format!("Invalid time {value:?}, expected HH:MM"))
    }

    #[must_use]
    pub fn optional_time(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.time(field, v),
            None => self,
        }
    }

    /// Value must be one of `allowed`, compared exactly
    #[must_use]
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        self.check(
            field,
            allowed.contains(&value),
            "ONE_OF",
            format!("Must be one of: {}", allowed.join(", ")),
        )
    }

    /// Identifier must be greater than zero
    #[must_use]
    pub fn positive(self, field: &str, value: i64) -> Self {
        self.check(field, value > 0, "POSITIVE", "Must be a positive identifier")
    }

    /// Run an ad-hoc rule; `Some(message)` is a failure
    #[must_use]
    pub fn custom<F>(mut self, field: &str, rule: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = rule() {
            self.fail(field, "CUSTOM", message);
        }
        self
    }

    /// Record a non-blocking warning
    #[must_use]
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.warnings.push(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
            });
        }
        self
    }

    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
