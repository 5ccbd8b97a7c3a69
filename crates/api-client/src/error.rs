//! Error types for the API client

use entity_admin_core::validation::ValidationResult;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Core(#[from] entity_admin_core::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Backend could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Record failed client-side validation; nothing was sent
    #[error("Validation failed: {}", .0.failed_fields().join(", "))]
    Validation(ValidationResult),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Name that matches no resource binding
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when the backend answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the record does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Check if the failure happened before reaching the backend
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Unavailable(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_admin_core::validation::Validator;

    #[test]
    fn test_status_classification() {
        let err = ApiError::api_response(404, "Not Found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ApiError::api_response(503, "down");
        assert!(err.is_server_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unavailable_is_transport() {
        let err = ApiError::Unavailable("offline".into());
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let result = Validator::new()
            .required("name", "")
            .required("code", "")
            .validate();
        let err = ApiError::Validation(result);
        assert_eq!(err.to_string(), "Validation failed: name, code");
    }
}
