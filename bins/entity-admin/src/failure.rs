//! User-facing failure notifications
//!
//! Backend failures are reported as one generic line (`Failed to load
//! locations`); the underlying error is only logged at debug level.
//! Validation failures list the offending fields.

use entity_admin_api_client::ApiError;
use entity_admin_cli::output::Status;
use entity_admin_core::error::exit_codes;
use thiserror::Error;
use tracing::debug;

/// Failure already shown to the user
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Notified {
    pub message: String,
    pub exit_code: i32,
}

/// Show `message` for `err` and turn it into a [`Notified`] error
pub fn notify(message: String, err: ApiError) -> anyhow::Error {
    let exit_code = match &err {
        ApiError::Validation(result) => {
            if let Err(coded) = result.clone().to_result() {
                debug!(error = %coded, "{message}");
            }
            Status::error(&format!("{message}: invalid input"));
            Status::field_errors(
                result
                    .errors()
                    .iter()
                    .map(|e| (e.field.as_str(), e.message.as_str())),
            );
            exit_codes::VALIDATION_ERROR
        }
        _ => {
            debug!(error = %err, "{message}");
            Status::error(&message);
            exit_codes::API_ERROR
        }
    };

    Notified { message, exit_code }.into()
}

/// Report input that could not be read as the expected record shape
pub fn invalid_input(thing: &str, err: &serde_json::Error) -> anyhow::Error {
    let message = format!("Invalid {thing} data: {err}");
    Status::error(&message);
    Notified {
        message,
        exit_code: exit_codes::VALIDATION_ERROR,
    }
    .into()
}
