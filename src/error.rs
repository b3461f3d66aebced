use thiserror::Error;

use crate::domain::FieldError;

/// Errors raised while talking to the patient backend.
///
/// The roster treats every variant the same way: log and carry on.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Patient not found: {0}")]
    NotFound(i64),
}

/// Errors returned by [`crate::clients::RosterClient`] calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RosterError {
    #[error("Backend call failed: {0}")]
    Gateway(String),
    #[error("Form is incomplete: {}", format_field_errors(.0))]
    InvalidForm(Vec<FieldError>),
    #[error("Editor is not open")]
    EditorClosed,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<GatewayError> for RosterError {
    fn from(error: GatewayError) -> Self {
        RosterError::Gateway(error.to_string())
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
