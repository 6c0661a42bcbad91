//! Error type shared by the request handlers and the AWS collaborators.
use thiserror::Error;

/// Anything that can fail a ticket request.
///
/// Every variant collapses to the same 500 envelope at the top of the
/// request; the variants only exist so logs and tests can tell them apart.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Request body is required for {0} requests")]
    MissingBody(String),

    #[error("Could not parse request body as UTF-8")]
    InvalidUtf8,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid image payload: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    #[error("DynamoDB Error: {0}")]
    RecordStore(String),

    #[error("S3 Error: {0}")]
    ObjectStore(String),

    #[error("SNS Error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
