//! Ingest error types.

use thiserror::Error;

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while ingesting raw payloads.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload could not be decoded as a raw event array.
    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),
}
