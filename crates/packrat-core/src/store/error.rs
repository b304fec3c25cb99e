//! Error types for store operations

use thiserror::Error;

/// Errors surfaced by [`InventoryStore`](super::InventoryStore) backends.
///
/// The repository converts all of these into non-fatal degraded states; no
/// store error is fatal to the session.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Transport-level failure reaching the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend responded but the payload could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend processed the write and reported a non-success status.
    #[error("write rejected by store: {0}")]
    Rejected(String),

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// The operation exceeded the backend's fixed timeout.
    #[error("store operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The backend is missing required configuration (e.g. a write URL).
    #[error("store not configured: {0}")]
    NotConfigured(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
