//! Error types for the session and history engine.

use thiserror::Error;

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, CaromError>;

#[derive(Error, Debug)]
pub enum CaromError {
    /// Ending a session with no turns. Nothing was changed.
    #[error("Session has no turns to archive")]
    NoOp,

    /// Requested archive index does not exist.
    #[error("Archived session {index} not found ({len} archived)")]
    NotFound { index: usize, len: usize },

    /// A stored record does not have its expected shape.
    #[error("Malformed record under '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    /// A reason was attached with no freshly committed turn awaiting one.
    #[error("No turn is waiting for a reason")]
    NoPendingReason,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaromError {
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
