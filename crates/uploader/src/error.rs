//! Upload error types.

use std::time::Duration;

use vidpush_transfer::TransferError;

use crate::auth::AuthError;

/// Errors produced while negotiating or uploading.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("session negotiation failed: {0}")]
    Negotiation(String),

    #[error("short read at offset {offset}: expected {expected} bytes, got {actual}")]
    ShortRead {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    #[error("unexpected chunk upload status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("server still expects data after all {total} bytes were sent")]
    RangeExhausted { total: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transfer error: {0}")]
    Transfer(TransferError),

    #[error("chunk upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("upload session already used")]
    SessionSpent,

    #[error("background task failed: {0}")]
    Task(String),

    #[error("cancelled")]
    Cancelled,
}

impl From<TransferError> for UploadError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::ShortRead {
                offset,
                expected,
                actual,
            } => UploadError::ShortRead {
                offset,
                expected,
                actual,
            },
            TransferError::Io(e) => UploadError::Io(e),
            other => UploadError::Transfer(other),
        }
    }
}
