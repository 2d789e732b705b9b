//! Notification sink errors.

use thiserror::Error;

/// Errors from posting, editing, or deleting a message.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),

    #[error("bot token contains characters not allowed in a header")]
    InvalidToken,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("message not found")]
    NotFound,

    #[error("chat api returned http {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed chat api response: {0}")]
    Decode(#[from] serde_json::Error),
}
