//! Status query errors.

use thiserror::Error;

/// Why a status query produced no snapshot.
///
/// Never reaches the diff engine; the source maps it to `Unreachable`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("status api returned http {0}")]
    Status(u16),

    #[error("malformed status response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FetchError::Transport(e.without_url())
    }
}
