//! Feedly client error types.

use thiserror::Error;

/// Errors from the upstream Feedly API.
#[derive(Debug, Error)]
pub enum FeedlyError {
    /// The upstream API returned a non-success status.
    ///
    /// Display is exactly the response body text so callers can surface the
    /// upstream message unmodified.
    #[error("{body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never produced a response (connect failure, timeout,
    /// malformed response body).
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl FeedlyError {
    /// The upstream HTTP status, if the request got that far.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
        }
    }
}
