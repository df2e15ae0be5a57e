//! Error types shared by the Jikan client, the feed validator and the services
//! built on top of them.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single outbound HTTP request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Connection failure without an underlying reqwest error.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl TransportError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}

/// Errors surfaced by a seasonal fetch.
///
/// A fetch either yields the complete list of qualifying records or one of
/// these; it never yields a partial list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid season '{0}'. Must be one of: winter, spring, summer, fall")]
    InvalidArgument(String),

    #[error("Jikan API error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected API response format: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
