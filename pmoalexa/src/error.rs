//! Error types for the skill backend

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Inbound event could not be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Body is not JSON or misses the `request` envelope
    #[error("Malformed skill event: {0}")]
    MalformedEvent(String),
}

impl EventError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedEvent(err.to_string())
    }
}

/// Failures of the `/proxy` stream relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// No `url` query parameter
    #[error("Missing 'url' parameter")]
    MissingParameter,

    /// Upstream unreachable or answering with a non-success status
    #[error("Upstream relay failure: {0}")]
    UpstreamRelayFailure(String),

    /// The public base URL cannot carry a relay path
    #[error("Invalid relay base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl RelayError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamRelayFailure(msg.into())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamRelayFailure(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingParameter => StatusCode::BAD_REQUEST,
            Self::UpstreamRelayFailure(_) | Self::InvalidBaseUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
