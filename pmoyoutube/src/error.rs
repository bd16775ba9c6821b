//! Error types for the YouTube clients

/// Result type alias for YouTube operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the search client and the extraction backends
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error (spawning yt-dlp, reading its output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// API returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// The extraction tool exited with a failure
    #[error("Extraction tool failed: {0}")]
    Process(String),

    /// The upstream refused to serve the video (region block, removed, login...)
    #[error("Video not playable: {0}")]
    NotPlayable(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }
}
