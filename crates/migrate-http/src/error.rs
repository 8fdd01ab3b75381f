//! HTTP client error types.

use cart_migrate_core::TransportError;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A pagination link points away from the store.
    #[error("Refusing to follow page link outside the store: {0}")]
    ForeignPageUrl(String),

    /// Local file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl FetchError {
    /// Wrap as a source-side transport error.
    pub fn into_fetch(self) -> TransportError {
        TransportError::Fetch(self.to_string())
    }

    /// Wrap as a target-side transport error.
    pub fn into_submit(self) -> TransportError {
        TransportError::Submit(self.to_string())
    }
}
