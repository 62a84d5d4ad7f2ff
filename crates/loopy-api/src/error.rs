//! Error types for API operations.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors reported by the API client.
///
/// Exactly one of these reaches [`crate::ApiDelegate::did_fail`] when a
/// request does not complete successfully.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("API request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Another request is still in flight on this client.
    #[error("A request is already in flight on this client")]
    RequestInFlight,

    /// The payload is not a JSON object.
    #[error("Invalid request payload: {message}")]
    InvalidPayload {
        /// Description of what was invalid
        message: String,
    },

    /// The URL prefix uses a scheme other than http or https.
    #[error("Unsupported URL scheme '{scheme}'")]
    UnsupportedScheme {
        /// The rejected scheme
        scheme: String,
    },

    /// `open` was called outside of a tokio runtime.
    #[error("No async runtime available to run the request")]
    NoRuntime,

    /// The request task ended without producing a result.
    #[error("Request aborted before completion")]
    Aborted,

    /// Network or HTTP client error (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
