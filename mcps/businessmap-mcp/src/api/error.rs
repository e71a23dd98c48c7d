//! Error types for Businessmap API calls

use thiserror::Error;

/// Errors raised by a [`RestTransport`](super::RestTransport)
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("HTTP error {status}: {message}")]
    Status {
        status: u16,
        /// Upstream message, or the canonical reason phrase when the body
        /// carries none
        message: String,
    },

    /// The response body was not valid JSON
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API key cannot be sent as a header value
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
