//! Error types for the news pipeline

use thiserror::Error;

/// Errors that can occur while fetching or parsing news content
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Upstream returned an error response
    #[error("Upstream error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Failed to parse upstream content
    #[error("Parse error: {0}")]
    ParseError(String),
}
