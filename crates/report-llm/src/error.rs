//! Error types for completion operations

use thiserror::Error;

/// Result type for completion operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during completion operations
#[derive(Error, Debug)]
pub enum LLMError {
    /// The service answered with a non-success HTTP status
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, passed through untouched
        body: String,
    },

    /// HTTP transport error
    #[cfg(feature = "reqwest")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}
