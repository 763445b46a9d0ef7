//! Error types for the report client

use thiserror::Error;

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input could not be parsed as a command
    #[error("Command error: {0}")]
    CommandError(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
