//! Error types for market-data operations

use thiserror::Error;

/// Errors that abort a market-data fetch
///
/// A non-success HTTP status is *not* an error here; it is reported through
/// [`TickerResult::Error`](crate::TickerResult::Error).
#[derive(Debug, Error)]
pub enum MarketError {
    /// Network, URL or body decoding failure
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for market-data operations
pub type Result<T> = std::result::Result<T, MarketError>;
