//! Error types for report generation
//!
//! Every failure maps to one HTTP status: bad input is a 400, a rejected
//! summarization call is a 502 carrying the upstream body, and anything
//! else is an opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use report_llm::LLMError;
use report_market::MarketError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message returned for malformed report requests
pub const INVALID_REQUEST_MESSAGE: &str = "tickers array required";

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Request body lacks a non-empty `tickers` array
    #[error("tickers array required")]
    InvalidRequest,

    /// Completion API answered with a non-success status
    #[error("OpenAI error: {0}")]
    Summarization(String),

    /// Market-data transport failure for any ticker
    #[error("Market data error: {0}")]
    Market(#[from] MarketError),

    /// Completion transport or decoding failure
    #[error("Completion error: {0}")]
    Completion(LLMError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl From<LLMError> for ReportError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Status { body, .. } => ReportError::Summarization(body),
            other => ReportError::Completion(other),
        }
    }
}

impl ReportError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Summarization(_) => StatusCode::BAD_GATEWAY,
            Self::Market(_) | Self::Completion(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error payload sent to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidRequest => ErrorBody {
                error: INVALID_REQUEST_MESSAGE.to_string(),
                detail: None,
            },
            Self::Summarization(detail) => ErrorBody {
                error: "OpenAI error".to_string(),
                detail: Some(detail),
            },
            other => {
                error!("{}", other);
                ErrorBody {
                    error: "server error".to_string(),
                    detail: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
