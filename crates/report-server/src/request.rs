//! Report request and response payloads

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validated report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub tickers: Vec<String>,
}

impl ReportRequest {
    /// Parse a raw request body
    ///
    /// The body must be a JSON object with a non-empty `tickers` array;
    /// anything else (including a body that is not JSON at all) is rejected
    /// with [`ReportError::InvalidRequest`]. Elements are not validated:
    /// strings are taken as-is, other values by their JSON text.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ReportError::InvalidRequest)?;

        match value.get("tickers") {
            Some(Value::Array(items)) if !items.is_empty() => Ok(Self {
                tickers: items.iter().map(ticker_text).collect(),
            }),
            _ => Err(ReportError::InvalidRequest),
        }
    }
}

/// Whether a `Content-Type` header value announces a JSON body
///
/// Only `application/json` is accepted, with any parameters (such as
/// `charset`). Bodies sent under any other type, or none, are not parsed.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn ticker_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Successful report payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
}
