//! Market-data source abstraction

use crate::{DateWindow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of fetching one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickerResult {
    /// Provider answered successfully; `data` is its JSON untouched
    Data {
        ticker: String,
        data: serde_json::Value,
    },
    /// Provider answered with a non-success status
    Error { ticker: String, error: String },
}

impl TickerResult {
    /// Error result for a non-success HTTP status
    pub fn status_error(ticker: impl Into<String>, status: u16) -> Self {
        Self::Error {
            ticker: ticker.into(),
            error: format!("polygon status {status}"),
        }
    }
}

/// A provider of daily aggregate bars
///
/// Implementations must report non-success HTTP statuses as
/// [`TickerResult::Error`] and reserve `Err` for transport failures.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the aggregate series for one ticker over `window`
    async fn fetch_aggregates(&self, ticker: &str, window: DateWindow) -> Result<TickerResult>;

    /// Provider name (e.g., "polygon")
    fn name(&self) -> &str;
}
