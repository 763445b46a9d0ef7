//! Polygon.io aggregates client

use crate::error::{MarketError, Result};
use crate::{DateWindow, MarketDataSource, TickerResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Configuration for the Polygon client
#[derive(Debug, Clone)]
pub struct PolygonConfig {
    /// API key sent as the `apiKey` query parameter (empty if not configured)
    pub api_key: String,

    /// Base URL (default: "https://api.polygon.io")
    pub base_url: String,
}

impl PolygonConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Daily bars URL for `ticker` over `window`
    fn aggregates_url(&self, ticker: &str, window: DateWindow) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}",
            self.base_url.trim_end_matches('/'),
            ticker,
            window.start_param(),
            window.end_param()
        )
    }
}

/// Polygon.io API client
///
/// No rate limiting, retry or timeout override is applied; every call is a
/// single plain GET.
#[derive(Debug, Clone)]
pub struct PolygonClient {
    client: Client,
    config: PolygonConfig,
}

impl PolygonClient {
    /// Create a new client with a fresh HTTP connection pool
    pub fn new(config: PolygonConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| MarketError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MarketDataSource for PolygonClient {
    #[instrument(skip(self, window), fields(window = %window))]
    async fn fetch_aggregates(&self, ticker: &str, window: DateWindow) -> Result<TickerResult> {
        let url = self.config.aggregates_url(ticker, window);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Polygon returned HTTP {} for {}", status, ticker);
            return Ok(TickerResult::status_error(ticker, status.as_u16()));
        }

        let data: serde_json::Value = response.json().await?;
        debug!("Fetched aggregates for {}", ticker);

        Ok(TickerResult::Data {
            ticker: ticker.to_string(),
            data,
        })
    }

    fn name(&self) -> &'static str {
        "polygon"
    }
}
