//! Report orchestration
//!
//! A report request runs one linear pipeline:
//!
//! ```text
//! validate -> mock?  -> synthetic report
//!          -> fetch every ticker concurrently -> join
//!             -> no completion provider -> data preview
//!             -> summarize -> model text
//! ```
//!
//! A non-success status from the market-data provider only marks that
//! ticker's segment as an error. A transport failure for any ticker aborts
//! the whole report.

use crate::config::ServerConfig;
use crate::error::{ReportError, Result};
use crate::prompts::{SUMMARY_MAX_TOKENS, SUMMARY_MODEL, SUMMARY_TEMPERATURE, SYSTEM_PROMPT};
use futures::future::try_join_all;
use report_llm::providers::{OpenAIConfig, OpenAIProvider};
use report_llm::{CompletionRequest, LLMProvider, Message, StopReason};
use report_market::{DateWindow, MarketDataSource, PolygonClient, PolygonConfig, TickerResult};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Characters of joined market data shown when summarization is unavailable
pub const PREVIEW_CHARS: usize = 2000;

const PREVIEW_PREFIX: &str = "OpenAI not configured on server. Data preview:\n\n";
const NO_RESPONSE: &str = "No response";
const SEGMENT_SEPARATOR: &str = "\n\n";

/// Builds reports from market data and an optional completion provider
pub struct ReportService {
    market: Arc<dyn MarketDataSource>,
    summarizer: Option<Arc<dyn LLMProvider>>,
    mock: bool,
}

impl ReportService {
    pub fn new(
        market: Arc<dyn MarketDataSource>,
        summarizer: Option<Arc<dyn LLMProvider>>,
        mock: bool,
    ) -> Self {
        Self {
            market,
            summarizer,
            mock,
        }
    }

    /// Wire up the Polygon client and, when a key is configured, the OpenAI provider
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let mut polygon_config =
            PolygonConfig::new(config.polygon_api_key.clone().unwrap_or_default());
        if let Some(base) = &config.polygon_api_base {
            polygon_config = polygon_config.with_base_url(base);
        }
        let market = PolygonClient::new(polygon_config)?;

        let summarizer: Option<Arc<dyn LLMProvider>> = match &config.openai_api_key {
            Some(key) => {
                let mut openai_config = OpenAIConfig::new(key);
                if let Some(base) = &config.openai_api_base {
                    openai_config = openai_config.with_api_base(base);
                }
                Some(Arc::new(OpenAIProvider::with_config(openai_config)?))
            }
            None => None,
        };

        Ok(Self::new(Arc::new(market), summarizer, config.mock))
    }

    pub fn is_mock(&self) -> bool {
        self.mock
    }

    /// Produce the report text for `tickers`
    #[instrument(skip(self, tickers), fields(tickers = tickers.len(), mock = self.mock))]
    pub async fn generate(&self, tickers: &[String]) -> Result<String> {
        if tickers.is_empty() {
            return Err(ReportError::InvalidRequest);
        }

        if self.mock {
            return Ok(mock_report(tickers));
        }

        let results = self.fetch_all(tickers, DateWindow::current()).await?;
        let combined = join_results(&results);

        match &self.summarizer {
            Some(summarizer) => summarize(summarizer.as_ref(), combined).await,
            None => {
                debug!("No completion provider configured, returning data preview");
                Ok(preview_report(&combined))
            }
        }
    }

    /// Fetch every ticker concurrently; results keep the input order
    async fn fetch_all(&self, tickers: &[String], window: DateWindow) -> Result<Vec<TickerResult>> {
        info!(
            "Fetching {} tickers from {} for {}",
            tickers.len(),
            self.market.name(),
            window
        );

        let fetches = tickers
            .iter()
            .map(|ticker| self.market.fetch_aggregates(ticker, window));

        Ok(try_join_all(fetches).await?)
    }
}

async fn summarize(summarizer: &dyn LLMProvider, combined: String) -> Result<String> {
    let request = CompletionRequest::builder(SUMMARY_MODEL)
        .system(SYSTEM_PROMPT)
        .add_message(Message::user(combined))
        .max_tokens(SUMMARY_MAX_TOKENS)
        .temperature(SUMMARY_TEMPERATURE)
        .build();

    let response = summarizer.complete(request).await?;

    if let Some(usage) = response.usage {
        debug!(
            "Summary used {} tokens ({} prompt, {} completion)",
            usage.total(),
            usage.input_tokens,
            usage.output_tokens
        );
    }
    if response.stop_reason == StopReason::MaxTokens {
        warn!("Summary hit the {} token limit and may be cut short", SUMMARY_MAX_TOKENS);
    }

    Ok(response.text().unwrap_or(NO_RESPONSE).to_string())
}

/// Synthetic report used when `MOCK=true`
pub fn mock_report(tickers: &[String]) -> String {
    let lines: Vec<String> = tickers
        .iter()
        .map(|t| format!("{t}: mock summary — performance looks neutral (dev mode)"))
        .collect();

    format!(
        "MOCK REPORT (MOCK=true){SEGMENT_SEPARATOR}{}{SEGMENT_SEPARATOR}(This is synthetic data)",
        lines.join(SEGMENT_SEPARATOR)
    )
}

/// Render one ticker's outcome as a text segment
pub fn segment(result: &TickerResult) -> String {
    match result {
        TickerResult::Data { ticker, data } => format!("{ticker}: {data}"),
        TickerResult::Error { ticker, error } => format!("{ticker}: ERROR {error}"),
    }
}

/// Join all segments, in order, into the blob handed to the summarizer
pub fn join_results(results: &[TickerResult]) -> String {
    results
        .iter()
        .map(segment)
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

/// Report used when no completion provider is configured
pub fn preview_report(combined: &str) -> String {
    let preview: String = combined.chars().take(PREVIEW_CHARS).collect();
    format!("{PREVIEW_PREFIX}{preview}")
}
