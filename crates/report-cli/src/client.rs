//! Report request orchestration
//!
//! Sends the collected tickers to the backend once and turns whatever comes
//! back into the text the user sees. Nothing is retried.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/report";

pub const SENDING_MESSAGE: &str = "Sending tickers to server...";
pub const CREATING_MESSAGE: &str = "Creating report...";
pub const NO_REPORT_MESSAGE: &str = "No report returned from server";
pub const UNREACHABLE_MESSAGE: &str = "There was an error contacting the server.";

/// What the user ends up looking at after a report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Report text (or the no-report placeholder)
    Report(String),
    /// Server answered with a non-success status
    ServerError(String),
    /// Request never produced a readable answer
    Unreachable,
}

impl ReportOutcome {
    /// Text displayed for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::Report(text) => text.clone(),
            Self::ServerError(detail) => format!("Server error: {detail}"),
            Self::Unreachable => UNREACHABLE_MESSAGE.to_string(),
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

#[derive(Debug, Serialize)]
struct ReportBody<'a> {
    tickers: &'a [String],
}

/// HTTP client for the report endpoint
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: Client,
    endpoint: String,
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the full ticker list and interpret the answer
    pub async fn request_report(&self, tickers: &[String]) -> ReportOutcome {
        debug!("Requesting report for {} tickers from {}", tickers.len(), self.endpoint);

        match self.send(tickers).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("error: {}", e);
                ReportOutcome::Unreachable
            }
        }
    }

    async fn send(&self, tickers: &[String]) -> reqwest::Result<ReportOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ReportBody { tickers })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let detail = if text.is_empty() {
                status.as_u16().to_string()
            } else {
                text
            };
            return Ok(ReportOutcome::ServerError(detail));
        }

        let json: Value = response.json().await?;
        let report = json
            .get("report")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .unwrap_or(NO_REPORT_MESSAGE);

        Ok(ReportOutcome::Report(report.to_string()))
    }
}

impl Default for ReportClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
