//! HTTP interface
//!
//! `POST /report` with `{"tickers": [...]}` answers `{"report": "..."}` or an
//! error body (see [`ReportError`](crate::ReportError)).

use crate::error::{ReportError, Result};
use crate::report::ReportService;
use crate::request::{ReportRequest, ReportResponse, is_json_content_type};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

/// Build the application router
pub fn router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/report", post(create_report))
        .with_state(AppState { service })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn create_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReportResponse>> {
    // Bodies that are not declared as JSON are treated as carrying no tickers
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if !is_json_content_type(content_type) {
        return Err(ReportError::InvalidRequest);
    }

    let request = ReportRequest::from_json(&body)?;
    let report = state.service.generate(&request.tickers).await?;
    Ok(Json(ReportResponse { report }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use mockall::mock;
    use report_llm::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Role, StopReason};
    use report_market::{DateWindow, MarketDataSource, MarketError, TickerResult};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    mock! {
        pub Market {}

        #[async_trait]
        impl MarketDataSource for Market {
            async fn fetch_aggregates(
                &self,
                ticker: &str,
                window: DateWindow,
            ) -> report_market::Result<TickerResult>;
            fn name(&self) -> &str;
        }
    }

    mock! {
        pub Summarizer {}

        #[async_trait]
        impl LLMProvider for Summarizer {
            async fn complete(&self, request: CompletionRequest) -> report_llm::Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    fn healthy_market() -> MockMarket {
        let mut market = MockMarket::new();
        market.expect_name().return_const("polygon".to_string());
        market.expect_fetch_aggregates().returning(|ticker, _| {
            Ok(TickerResult::Data {
                ticker: ticker.to_string(),
                data: json!({"results": []}),
            })
        });
        market
    }

    fn silent_market() -> MockMarket {
        let mut market = MockMarket::new();
        market.expect_fetch_aggregates().never();
        market
    }

    fn summarizer_returning(
        result: fn() -> report_llm::Result<CompletionResponse>,
    ) -> Arc<dyn LLMProvider> {
        let mut summarizer = MockSummarizer::new();
        summarizer.expect_complete().returning(move |_| result());
        Arc::new(summarizer)
    }

    fn app(market: MockMarket, summarizer: Option<Arc<dyn LLMProvider>>, mock: bool) -> Router {
        router(Arc::new(ReportService::new(Arc::new(market), summarizer, mock)))
    }

    async fn post_report(app: Router, body: &str) -> (StatusCode, String) {
        post_report_as(app, Some("application/json"), body).await
    }

    async fn post_report_as(
        app: Router,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, String) {
        let mut request = Request::builder().method("POST").uri("/report");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body.to_string())).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_mock_report_end_to_end() {
        let (status, body) = post_report(
            app(silent_market(), None, true),
            r#"{"tickers":["AAPL","TSLA"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        let report = json["report"].as_str().unwrap();
        assert!(report.contains(
            "AAPL: mock summary — performance looks neutral (dev mode)\n\n\
             TSLA: mock summary — performance looks neutral (dev mode)\n\n\
             (This is synthetic data)"
        ));
    }

    #[tokio::test]
    async fn test_missing_or_empty_tickers() {
        for body in [r#"{}"#, r#"{"tickers":[]}"#, r#"{"tickers":"AAPL"}"#, "{broken"] {
            let (status, response) = post_report(app(silent_market(), None, false), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, r#"{"error":"tickers array required"}"#);
        }
    }

    #[tokio::test]
    async fn test_non_json_content_type_rejected() {
        for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
            let (status, response) = post_report_as(
                app(silent_market(), None, true),
                content_type,
                r#"{"tickers":["AAPL"]}"#,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "content type {content_type:?}");
            assert_eq!(response, r#"{"error":"tickers array required"}"#);
        }

        let (status, _) = post_report_as(
            app(silent_market(), None, true),
            Some("application/json; charset=utf-8"),
            r#"{"tickers":["AAPL"]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preview_when_summarizer_missing() {
        let (status, body) =
            post_report(app(healthy_market(), None, false), r#"{"tickers":["AAPL"]}"#).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json["report"],
            "OpenAI not configured on server. Data preview:\n\nAAPL: {\"results\":[]}"
        );
    }

    #[tokio::test]
    async fn test_summary_body_is_exact() {
        let summarizer = summarizer_returning(|| {
            Ok(CompletionResponse {
                message: Message {
                    role: Role::Assistant,
                    content: Some("Hold AAPL.".to_string()),
                },
                stop_reason: StopReason::EndTurn,
                usage: None,
            })
        });

        let (status, body) = post_report(
            app(healthy_market(), Some(summarizer), false),
            r#"{"tickers":["AAPL"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"report":"Hold AAPL."}"#);
    }

    #[tokio::test]
    async fn test_summarizer_failure_is_bad_gateway() {
        let summarizer = summarizer_returning(|| {
            Err(LLMError::Status {
                status: 401,
                body: r#"{"error":"invalid key"}"#.to_string(),
            })
        });

        let (status, body) = post_report(
            app(healthy_market(), Some(summarizer), false),
            r#"{"tickers":["AAPL"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "OpenAI error");
        assert_eq!(json["detail"], r#"{"error":"invalid key"}"#);
    }

    #[tokio::test]
    async fn test_transport_failure_is_opaque_server_error() {
        let mut market = MockMarket::new();
        market.expect_name().return_const("polygon".to_string());
        market
            .expect_fetch_aggregates()
            .returning(|_, _| Err(MarketError::ConfigError("dns failure".to_string())));

        let (status, body) =
            post_report(app(market, None, false), r#"{"tickers":["AAPL","TSLA"]}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"server error"}"#);
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/report")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app(silent_market(), None, true)
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
