//! OpenAI provider implementation
//!
//! This module implements the LLMProvider trait for OpenAI's chat completion API.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! # Examples
//!
//! ```no_run
//! use report_llm::{CompletionRequest, Message, LLMProvider};
//! use report_llm::providers::OpenAIProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::new(std::env::var("OPENAI_API_KEY")?)?;
//!
//!     let request = CompletionRequest::builder("gpt-4")
//!         .system("You are a trading guru.")
//!         .add_message(Message::user("AAPL: {...}"))
//!         .max_tokens(500)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text().unwrap_or("No response"));
//!
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, Role,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the OpenAI API (default: "https://api.openai.com/v1")
    /// Can be customized for OpenAI-compatible APIs like Azure OpenAI, local deployments, etc.
    pub api_base: String,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
        }
    }

    /// Set custom API base URL
    ///
    /// Useful for:
    /// - Azure OpenAI: "https://YOUR_RESOURCE.openai.azure.com/openai/deployments/YOUR_DEPLOYMENT"
    /// - Local deployments: "http://localhost:8000/v1"
    /// - Other OpenAI-compatible APIs
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// OpenAI chat completion provider
///
/// Also compatible with OpenAI-compatible APIs through custom configuration.
/// Requests run without a client-side timeout.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    /// Create a new OpenAI provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to OpenAI API at {}", self.config.api_base);

        // System prompt goes into the messages array for OpenAI
        let openai_request = OpenAIRequest {
            model: request.model,
            messages: build_openai_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!("OpenAI API returned HTTP {}", status);
            return Err(LLMError::Status { status, body });
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        Ok(convert_response(openai_response))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// OpenAI-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

// ============================================================================
// OpenAI-specific response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct OpenAIResponse {
    /// Missing and `null` are both treated as "no choices"
    choices: Option<Vec<OpenAIChoice>>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIResponseMessage>,
    /// Legacy completions-style text field
    text: Option<String>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

/// Compatible servers often report only some of the counters
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpenAIUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build OpenAI messages from our generic format, system prompt first
fn build_openai_messages(system: Option<String>, messages: Vec<Message>) -> Vec<OpenAIMessage> {
    system
        .map(Message::system)
        .into_iter()
        .chain(messages)
        .map(|msg| OpenAIMessage {
            role: msg.role.as_str(),
            content: msg.content.unwrap_or_default(),
        })
        .collect()
}

/// Convert the first choice into our response type
///
/// The message content wins over the legacy `text` field; empty strings count
/// as missing. A response with missing or `null` choices yields a message with no content.
fn convert_response(response: OpenAIResponse) -> CompletionResponse {
    let choice = response
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .unwrap_or_default();

    let content = choice
        .message
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .or_else(|| choice.text.filter(|t| !t.is_empty()));

    CompletionResponse {
        message: Message {
            role: Role::Assistant,
            content,
        },
        stop_reason: map_stop_reason(choice.finish_reason.as_deref()),
        usage: response.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        }),
    }
}

/// Map OpenAI stop reason to our format
fn map_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("length") => StopReason::MaxTokens,
        Some("content_filter") => {
            debug!("Content filtered by OpenAI safety systems");
            StopReason::StopSequence
        }
        Some("stop") | None => StopReason::EndTurn,
        Some(other) => {
            debug!("Unknown stop reason: {}", other);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn request() -> CompletionRequest {
        CompletionRequest::builder("gpt-4")
            .system("You are a trading guru.")
            .add_message(Message::user("AAPL: {}"))
            .max_tokens(500)
            .temperature(1.0)
            .build()
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config.api_key, "test-key");
        assert_eq!(provider.config.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_completions_url() {
        let config = OpenAIConfig::new("k").with_api_base("http://localhost:8000/v1/");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_system_message_first() {
        let messages = build_openai_messages(
            Some("You are helpful".to_string()),
            vec![Message::user("data")],
        );

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are helpful");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "data");
    }

    #[test]
    fn test_response_content_fallbacks() {
        let parse = |v: Value| convert_response(serde_json::from_value(v).unwrap());

        let response = parse(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hold AAPL."}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3}
        }));
        assert_eq!(response.text(), Some("Hold AAPL."));
        assert_eq!(response.usage.map(|u| u.total()), Some(13));

        let response = parse(json!({"choices": [{"message": {"content": ""}, "text": "Sell TSLA."}]}));
        assert_eq!(response.text(), Some("Sell TSLA."));

        let response = parse(json!({"choices": []}));
        assert_eq!(response.text(), None);

        let response = parse(json!({"id": "chatcmpl-1"}));
        assert_eq!(response.text(), None);
        assert_eq!(response.stop_reason, StopReason::EndTurn);

        let response = parse(json!({"choices": null}));
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_partial_usage_is_accepted() {
        let parse = |v: Value| convert_response(serde_json::from_value(v).unwrap());

        // Some compatible servers report only a total
        let response = parse(json!({
            "choices": [{"message": {"content": "Hold AAPL."}}],
            "usage": {"total_tokens": 12}
        }));
        assert_eq!(response.text(), Some("Hold AAPL."));
        assert_eq!(response.usage.map(|u| u.total()), Some(0));

        let response = parse(json!({
            "choices": [{"message": {"content": "Hold AAPL."}, "finish_reason": "length"}],
            "usage": {"completion_tokens": 500}
        }));
        assert_eq!(response.stop_reason, StopReason::MaxTokens);
        assert_eq!(response.usage.map(|u| u.output_tokens), Some(500));
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop_reason(Some("stop")), StopReason::EndTurn);
        assert_eq!(map_stop_reason(Some("length")), StopReason::MaxTokens);
        assert_eq!(map_stop_reason(Some("content_filter")), StopReason::StopSequence);
        assert_eq!(map_stop_reason(Some("unknown")), StopReason::EndTurn);
        assert_eq!(map_stop_reason(None), StopReason::EndTurn);
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        // Echo back what the stub received so the assertions can see it
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let summary = format!(
                    "{}|{}|{}|{}|{}|{}",
                    auth,
                    body["model"].as_str().unwrap_or_default(),
                    body["max_tokens"],
                    body["messages"][0]["role"].as_str().unwrap_or_default(),
                    body["messages"][1]["content"].as_str().unwrap_or_default(),
                    body["messages"].as_array().map_or(0, Vec::len),
                );
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": summary}, "finish_reason": "stop"}]
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let provider =
            OpenAIProvider::with_config(OpenAIConfig::new("sk-test").with_api_base(base)).unwrap();
        let response = provider.complete(request()).await.unwrap();

        assert_eq!(
            response.text(),
            Some("Bearer sk-test|gpt-4|500|system|AAPL: {}|2")
        );
    }

    #[tokio::test]
    async fn test_complete_passes_error_body_through() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    r#"{"error":{"message":"Incorrect API key provided"}}"#,
                )
            }),
        );
        let base = spawn_stub(router).await;

        let provider =
            OpenAIProvider::with_config(OpenAIConfig::new("bad").with_api_base(base)).unwrap();
        let err = provider.complete(request()).await.unwrap_err();

        match err {
            LLMError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"error":{"message":"Incorrect API key provided"}}"#);
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_non_json_success() {
        let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let base = spawn_stub(router).await;

        let provider =
            OpenAIProvider::with_config(OpenAIConfig::new("k").with_api_base(base)).unwrap();
        let err = provider.complete(request()).await.unwrap_err();

        assert!(matches!(err, LLMError::UnexpectedResponse(_)));
    }
}
