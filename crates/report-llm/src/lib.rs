//! Completion provider abstraction layer for stock-report
//!
//! This crate provides provider-agnostic types for asking a language model
//! to summarize market data. It includes:
//!
//! - Message types for chat-style requests
//! - Completion request/response types
//! - Provider trait for completion backends
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
