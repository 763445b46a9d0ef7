//! Completion provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for completion providers
///
/// Implementations of this trait provide access to a chat completion
/// service (e.g., OpenAI or an OpenAI-compatible deployment).
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with messages and sampling parameters
    ///
    /// # Returns
    ///
    /// The completion response with the assistant's message and metadata.
    /// A non-success answer from the service is reported as
    /// [`LLMError::Status`](crate::LLMError::Status) carrying the raw body.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
