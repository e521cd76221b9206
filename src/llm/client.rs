// ABOUTME: Defines the LlmClient trait - the abstraction layer that allows
// ABOUTME: firegpt to work with any OpenAI-compatible model provider.

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for LLM client implementations.
///
/// Tool choice is always "auto": when a tool manifest is attached to the
/// request, the provider decides whether to answer directly or request
/// tool invocations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Create a message and wait for the complete response.
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;
}
