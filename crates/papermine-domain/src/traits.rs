//! Trait definitions for external interactions
//!
//! These traits define the boundary between pipeline logic and
//! infrastructure. Implementations live in other crates
//! (papermine-client provides the HTTP and mock providers).

use crate::prompt::{ResponseFormat, TokenUsage};
use async_trait::async_trait;

/// One raw exchange with a completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Response text, treated as opaque by the provider
    pub text: String,

    /// Token usage when the service reported it
    pub usage: Option<TokenUsage>,
}

/// Trait for a text-generation backend.
///
/// A provider performs exactly one request/response exchange per call; the
/// retry policy lives in the client wrapping it, never here.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::fmt::Display + Send + Sync;

    /// Execute a single completion exchange.
    ///
    /// When `format` is [`ResponseFormat::Json`], the service is instructed
    /// to constrain its output to a JSON object, but the payload is still
    /// returned as opaque text.
    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<ProviderResponse, Self::Error>;

    /// Model identifier the provider sends requests to
    fn model(&self) -> &str;
}
