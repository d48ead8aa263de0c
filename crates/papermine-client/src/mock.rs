//! Deterministic mock provider for testing

use crate::error::ProviderError;
use async_trait::async_trait;
use papermine_domain::{CompletionProvider, ProviderResponse, ResponseFormat, TokenUsage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted outcome for one mock call
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply {
        text: String,
        usage: Option<TokenUsage>,
    },
    Fail(String),
}

/// Mock completion provider for deterministic testing.
///
/// Returns pre-configured outcomes without making any network calls. Calls
/// consume scripted outcomes in FIFO order; once the script is exhausted
/// (or when none was pushed), every call returns the default response with
/// a fixed 10-in/5-out usage.
///
/// # Examples
///
/// ```
/// use papermine_client::MockProvider;
/// use papermine_domain::{CompletionProvider, ResponseFormat};
///
/// # async fn example() {
/// let provider = MockProvider::new("{\"Dataset_Names\": []}");
/// provider.push_failure("connection reset");
///
/// // First call fails per the script, second falls back to the default.
/// assert!(provider.complete("p", ResponseFormat::Json).await.is_err());
/// assert!(provider.complete("p", ResponseFormat::Json).await.is_ok());
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
    always_fail: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider that answers every call with a fixed response
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            always_fail: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a successful reply with explicit usage metadata
    pub fn push_reply(&self, text: impl Into<String>, usage: Option<TokenUsage>) {
        self.script.lock().unwrap().push_back(MockOutcome::Reply {
            text: text.into(),
            usage,
        });
    }

    /// Queue a failed exchange
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(MockOutcome::Fail(message.into()));
    }

    /// Make every call fail from now on, regardless of the script
    pub fn always_fail(&self, message: impl Into<String>) {
        *self.always_fail.lock().unwrap() = Some(message.into());
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = ProviderError;

    async fn complete(
        &self,
        _prompt: &str,
        _format: ResponseFormat,
    ) -> Result<ProviderResponse, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = self.always_fail.lock().unwrap().clone() {
            return Err(ProviderError::Communication(message));
        }

        match self.script.lock().unwrap().pop_front() {
            Some(MockOutcome::Reply { text, usage }) => Ok(ProviderResponse { text, usage }),
            Some(MockOutcome::Fail(message)) => Err(ProviderError::Communication(message)),
            None => Ok(ProviderResponse {
                text: self.default_response.clone(),
                usage: Some(TokenUsage {
                    input: 10,
                    output: 5,
                }),
            }),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response_with_usage() {
        let provider = MockProvider::new("hello");
        let response = provider.complete("p", ResponseFormat::Text).await.unwrap();
        assert_eq!(response.text, "hello");
        assert_eq!(
            response.usage,
            Some(TokenUsage {
                input: 10,
                output: 5
            })
        );
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let provider = MockProvider::default();
        provider.push_reply("first", None);
        provider.push_failure("boom");

        let first = provider.complete("p", ResponseFormat::Text).await.unwrap();
        assert_eq!(first.text, "first");
        assert_eq!(first.usage, None);

        let second = provider.complete("p", ResponseFormat::Text).await;
        assert!(matches!(second, Err(ProviderError::Communication(_))));

        // Script exhausted, back to default.
        let third = provider.complete("p", ResponseFormat::Text).await.unwrap();
        assert_eq!(third.text, "{}");
    }

    #[tokio::test]
    async fn test_always_fail() {
        let provider = MockProvider::default();
        provider.always_fail("down");

        for _ in 0..3 {
            assert!(provider.complete("p", ResponseFormat::Json).await.is_err());
        }
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = MockProvider::default();
        let clone = provider.clone();

        provider.complete("p", ResponseFormat::Text).await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }
}
