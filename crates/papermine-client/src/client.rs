//! The retrying completion client

use crate::error::ClientError;
use crate::ledger::UsageLedger;
use crate::retry::RetryPolicy;
use papermine_domain::{CompletionProvider, CompletionResult, Prompt, StageTag};
use std::sync::Arc;
use tracing::{debug, warn};

/// Thin, retrying wrapper around a completion provider.
///
/// `execute` issues one logical completion call: it retries transient
/// provider failures per the [`RetryPolicy`], and on success records the
/// call's token usage against the given stage tag in the shared
/// [`UsageLedger`]. After the final attempt fails, the call fails with
/// [`ClientError::ServiceUnavailable`] carrying the last underlying cause -
/// callers must surface it, not swallow it.
pub struct CompletionClient<P: CompletionProvider> {
    provider: P,
    policy: RetryPolicy,
    ledger: Arc<UsageLedger>,
}

impl<P: CompletionProvider> CompletionClient<P> {
    /// Create a client with the default retry policy
    pub fn new(provider: P, ledger: Arc<UsageLedger>) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
            ledger,
        }
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The shared usage ledger
    pub fn ledger(&self) -> &Arc<UsageLedger> {
        &self.ledger
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Execute one logical completion call under a stage tag.
    ///
    /// Any provider failure (network error, rate limit, malformed service
    /// payload) counts as transient and is retried with jittered exponential
    /// backoff; the only suspension points are the exchange itself and the
    /// backoff sleeps.
    ///
    /// If the service response omits usage metadata, a warning is logged and
    /// the ledger is left unchanged for the call - an observability gap, not
    /// an error.
    pub async fn execute(
        &self,
        prompt: &Prompt,
        stage: StageTag,
    ) -> Result<CompletionResult, ClientError> {
        let mut last_error = String::new();

        for attempt in 1..=self.policy.max_attempts {
            match self.provider.complete(&prompt.text, prompt.format).await {
                Ok(response) => {
                    match response.usage {
                        Some(usage) => {
                            self.ledger.record(&stage, usage.input, usage.output);
                        }
                        None => {
                            warn!(
                                stage = %stage,
                                template = %prompt.template,
                                "service response omitted token usage; ledger unchanged"
                            );
                        }
                    }

                    debug!(
                        stage = %stage,
                        attempt,
                        response_chars = response.text.len(),
                        "completion call succeeded"
                    );

                    return Ok(CompletionResult {
                        text: response.text,
                        usage: response.usage,
                        stage,
                    });
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(
                        stage = %stage,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %last_error,
                        "completion attempt failed"
                    );

                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }

        Err(ClientError::ServiceUnavailable {
            attempts: self.policy.max_attempts,
            last_error,
        })
    }
}
