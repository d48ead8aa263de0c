//! papermine Completion Client
//!
//! Thin, retrying wrapper around a chat-completion service, with per-stage
//! token usage and cost accounting.
//!
//! # Architecture
//!
//! ```text
//! Prompt → CompletionClient → RetryPolicy loop → CompletionProvider → service
//!                 │
//!                 └── UsageLedger (stage → token counters)
//! ```
//!
//! The [`CompletionClient`] owns the retry loop and the ledger side effect;
//! providers perform exactly one exchange per call. Two providers ship with
//! the crate:
//!
//! - [`OpenAiProvider`]: chat-completions HTTP API via reqwest
//! - [`MockProvider`]: deterministic, scriptable mock for testing
//!
//! # Example
//!
//! ```
//! use papermine_client::{CompletionClient, MockProvider, UsageLedger};
//! use papermine_domain::{Prompt, ResponseFormat, StageTag};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let provider = MockProvider::new("{}");
//! let ledger = Arc::new(UsageLedger::new());
//! let client = CompletionClient::new(provider, Arc::clone(&ledger));
//!
//! let prompt = Prompt::new("demo", "say nothing", ResponseFormat::Json);
//! let result = client.execute(&prompt, StageTag::new("extract")).await.unwrap();
//! assert_eq!(result.text, "{}");
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod ledger;
mod mock;
mod openai;
mod retry;

pub use client::CompletionClient;
pub use error::{ClientError, ProviderError};
pub use ledger::{StageUsage, UsageLedger};
pub use mock::MockProvider;
pub use openai::{OpenAiProvider, DEFAULT_ENDPOINT};
pub use retry::RetryPolicy;
