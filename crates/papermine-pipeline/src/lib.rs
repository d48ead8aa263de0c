//! papermine Extraction Pipeline
//!
//! Orchestrates the normalize → prompt → complete → parse → persist chain
//! that turns one biomedical paper into one structured JSON artifact.
//!
//! # Architecture
//!
//! ```text
//! path → TextNormalizer → Document → PromptBuilder → CompletionClient
//!                                                         │
//!                               ExtractionRecord ← JSON parse
//!                                      │
//!                            <output_dir>/<stem>.json
//! ```
//!
//! # Key behaviors
//!
//! - Blank documents short-circuit to `None` without any completion call
//! - Text beyond the character budget is truncated, not rejected; the
//!   outcome carries a `truncated` flag and a warning is logged
//! - Output that is not valid JSON fails the document with
//!   [`PipelineError::Malformed`] and leaves no artifact on disk
//! - Batches run documents concurrently under a bounded permit count, honor
//!   cooperative cancellation between documents, and collect per-document
//!   failures instead of halting
//!
//! # Example
//!
//! ```no_run
//! use papermine_client::{CompletionClient, OpenAiProvider, UsageLedger};
//! use papermine_pipeline::{ExtractionPipeline, PipelineConfig};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAiProvider::new("gpt-4.1", "sk-...");
//! let ledger = Arc::new(UsageLedger::new());
//! let client = CompletionClient::new(provider, ledger);
//!
//! let pipeline = ExtractionPipeline::new(client, PipelineConfig::default())?;
//! if let Some(outcome) = pipeline.extract_path(Path::new("PMC8640037.xml")).await? {
//!     println!("wrote {}", outcome.artifact.display());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;

pub use batch::{BatchReport, DocumentFailure};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{ExtractionOutcome, ExtractionPipeline, EXTRACT_STAGE};
pub use prompt::PromptBuilder;
