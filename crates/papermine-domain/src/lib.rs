//! papermine Domain Layer
//!
//! Core types and trait interfaces shared by every other papermine crate.
//!
//! ## Key Concepts
//!
//! - **Document**: an immutable input unit - an identifier plus normalized text,
//!   optionally organized into named sections
//! - **Prompt**: an ephemeral request unit carrying the text to send and the
//!   declared response shape
//! - **CompletionResult**: the outcome of one model invocation, including token
//!   usage when the service reported it
//! - **ExtractionRecord**: the structured metadata extracted from one paper,
//!   with a fixed set of eight semantic fields
//! - **PriceTable**: static $/million-token pricing per model identifier
//!
//! ## Architecture
//!
//! Infrastructure (HTTP providers, XML parsing, persistence) lives in other
//! crates; this crate defines the value objects and the `CompletionProvider`
//! seam they plug into.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod pricing;
pub mod prompt;
pub mod record;
pub mod stage;
pub mod traits;

// Re-exports for convenience
pub use document::{Document, Section};
pub use pricing::{ModelPrice, PriceTable};
pub use prompt::{CompletionResult, Prompt, ResponseFormat, TokenUsage};
pub use record::{ExtractionRecord, FieldPresence, EXPECTED_FIELDS};
pub use stage::StageTag;
pub use traits::{CompletionProvider, ProviderResponse};
