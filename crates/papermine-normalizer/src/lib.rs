//! papermine Normalizer
//!
//! Converts raw PMC-style XML papers into clean, section-tagged plain text
//! suitable for prompting.
//!
//! # Overview
//!
//! Full-text papers arrive as JATS/PMC XML. The normalizer walks the markup
//! in document order, keeps the abstract and body sections, drops boilerplate
//! (references, acknowledgements, funding, conflict-of-interest), and emits
//! one plain-text blob with `=== TITLE ===` banners between sections.
//!
//! It can also pull just the abstract (descending to the deepest `<p>` nodes
//! under nested abstract markup) and run rule-based sentence segmentation
//! with ASCII transliteration.
//!
//! # Example
//!
//! ```no_run
//! use papermine_normalizer::TextNormalizer;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), papermine_normalizer::NormalizerError> {
//! let normalizer = TextNormalizer::default();
//! let document = normalizer.normalize(Path::new("PMC8640037.xml"))?;
//! println!("{} sections", document.sections.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod normalizer;
mod sentence;
mod tree;

pub use error::NormalizerError;
pub use normalizer::TextNormalizer;
pub use sentence::split_sentences;
