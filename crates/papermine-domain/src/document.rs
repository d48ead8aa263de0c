//! Input documents and their normalized sections

use serde::{Deserialize, Serialize};

/// A named section of a normalized document (e.g. ABSTRACT, METHODS)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title, uppercased by the normalizer
    pub title: String,

    /// Plain text content of the section
    pub text: String,
}

/// An immutable input unit: one paper, identified by its source file name.
///
/// A `Document` is created once per input file and never mutated after
/// normalization. `text` is the full normalized body; `sections` is the
/// section breakdown when the input was marked-up XML, and empty when the
/// input was already plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (input file name, e.g. "PMC8640037.xml")
    pub id: String,

    /// Normalized plain text body
    pub text: String,

    /// Named sections in document order, empty for plain-text input
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a document from already-clean plain text with no section breakdown
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sections: Vec::new(),
        }
    }

    /// True when the normalized body contains no non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
