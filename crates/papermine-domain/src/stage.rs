//! Stage tags for usage attribution

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label for the logical pipeline step that issued a completion call.
///
/// Every successful completion call is attributed to exactly one stage tag
/// in the usage ledger. Tags are free-form but should be short, stable
/// identifiers ("extract", "screen"); ledger reports order stages
/// lexicographically so the same run always prints the same table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageTag(String);

impl StageTag {
    /// Create a stage tag from a label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The tag label
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageTag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StageTag::new("extract").to_string(), "extract");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut tags = vec![StageTag::new("screen"), StageTag::new("extract")];
        tags.sort();
        assert_eq!(tags[0].as_str(), "extract");
        assert_eq!(tags[1].as_str(), "screen");
    }
}
