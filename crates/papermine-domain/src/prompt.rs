//! Request and response units for completion calls

use crate::stage::StageTag;
use serde::{Deserialize, Serialize};

/// Declared shape of the model's response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResponseFormat {
    /// Unconstrained free text
    #[default]
    Text,

    /// The service is instructed to emit a JSON object. The payload is still
    /// returned as opaque text; validating that it actually parses is the
    /// caller's responsibility.
    Json,
}

/// A generated request unit, constructed per extraction call and discarded
/// after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Identifier of the template this prompt was built from
    pub template: String,

    /// Full prompt text, already truncated to the caller's character budget
    pub text: String,

    /// Expected response shape
    pub format: ResponseFormat,
}

impl Prompt {
    /// Create a prompt
    pub fn new(template: impl Into<String>, text: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            template: template.into(),
            text: text.into(),
            format,
        }
    }
}

/// Token counts reported by the completion service for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt-side token count
    pub input: u64,

    /// Completion-side token count
    pub output: u64,
}

/// The outcome of one model invocation. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Raw response text from the service
    pub text: String,

    /// Token usage, absent when the service omitted usage metadata
    pub usage: Option<TokenUsage>,

    /// Stage tag the call was issued under
    pub stage: StageTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Text);
    }

    #[test]
    fn test_prompt_construction() {
        let prompt = Prompt::new("dataset_metadata", "Extract ...", ResponseFormat::Json);
        assert_eq!(prompt.template, "dataset_metadata");
        assert_eq!(prompt.format, ResponseFormat::Json);
    }
}
