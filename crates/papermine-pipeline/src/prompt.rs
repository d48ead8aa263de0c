//! Prompt engineering for dataset metadata extraction

use papermine_domain::{Prompt, ResponseFormat};

/// Template identifier carried on built prompts
pub(crate) const TEMPLATE_ID: &str = "dataset_metadata";

const FULLTEXT_PLACEHOLDER: &str = "<<FULLTEXT>>";

const DATASET_PROMPT: &str = r#"You are an expert biomedical reader. Extract all the datasets and data types
used in the following full-text article. Return **valid JSON** with keys:
- Dataset_Names
- Dataset_Sources
- Data_Types
- Brain_Regions
- Cohort_Info
- Preprocessing_Tools
- Analysis_Tools
- Key_Findings

Text:
<<FULLTEXT>>"#;

/// Builds the extraction prompt for one document.
///
/// The template is fixed and names each of the eight expected output
/// fields; the caller is responsible for truncating the text to its
/// character budget before building.
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a builder around already-truncated document text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt, requesting JSON output
    pub fn build(&self) -> Prompt {
        let filled = DATASET_PROMPT.replace(FULLTEXT_PLACEHOLDER, &self.text);
        Prompt::new(TEMPLATE_ID, filled, ResponseFormat::Json)
    }
}
