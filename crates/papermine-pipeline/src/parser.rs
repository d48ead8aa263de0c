//! Parse model output into an extraction record

use crate::error::PipelineError;
use papermine_domain::ExtractionRecord;
use tracing::warn;

/// Parse the model's response text into an [`ExtractionRecord`].
///
/// Models sometimes wrap JSON in markdown code fences even when asked not
/// to; fences are stripped before parsing. Anything that still fails to
/// parse is [`PipelineError::Malformed`] - no best-effort partial parse is
/// attempted, and the raw text is logged for manual inspection.
pub(crate) fn parse_record(response: &str) -> Result<ExtractionRecord, PipelineError> {
    let json_str = strip_code_fence(response);

    serde_json::from_str(json_str).map_err(|e| {
        warn!(raw = %response, "model output is not a valid extraction record");
        PipelineError::Malformed(e.to_string())
    })
}

/// Strip a surrounding markdown code fence (```json ... ```), if present
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag after the opening fence, then the closing fence.
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => return trimmed,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_json() {
        let record = parse_record(r#"{"Dataset_Names": ["ADNI"], "Cohort_Info": null}"#).unwrap();
        assert_eq!(record.dataset_names, Some(json!(["ADNI"])));
        assert_eq!(record.cohort_info, Some(json!(null)));
    }

    #[test]
    fn test_parse_fenced_json() {
        let response = "```json\n{\"Dataset_Names\": [\"UK Biobank\"]}\n```";
        let record = parse_record(response).unwrap();
        assert_eq!(record.dataset_names, Some(json!(["UK Biobank"])));
    }

    #[test]
    fn test_parse_fence_without_language_tag() {
        let response = "```\n{\"Data_Types\": \"MRI\"}\n```";
        let record = parse_record(response).unwrap();
        assert_eq!(record.data_types, Some(json!("MRI")));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let result = parse_record("not json at all");
        assert!(matches!(result, Err(PipelineError::Malformed(_))));
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let result = parse_record(r#"{"Dataset_Names": ["ADNI""#);
        assert!(matches!(result, Err(PipelineError::Malformed(_))));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
