//! The structured extraction artifact

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The eight semantic fields every extraction record declares, in artifact
/// key order.
pub const EXPECTED_FIELDS: [&str; 8] = [
    "Dataset_Names",
    "Dataset_Sources",
    "Data_Types",
    "Brain_Regions",
    "Cohort_Info",
    "Preprocessing_Tools",
    "Analysis_Tools",
    "Key_Findings",
];

/// Structured metadata extracted from one paper.
///
/// One record per document, written once as a JSON artifact and never
/// updated in place - re-running extraction produces a new artifact.
///
/// Each field holds whatever the model returned for that key (string, list,
/// or null); the shape is not schema-validated beyond being valid JSON.
/// `None` means the key was absent from the model's output entirely, while
/// `Some(Value::Null)` means the key was present with a null value. The
/// serialized artifact always carries all eight keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractionRecord {
    /// Names of datasets used in the paper
    #[serde(rename = "Dataset_Names", default, deserialize_with = "present_value")]
    pub dataset_names: Option<Value>,

    /// Where each dataset came from (repository, consortium, ...)
    #[serde(rename = "Dataset_Sources", default, deserialize_with = "present_value")]
    pub dataset_sources: Option<Value>,

    /// Data modalities (MRI, RNA-seq, clinical scores, ...)
    #[serde(rename = "Data_Types", default, deserialize_with = "present_value")]
    pub data_types: Option<Value>,

    /// Brain regions the paper analyzes
    #[serde(rename = "Brain_Regions", default, deserialize_with = "present_value")]
    pub brain_regions: Option<Value>,

    /// Cohort description (size, diagnosis groups, demographics)
    #[serde(rename = "Cohort_Info", default, deserialize_with = "present_value")]
    pub cohort_info: Option<Value>,

    /// Preprocessing software and pipelines
    #[serde(rename = "Preprocessing_Tools", default, deserialize_with = "present_value")]
    pub preprocessing_tools: Option<Value>,

    /// Analysis software and statistical tools
    #[serde(rename = "Analysis_Tools", default, deserialize_with = "present_value")]
    pub analysis_tools: Option<Value>,

    /// Key findings of the paper
    #[serde(rename = "Key_Findings", default, deserialize_with = "present_value")]
    pub key_findings: Option<Value>,
}

/// A key that is present deserializes to `Some`, even when its value is
/// null; only an absent key falls back to the field default of `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Which of the eight expected keys the model actually returned
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPresence {
    /// Keys present in the model output (including explicit nulls)
    pub present: Vec<&'static str>,

    /// Keys the model omitted entirely
    pub missing: Vec<&'static str>,
}

impl FieldPresence {
    /// True when every expected key was returned
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl ExtractionRecord {
    /// Report which expected keys were present vs. missing in the model
    /// output, rather than trusting arbitrary structure.
    pub fn field_presence(&self) -> FieldPresence {
        let fields = [
            &self.dataset_names,
            &self.dataset_sources,
            &self.data_types,
            &self.brain_regions,
            &self.cohort_info,
            &self.preprocessing_tools,
            &self.analysis_tools,
            &self.key_findings,
        ];

        let mut presence = FieldPresence::default();
        for (key, value) in EXPECTED_FIELDS.into_iter().zip(fields) {
            if value.is_some() {
                presence.present.push(key);
            } else {
                presence.missing.push(key);
            }
        }
        presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record_round_trip() {
        let input = json!({
            "Dataset_Names": ["ADNI", "UK Biobank"],
            "Dataset_Sources": ["adni.loni.usc.edu"],
            "Data_Types": ["MRI", "PET"],
            "Brain_Regions": ["hippocampus"],
            "Cohort_Info": "1,200 participants, 400 AD",
            "Preprocessing_Tools": ["FreeSurfer"],
            "Analysis_Tools": ["SPM12"],
            "Key_Findings": "Hippocampal atrophy correlates with CDR."
        });

        let record: ExtractionRecord = serde_json::from_value(input).unwrap();
        assert_eq!(record.dataset_names, Some(json!(["ADNI", "UK Biobank"])));
        assert!(record.field_presence().is_complete());
    }

    #[test]
    fn test_serialized_artifact_carries_all_eight_keys() {
        let record = ExtractionRecord::default();
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 8);
        for key in EXPECTED_FIELDS {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_field_presence_reports_missing_keys() {
        let record: ExtractionRecord =
            serde_json::from_str(r#"{"Dataset_Names": ["ADNI"], "Cohort_Info": null}"#).unwrap();

        let presence = record.field_presence();
        assert!(presence.present.contains(&"Dataset_Names"));
        // Explicit null still counts as a returned key.
        assert!(presence.present.contains(&"Cohort_Info"));
        assert!(presence.missing.contains(&"Brain_Regions"));
        assert_eq!(presence.present.len() + presence.missing.len(), 8);
        assert!(!presence.is_complete());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record: ExtractionRecord =
            serde_json::from_str(r#"{"Dataset_Names": "ADNI", "Extra_Field": 42}"#).unwrap();
        assert_eq!(record.dataset_names, Some(json!("ADNI")));
    }
}
