//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum prompt character budget. Documents longer than this are
    /// silently truncated before prompting - a cost/context-window
    /// trade-off, not a correctness guarantee. 45k chars is roughly
    /// 11-12k tokens.
    pub max_prompt_chars: usize,

    /// Directory the JSON artifacts are written to
    pub output_dir: PathBuf,

    /// Maximum simultaneous in-flight completion calls in a batch
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_max_in_flight() -> usize {
    4
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 45_000,
            output_dir: PathBuf::from("dataset_info"),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        if self.max_in_flight == 0 {
            return Err("max_in_flight must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_prompt_chars, 45_000);
        assert_eq!(config.max_in_flight, 4);
    }

    #[test]
    fn test_zero_budget_is_invalid() {
        let config = PipelineConfig {
            max_prompt_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let config = PipelineConfig {
            max_in_flight: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            max_prompt_chars = 10000
            output_dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_prompt_chars, 10_000);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_in_flight, 4);
    }
}
