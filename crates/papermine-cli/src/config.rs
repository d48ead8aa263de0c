//! Configuration file handling

use crate::error::{CliError, Result};
use papermine_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "papermine.toml";

/// Configuration for a papermine run.
///
/// ```toml
/// api_key = "sk-..."
/// model = "gpt-4.1"
/// # endpoint = "https://api.openai.com/v1"
///
/// [pipeline]
/// max_prompt_chars = 45000
/// output_dir = "dataset_info"
/// max_in_flight = 4
/// ```
///
/// The API key comes from this file only; a missing file or malformed
/// content fails fast with a configuration error before any network
/// activity is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion service API key
    pub api_key: String,

    /// Model identifier requests are sent to
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional custom API base URL (proxy, compatible server)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Pipeline knobs
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`CliError::Config`] when the file is missing, unreadable,
    /// unparsable, or carries an empty API key.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "config file not found: {} (create it with an api_key entry)",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;

        let config: Config = toml::from_str(&raw)
            .map_err(|e| CliError::Config(format!("cannot parse {}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(CliError::Config("api_key is empty".to_string()));
        }
        self.pipeline.validate().map_err(CliError::Config)?;
        Ok(())
    }
}
