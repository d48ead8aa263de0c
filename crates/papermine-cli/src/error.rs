//! Error types for the CLI

use thiserror::Error;

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `papermine` binary
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing or invalid configuration (credentials, knobs). Fatal for the
    /// whole run, raised before any network activity.
    #[error("configuration error: {0}")]
    Config(String),

    /// Per-run pipeline failure outside batch handling (e.g. single-file
    /// extraction)
    #[error(transparent)]
    Pipeline(#[from] papermine_pipeline::PipelineError),

    /// Normalization failure in `clean`
    #[error(transparent)]
    Normalize(#[from] papermine_normalizer::NormalizerError),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
