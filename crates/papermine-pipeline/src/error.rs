//! Error types for the extraction pipeline

use papermine_client::ClientError;
use papermine_normalizer::NormalizerError;
use thiserror::Error;

/// Errors that can occur while processing one document.
///
/// All variants are fatal for the document they occur on; in a batch they
/// are caught at the pipeline boundary and reported, never allowed to halt
/// the remaining documents. Configuration problems are not represented
/// here - they abort the whole run before any document work starts.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input could not be found or normalized into sections
    #[error(transparent)]
    Normalize(#[from] NormalizerError),

    /// Completion call exhausted all retries
    #[error(transparent)]
    Service(#[from] ClientError),

    /// Model output is not valid JSON; no partial record is produced
    #[error("malformed extraction output: {0}")]
    Malformed(String),

    /// Failure writing the output artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid pipeline configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Stable error-kind label for batch reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Normalize(NormalizerError::NotFound(_)) => "not-found",
            PipelineError::Normalize(NormalizerError::Parse(_)) => "parse",
            PipelineError::Normalize(NormalizerError::Io(_)) => "io",
            PipelineError::Service(_) => "service-unavailable",
            PipelineError::Malformed(_) => "extraction-malformed",
            PipelineError::Io(_) => "io",
            PipelineError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_labels() {
        let e = PipelineError::Normalize(NormalizerError::NotFound(PathBuf::from("x.xml")));
        assert_eq!(e.kind(), "not-found");

        let e = PipelineError::Malformed("not json at all".to_string());
        assert_eq!(e.kind(), "extraction-malformed");

        let e = PipelineError::Service(ClientError::ServiceUnavailable {
            attempts: 5,
            last_error: "down".to_string(),
        });
        assert_eq!(e.kind(), "service-unavailable");
    }
}
