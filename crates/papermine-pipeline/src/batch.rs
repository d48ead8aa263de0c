//! Concurrent batch processing with bounded in-flight calls

use crate::error::PipelineError;
use crate::pipeline::ExtractionPipeline;
use papermine_domain::CompletionProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// One document that failed during a batch run
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    /// Document identifier (input path)
    pub id: String,

    /// Stable error-kind label ([`PipelineError::kind`])
    pub kind: &'static str,

    /// Human-readable failure description
    pub error: String,
}

/// Summary of one batch run: which documents produced artifacts, which were
/// skipped as blank, which failed and why, and which were abandoned after
/// cancellation.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Documents that produced an artifact, with the artifact path
    pub succeeded: Vec<(String, PathBuf)>,

    /// Documents whose normalized text was blank (no call issued)
    pub skipped: Vec<String>,

    /// Documents that failed, with error kind and description
    pub failed: Vec<DocumentFailure>,

    /// Documents never started because the batch was cancelled
    pub abandoned: Vec<String>,
}

impl BatchReport {
    /// Total documents accounted for
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.skipped.len() + self.failed.len() + self.abandoned.len()
    }

    /// One line per failed document, for the end-of-run summary
    pub fn failure_lines(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("{} [{}]: {}", f.id, f.kind, f.error))
            .collect()
    }
}

impl<P> ExtractionPipeline<P>
where
    P: CompletionProvider + 'static,
{
    /// Process a batch of documents concurrently.
    ///
    /// Each document runs its own load → extract → persist chain; the number
    /// of simultaneously in-flight documents (and therefore completion
    /// calls) is bounded by `max_in_flight`. Per-document errors are caught
    /// here, logged with the document identity, and collected into the
    /// report - they never halt the remaining documents.
    ///
    /// Cancellation is cooperative and per-document: once `cancel` fires, no
    /// new document is started, in-flight documents run to completion, and
    /// everything not yet started is reported as abandoned. Retry backoff
    /// already bounds an individual call's worst-case latency, so mid-call
    /// cancellation is not attempted.
    pub async fn run_batch(
        self: Arc<Self>,
        paths: Vec<PathBuf>,
        cancel: CancellationToken,
    ) -> BatchReport {
        let semaphore = Arc::new(Semaphore::new(self.config().max_in_flight));
        let mut handles = Vec::new();
        let mut report = BatchReport::default();

        info!(
            documents = paths.len(),
            max_in_flight = self.config().max_in_flight,
            "starting batch extraction"
        );

        let mut paths = paths.into_iter();
        while let Some(path) = paths.next() {
            // Wait for a permit first so a cancellation during backpressure
            // is still honored before the next document starts.
            let permit = tokio::select! {
                permit = Arc::clone(&semaphore).acquire_owned() => {
                    permit.expect("semaphore never closed")
                }
                _ = cancel.cancelled() => {
                    report.abandoned.push(display_id(&path));
                    break;
                }
            };

            if cancel.is_cancelled() {
                report.abandoned.push(display_id(&path));
                break;
            }

            let pipeline = Arc::clone(&self);
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let id = display_id(&path);
                let result = pipeline.extract_path(&path).await;
                (id, result)
            }));
        }

        // Everything not dispatched is abandoned.
        report.abandoned.extend(paths.map(|p| display_id(&p)));

        for handle in handles {
            match handle.await {
                Ok((id, Ok(Some(outcome)))) => {
                    report.succeeded.push((id, outcome.artifact));
                }
                Ok((id, Ok(None))) => {
                    info!(document = %id, "blank document skipped");
                    report.skipped.push(id);
                }
                Ok((id, Err(e))) => {
                    error!(document = %id, kind = e.kind(), error = %e, "document failed");
                    report.failed.push(DocumentFailure {
                        id,
                        kind: e.kind(),
                        error: e.to_string(),
                    });
                }
                Err(join_error) => {
                    error!(error = %join_error, "extraction task panicked");
                    report.failed.push(DocumentFailure {
                        id: "<unknown>".to_string(),
                        kind: "internal",
                        error: join_error.to_string(),
                    });
                }
            }
        }

        info!(
            succeeded = report.succeeded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            abandoned = report.abandoned.len(),
            "batch extraction finished"
        );

        report
    }
}

fn display_id(path: &std::path::Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use papermine_client::{CompletionClient, MockProvider, RetryPolicy, UsageLedger};
    use std::fs;
    use tempfile::TempDir;

    const VALID_RESPONSE: &str = r#"{
        "Dataset_Names": ["ADNI"],
        "Dataset_Sources": null,
        "Data_Types": ["MRI"],
        "Brain_Regions": null,
        "Cohort_Info": null,
        "Preprocessing_Tools": null,
        "Analysis_Tools": null,
        "Key_Findings": null
    }"#;

    fn pipeline(provider: MockProvider, output_dir: &std::path::Path) -> Arc<ExtractionPipeline<MockProvider>> {
        let client = CompletionClient::new(provider, Arc::new(UsageLedger::new()))
            .with_policy(RetryPolicy::immediate(5));
        let config = PipelineConfig {
            output_dir: output_dir.to_path_buf(),
            max_in_flight: 2,
            ..Default::default()
        };
        Arc::new(ExtractionPipeline::new(client, config).unwrap())
    }

    fn write_doc(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_batch_mixes_success_skip_and_failure() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let good = write_doc(&input, "good.txt", "Full text of a paper.");
        let blank = write_doc(&input, "blank.txt", "   ");
        let missing = input.path().join("missing.txt");

        let pipeline = pipeline(MockProvider::new(VALID_RESPONSE), output.path());
        let report = pipeline
            .run_batch(vec![good, blank, missing], CancellationToken::new())
            .await;

        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].kind, "not-found");
        assert!(report.abandoned.is_empty());
        assert_eq!(report.total(), 3);
    }

    #[tokio::test]
    async fn test_failures_do_not_halt_the_batch() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        // First response is unparsable, second is fine; both documents are
        // still attempted.
        let provider = MockProvider::default();
        provider.push_reply("not json at all", None);
        provider.push_reply(VALID_RESPONSE, None);

        let a = write_doc(&input, "a.txt", "text a");
        let b = write_doc(&input, "b.txt", "text b");

        // max_in_flight = 1 keeps the scripted order deterministic.
        let client = CompletionClient::new(provider, Arc::new(UsageLedger::new()))
            .with_policy(RetryPolicy::immediate(5));
        let config = PipelineConfig {
            output_dir: output.path().to_path_buf(),
            max_in_flight: 1,
            ..Default::default()
        };
        let pipeline = Arc::new(ExtractionPipeline::new(client, config).unwrap());

        let report = pipeline
            .run_batch(vec![a, b], CancellationToken::new())
            .await;

        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].kind, "extraction-malformed");
    }

    #[tokio::test]
    async fn test_pre_cancelled_batch_abandons_everything() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let a = write_doc(&input, "a.txt", "text");
        let b = write_doc(&input, "b.txt", "text");

        let provider = MockProvider::new(VALID_RESPONSE);
        let pipeline = pipeline(provider.clone(), output.path());

        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = pipeline.run_batch(vec![a, b], cancel).await;
        assert_eq!(report.abandoned.len(), 2);
        assert!(report.succeeded.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_lines_name_document_and_kind() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let missing = input.path().join("ghost.xml");
        let pipeline = pipeline(MockProvider::default(), output.path());

        let report = pipeline
            .run_batch(vec![missing], CancellationToken::new())
            .await;

        let lines = report.failure_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ghost.xml"));
        assert!(lines[0].contains("not-found"));
    }
}
