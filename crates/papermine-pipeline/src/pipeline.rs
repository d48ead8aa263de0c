//! Core ExtractionPipeline implementation

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::parser::parse_record;
use crate::prompt::PromptBuilder;
use papermine_client::CompletionClient;
use papermine_domain::{CompletionProvider, Document, ExtractionRecord, StageTag};
use papermine_normalizer::TextNormalizer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Stage tag extraction calls are issued under
pub const EXTRACT_STAGE: &str = "extract";

/// Outcome of a successful extraction
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The parsed record
    pub record: ExtractionRecord,

    /// Path of the persisted JSON artifact
    pub artifact: PathBuf,

    /// True when the document text exceeded the character budget and was
    /// cut to fit. The artifact itself does not mark truncation; this flag
    /// is the caller's only signal.
    pub truncated: bool,
}

/// Orchestrates normalize → prompt → complete → parse → persist for one
/// document at a time.
///
/// Repeated `extract` calls on the same document are not deduplicated: each
/// issues a fresh completion call and its own ledger increments, and each
/// rewrites the artifact.
pub struct ExtractionPipeline<P: CompletionProvider> {
    client: CompletionClient<P>,
    normalizer: TextNormalizer,
    config: PipelineConfig,
}

impl<P: CompletionProvider> ExtractionPipeline<P> {
    /// Create a pipeline, validating the configuration
    pub fn new(
        client: CompletionClient<P>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            client,
            normalizer: TextNormalizer::default(),
            config,
        })
    }

    /// Replace the default normalizer
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The completion client (and through it, the usage ledger)
    pub fn client(&self) -> &CompletionClient<P> {
        &self.client
    }

    /// Load and extract a document identified by a file path.
    ///
    /// `.xml` inputs go through the normalizer; anything else is read as
    /// already-clean plain text.
    pub async fn extract_path(
        &self,
        path: &Path,
    ) -> Result<Option<ExtractionOutcome>, PipelineError> {
        let document = self.load_document(path)?;
        self.extract(&document).await
    }

    /// Extract structured metadata from a normalized document.
    ///
    /// Returns `Ok(None)` without issuing any completion call when the
    /// document text is empty or whitespace-only.
    pub async fn extract(
        &self,
        document: &Document,
    ) -> Result<Option<ExtractionOutcome>, PipelineError> {
        if document.is_blank() {
            debug!(document = %document.id, "blank document, skipping extraction");
            return Ok(None);
        }

        let (text, truncated) = truncate_chars(&document.text, self.config.max_prompt_chars);
        if truncated {
            warn!(
                document = %document.id,
                budget = self.config.max_prompt_chars,
                original_chars = document.text.chars().count(),
                "document text exceeds prompt budget, truncating"
            );
        }

        let prompt = PromptBuilder::new(text).build();
        let result = self
            .client
            .execute(&prompt, StageTag::new(EXTRACT_STAGE))
            .await?;

        let record = parse_record(&result.text)?;

        let presence = record.field_presence();
        if !presence.is_complete() {
            warn!(
                document = %document.id,
                missing = ?presence.missing,
                "model omitted expected fields"
            );
        }

        let artifact = self.persist(&document.id, &record)?;

        info!(
            document = %document.id,
            artifact = %artifact.display(),
            fields_present = presence.present.len(),
            truncated,
            "extraction complete"
        );

        Ok(Some(ExtractionOutcome {
            record,
            artifact,
            truncated,
        }))
    }

    /// Write the record as `<output_dir>/<stem>.json`
    fn persist(&self, document_id: &str, record: &ExtractionRecord) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.config.output_dir)?;

        let stem = Path::new(document_id)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| document_id.to_string());
        let artifact = self.config.output_dir.join(format!("{stem}.json"));

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| PipelineError::Malformed(e.to_string()))?;
        fs::write(&artifact, json)?;

        Ok(artifact)
    }

    fn load_document(&self, path: &Path) -> Result<Document, PipelineError> {
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xml")) {
            return Ok(self.normalizer.normalize(path)?);
        }

        if !path.exists() {
            return Err(PipelineError::Normalize(
                papermine_normalizer::NormalizerError::NotFound(path.to_path_buf()),
            ));
        }

        let text = fs::read_to_string(path)?;
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Document::from_text(id, text))
    }
}

/// Cut text to at most `budget` characters, respecting char boundaries
fn truncate_chars(text: &str, budget: usize) -> (String, bool) {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}
