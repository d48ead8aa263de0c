//! Section-aware text normalization for PMC XML papers

use crate::error::NormalizerError;
use crate::tree::{self, Node};
use papermine_domain::{Document, Section};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Section titles dropped during normalization; usually not useful for
/// dataset extraction. Matched case-insensitively against `<title>` text.
const SKIP_TITLES: [&str; 4] = [
    "references",
    "acknowledgements",
    "funding",
    "conflict of interest",
];

/// Fallback banner for `<sec>` elements without a `<title>`
const UNTITLED_SECTION: &str = "SECTION";

/// Converts raw PMC-style XML into clean, section-tagged plain text.
///
/// The default skip-list drops references, acknowledgements, funding and
/// conflict-of-interest sections; callers with different boilerplate can
/// extend it via [`TextNormalizer::with_skip_title`].
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    skip_titles: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            skip_titles: SKIP_TITLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TextNormalizer {
    /// Add a section title to the skip-list (matched case-insensitively)
    pub fn with_skip_title(mut self, title: impl Into<String>) -> Self {
        self.skip_titles.push(title.into().to_lowercase());
        self
    }

    /// Normalize an XML paper on disk into a [`Document`].
    ///
    /// # Errors
    ///
    /// - [`NormalizerError::NotFound`] when the path does not exist
    /// - [`NormalizerError::Parse`] when the markup is ill-formed or does
    ///   not contain any abstract or section elements
    pub fn normalize(&self, path: &Path) -> Result<Document, NormalizerError> {
        let xml = self.read_file(path)?;
        let sections = self.sections_from_markup(&xml)?;

        let text = sections
            .iter()
            .map(|s| format!("=== {} ===\n{}", s.title, s.text))
            .collect::<Vec<_>>()
            .join("\n");

        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(document = %id, sections = sections.len(), "normalized XML paper");

        Ok(Document { id, text, sections })
    }

    /// Normalize an XML paper into the flat section-tagged text blob
    pub fn clean_file(&self, path: &Path) -> Result<String, NormalizerError> {
        Ok(self.normalize(path)?.text)
    }

    /// Extract sections from raw markup, in document order, excluding
    /// skip-listed titles.
    pub fn sections_from_markup(&self, xml: &str) -> Result<Vec<Section>, NormalizerError> {
        let root = tree::parse(xml)?;
        let mut sections = Vec::new();

        // Abstract first, then body sections, matching reading order in
        // PMC markup.
        let mut abstracts = Vec::new();
        root.find_all("abstract", &mut abstracts);
        if let Some(abstract_node) = abstracts.first() {
            sections.push(Section {
                title: "ABSTRACT".to_string(),
                text: abstract_node.text(),
            });
        }

        let mut secs = Vec::new();
        root.find_all("sec", &mut secs);
        for sec in secs {
            let title = sec
                .first_child("title")
                .map(|t| t.text())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED_SECTION.to_string());

            if self.skip_titles.contains(&title.to_lowercase()) {
                continue;
            }

            sections.push(Section {
                title: title.to_uppercase(),
                text: sec.text(),
            });
        }

        if sections.is_empty() {
            return Err(NormalizerError::Parse(
                "no abstract or section elements found in markup".to_string(),
            ));
        }

        Ok(sections)
    }

    /// Extract the abstract as one flat paragraph, descending to the deepest
    /// `<p>` nodes under every `<abstract>` and joining their text in
    /// document order. A `<p>` is a leaf when it contains no nested `<p>`.
    pub fn abstract_paragraph(&self, path: &Path) -> Result<String, NormalizerError> {
        let xml = self.read_file(path)?;
        let root = tree::parse(&xml)?;

        let mut abstracts = Vec::new();
        root.find_all("abstract", &mut abstracts);

        let mut paragraphs = Vec::new();
        for abstract_node in abstracts {
            collect_deepest_p(abstract_node, &mut paragraphs);
        }

        Ok(paragraphs.join(" "))
    }

    fn read_file(&self, path: &Path) -> Result<String, NormalizerError> {
        if !path.exists() {
            return Err(NormalizerError::NotFound(path.to_path_buf()));
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Collect the text of the deepest `<p>` elements under a node, in
/// document order.
fn collect_deepest_p(node: &Node, out: &mut Vec<String>) {
    if node.name() == Some("p") && node.has_no_descendant("p") {
        let text = node.text();
        if !text.is_empty() {
            out.push(text);
        }
        return;
    }
    for child in node.children() {
        collect_deepest_p(child, out);
    }
}
