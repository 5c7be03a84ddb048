//! Document text extraction
//!
//! Parsing itself is delegated to `lopdf` and `docx-rust`. This module owns the
//! rules for stitching pages and paragraphs together and runs the blocking
//! parsers off the async runtime.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::models::DocumentKind;

pub mod docx;
pub mod pdf;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

const PAGE_SEPARATOR: &str = "\n\n";
const PARAGRAPH_SEPARATOR: &str = "\n";

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Parse(String),
    #[error("no extractor registered for .{0} files")]
    Unsupported(DocumentKind),
    #[error("extraction timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// A parser that turns the raw bytes of one document into plain text.
///
/// Implementations are synchronous; callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError>;
}

/// Concatenate page texts in order. Pages without text are skipped, every
/// other page is followed by a blank line.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages.into_iter().flatten() {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push_str(PAGE_SEPARATOR);
    }
    text
}

/// Concatenate paragraphs in order, dropping whitespace-only ones.
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for paragraph in paragraphs {
        let paragraph = paragraph.as_ref();
        if paragraph.trim().is_empty() {
            continue;
        }
        text.push_str(paragraph);
        text.push_str(PARAGRAPH_SEPARATOR);
    }
    text
}

/// Extractors keyed by document kind.
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new(extractors: Vec<(DocumentKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: DocumentKind) -> Result<Arc<dyn TextExtractor>, ExtractionError> {
        self.extractors
            .get(&kind)
            .cloned()
            .ok_or(ExtractionError::Unsupported(kind))
    }

    /// Run the extractor for `kind` on the blocking pool, bounded by `timeout`.
    ///
    /// A timed-out parser keeps running on its blocking thread until it returns;
    /// only the request gives up on it.
    pub async fn extract(
        &self,
        kind: DocumentKind,
        data: Bytes,
        timeout: Duration,
    ) -> Result<String, ExtractionError> {
        let extractor = self.get(kind)?;
        debug!(%kind, bytes = data.len(), "Starting text extraction");

        let handle = tokio::task::spawn_blocking(move || extractor.extract(&data));

        tokio::time::timeout(timeout, handle)
            .await
            .map_err(|_| ExtractionError::Timeout(timeout))?
            .map_err(|e| ExtractionError::Worker(e.to_string()))?
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(vec![
            (DocumentKind::Pdf, Arc::new(PdfExtractor::new())),
            (DocumentKind::Docx, Arc::new(DocxExtractor::new())),
        ])
    }
}
