use lopdf::Document;
use tracing::{debug, info};

use super::{join_pages, ExtractionError, TextExtractor};

/// PDF text extraction backed by `lopdf`.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Per-page text in page-number order. `None` marks a page with no
    /// extractable text, such as a scanned image. A page lopdf cannot read
    /// fails the whole document.
    fn page_texts(doc: &Document) -> Result<Vec<Option<String>>, ExtractionError> {
        doc.get_pages()
            .into_keys()
            .map(|page_number| {
                let text = doc.extract_text(&[page_number]).map_err(|e| {
                    debug!(page_number, error = %e, "Page text extraction failed");
                    ExtractionError::Parse(format!("page {page_number}: {e}"))
                })?;
                let text = text.trim_end();
                Ok((!text.is_empty()).then(|| text.to_string()))
            })
            .collect()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let pages = Self::page_texts(&doc)?;
        let with_text = pages.iter().filter(|p| p.is_some()).count();
        info!(page_count = pages.len(), with_text, "PDF text extraction complete");

        Ok(join_pages(pages))
    }
}
