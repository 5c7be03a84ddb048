use docx_rust::document::{BodyContent, Paragraph};
use docx_rust::DocxFile;
use std::io::Cursor;
use tracing::info;

use super::{join_paragraphs, ExtractionError, TextExtractor};

/// Word (.docx) text extraction backed by `docx-rust`.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn paragraph_text(paragraph: &Paragraph<'_>) -> String {
    let mut text = String::new();
    for run in paragraph.iter_text() {
        text.push_str(run);
    }
    text
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let file = DocxFile::from_reader(Cursor::new(data))
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;
        let docx = file
            .parse()
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // Top-level body paragraphs only; tables and other blocks are not text content here.
        let paragraphs: Vec<String> = docx
            .document
            .body
            .content
            .iter()
            .filter_map(|block| match block {
                BodyContent::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        info!(paragraph_count = paragraphs.len(), "DOCX text extraction complete");
        Ok(join_paragraphs(paragraphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rust::Docx;

    fn docx_with_paragraphs(paragraphs: &[&'static str]) -> Vec<u8> {
        let mut docx = Docx::default();
        for &text in paragraphs {
            let para = if text.is_empty() {
                Paragraph::default()
            } else {
                Paragraph::default().push_text(text)
            };
            docx.document.push(para);
        }
        docx.write(Cursor::new(Vec::new())).unwrap().into_inner()
    }

    #[test]
    fn test_blank_paragraphs_are_dropped() {
        let data = docx_with_paragraphs(&["Hello", "", "World"]);
        let text = DocxExtractor::new().extract(&data).unwrap();
        assert_eq!(text, "Hello\nWorld\n");
    }

    #[test]
    fn test_whitespace_only_paragraphs_are_dropped() {
        let data = docx_with_paragraphs(&["Hello", "   ", "\t", "World"]);
        let text = DocxExtractor::new().extract(&data).unwrap();
        assert_eq!(text, "Hello\nWorld\n");
    }

    #[test]
    fn test_document_without_paragraphs_is_empty() {
        let data = docx_with_paragraphs(&[]);
        let text = DocxExtractor::new().extract(&data).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_non_zip_bytes_fail_to_parse() {
        let err = DocxExtractor::new().extract(b"plain text, not a zip").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
