use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractorRegistry;
use crate::storage::UploadStore;
use crate::types::{AppError, AppResult};

/// Maximum number of characters returned in `extracted_text_preview`.
pub const PREVIEW_CHAR_LIMIT: usize = 2000;
const PREVIEW_ELLIPSIS: &str = "...";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";
pub const ALIVE_MESSAGE: &str = "Quiz backend is alive 🚀";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UploadStore>,
    pub extractors: Arc<ExtractorRegistry>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn UploadStore>,
        extractors: Arc<ExtractorRegistry>,
    ) -> Self {
        Self {
            config,
            store,
            extractors,
        }
    }
}

/// Document formats accepted by `/upload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classify a client filename by its final extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file received over multipart, already checked against the allowed kinds.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub kind: DocumentKind,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: Bytes) -> AppResult<Self> {
        let filename = filename.into();
        let kind = DocumentKind::from_filename(&filename).ok_or(AppError::Validation)?;
        Ok(Self {
            filename,
            kind,
            data,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub filename: String,
    pub message: String,
    pub extracted_text_preview: String,
    pub full_text_length: usize,
}

impl ExtractionResult {
    pub fn new(filename: impl Into<String>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            extracted_text_preview: preview(text),
            full_text_length: text.chars().count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Cut `text` down to `PREVIEW_CHAR_LIMIT` characters, marking the cut with an ellipsis.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHAR_LIMIT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("notes.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("NOTES.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("essay.DocX"), Some(DocumentKind::Docx));
    }

    #[test]
    fn test_document_kind_rejects_other_extensions() {
        for name in ["notes.txt", "essay.doc", "archive.pdf.zip", "pdf", ".pdf", "noext", ""] {
            assert_eq!(DocumentKind::from_filename(name), None, "accepted {name:?}");
        }
    }

    #[test]
    fn test_uploaded_file_requires_allowed_kind() {
        let err = UploadedFile::new("slides.pptx", Bytes::from_static(b"x")).unwrap_err();
        assert!(matches!(err, AppError::Validation));

        let file = UploadedFile::new("week1.docx", Bytes::from_static(b"x")).unwrap();
        assert_eq!(file.kind, DocumentKind::Docx);
        assert_eq!(file.filename, "week1.docx");
    }

    #[test]
    fn test_preview_keeps_short_text_intact() {
        let text = "a".repeat(PREVIEW_CHAR_LIMIT);
        assert_eq!(preview(&text), text);
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "b".repeat(PREVIEW_CHAR_LIMIT + 1);
        let result = ExtractionResult::new("long.pdf", &text);

        assert_eq!(result.extracted_text_preview.len(), PREVIEW_CHAR_LIMIT + 3);
        assert!(result.extracted_text_preview.ends_with("..."));
        assert_eq!(result.full_text_length, PREVIEW_CHAR_LIMIT + 1);
        assert_eq!(result.message, UPLOAD_SUCCESS_MESSAGE);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(PREVIEW_CHAR_LIMIT + 5);
        let result = ExtractionResult::new("accents.docx", &text);

        assert_eq!(
            result.extracted_text_preview,
            format!("{}...", "é".repeat(PREVIEW_CHAR_LIMIT))
        );
        assert_eq!(result.full_text_length, PREVIEW_CHAR_LIMIT + 5);
    }
}
