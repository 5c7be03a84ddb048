// Upload flow: validate, stage, extract, summarize

use tracing::info;

use crate::models::{AppState, ExtractionResult, UploadedFile};
use crate::storage::StagedUpload;
use crate::types::AppResult;

pub struct UploadProcessor;

impl UploadProcessor {
    /// Stage one validated upload and extract its text.
    ///
    /// The extractor reads the staged copy back from the store, so what is
    /// parsed is exactly what was persisted.
    #[tracing::instrument(skip(state, file), fields(filename = %file.filename, kind = %file.kind))]
    pub async fn process_file(state: &AppState, file: UploadedFile) -> AppResult<ExtractionResult> {
        let staged = StagedUpload::new(file.kind);
        let written = state.store.put(&staged.key, file.data).await?;
        info!(upload_id = %staged.id, bytes = written, "Upload staged");

        let stored = state.store.get(&staged.key).await?;
        let text = state
            .extractors
            .extract(file.kind, stored, state.config.extraction.timeout())
            .await?;

        let result = ExtractionResult::new(file.filename, &text);
        info!(
            upload_id = %staged.id,
            full_text_length = result.full_text_length,
            "Text extracted"
        );
        Ok(result)
    }
}
