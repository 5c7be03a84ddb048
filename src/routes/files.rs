use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::debug;

use crate::models::{AppState, ExtractionResult, UploadedFile};
use crate::types::{AppError, AppResult};
use crate::upload::UploadProcessor;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload_file))
}

/// POST /upload - stage a PDF or DOCX and return a preview of its text
#[tracing::instrument(skip(state, multipart))]
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractionResult>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or(AppError::MissingFile)?;

        // Validate before reading the body so nothing unsupported is ever staged.
        let mut file = UploadedFile::new(filename, Bytes::new())?;
        file.data = field.bytes().await?;
        debug!(bytes = file.data.len(), "File data received");

        return UploadProcessor::process_file(&state, file).await.map(Json);
    }

    Err(AppError::MissingFile)
}
