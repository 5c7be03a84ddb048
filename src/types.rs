// Error types shared by the upload flow and the HTTP layer

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::extraction::ExtractionError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Only PDF and DOCX files are allowed")]
    Validation,

    #[error("Invalid upload: {0}")]
    InvalidRequest(String),

    #[error("No file uploaded")]
    MissingFile,

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Error saving file: {0}")]
    Storage(#[from] StorageError),

    #[error("Error processing file: {0}")]
    Extraction(#[from] ExtractionError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) | AppError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        // The body limit surfaces here, while the handler streams the field.
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::InvalidRequest(e.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), %detail, "Upload failed");
        } else {
            warn!(status = status.as_u16(), %detail, "Upload rejected");
        }

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
