use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// The object storage gateway was never configured (missing credentials or bucket)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// The request outlived the server-side deadline
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Internal(_)
            | AppError::StorageUnavailable(_)
            | AppError::UploadFailed(_)
            | AppError::DeleteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ("Database error occurred".to_string(), None)
            }
            AppError::NotFound(ref msg) => (msg.clone(), None),
            AppError::Validation(ref msg) => (msg.clone(), Some(vec![msg.clone()])),
            AppError::BadRequest(ref msg) => (msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None)
            }
            AppError::StorageUnavailable(ref msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                ("File storage is not available".to_string(), None)
            }
            AppError::UploadFailed(ref msg) => {
                tracing::error!("Upload failed: {}", msg);
                ("Failed to upload file".to_string(), None)
            }
            AppError::DeleteFailed(ref msg) => {
                tracing::error!("Delete failed: {}", msg);
                ("Failed to delete file".to_string(), None)
            }
            AppError::Timeout(ref msg) => {
                tracing::warn!("Request timed out: {}", msg);
                ("Request timed out".to_string(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
