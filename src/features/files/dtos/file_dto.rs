use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::files::classifier::FileCategory;
use crate::features::files::models::MedicalFile;

/// Maximum file size in bytes (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Validity of access links minted for listings
pub const TEMPORARY_LINK_TTL: Duration = Duration::from_secs(60 * 60);

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMedicalFileDto {
    /// Patient identifier (letters, digits, `_` and `-`)
    #[schema(example = "patient-42")]
    pub patient_id: String,
    /// Patient display name
    #[schema(example = "Jane Doe")]
    pub patient_name: String,
    /// The file to upload (PDF, JPG, PNG, GIF, DOC, DOCX, TXT; max 10 MiB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Medical file metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicalFileResponseDto {
    pub id: Uuid,
    pub patient_id: String,
    pub patient_name: String,
    /// Original filename as uploaded
    pub file_name: String,
    /// Resolved MIME type
    pub file_type: String,
    /// Size in bytes
    pub file_size: i64,
    pub storage_key: String,
    pub category: FileCategory,
    pub uploaded_at: DateTime<Utc>,
    /// Temporary access link, present only in listings when storage is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,
}

impl From<MedicalFile> for MedicalFileResponseDto {
    fn from(f: MedicalFile) -> Self {
        Self {
            id: f.id,
            patient_id: f.patient_id,
            patient_name: f.patient_name,
            file_name: f.file_name,
            file_type: f.file_type,
            file_size: f.file_size,
            storage_key: f.storage_key,
            category: f.category,
            uploaded_at: f.uploaded_at,
            access_url: None,
        }
    }
}

/// Query params for listing files
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Exact patient id
    pub patient_id: Option<String>,
    /// Exact category (`lab_results`, `insurance`, `prescription`, `medical_records`, `other`)
    pub category: Option<String>,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub file_id: Uuid,
    pub deleted: bool,
}
