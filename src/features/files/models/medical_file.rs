use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::files::classifier::FileCategory;

/// Database model for medical file metadata
///
/// The access link is never stored; it is minted per listing request.
#[derive(Debug, Clone, FromRow)]
pub struct MedicalFile {
    pub id: Uuid,
    pub patient_id: String,
    pub patient_name: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub storage_key: String,
    pub category: FileCategory,
    pub uploaded_at: DateTime<Utc>,
}
