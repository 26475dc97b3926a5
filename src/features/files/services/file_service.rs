use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::classifier::{classify, AllowedFileType, FileCategory};
use crate::features::files::dtos::{ListFilesQuery, MedicalFileResponseDto, TEMPORARY_LINK_TTL};
use crate::features::files::models::MedicalFile;
use crate::modules::storage::StorageGateway;
use crate::shared::file_name::base_name;
use crate::shared::validation::PATIENT_ID_REGEX;

const MEDICAL_FILE_COLUMNS: &str = "id, patient_id, patient_name, file_name, file_type, \
     file_size, storage_key, category, uploaded_at";

/// Upload input collected from the multipart form
#[derive(Debug)]
pub struct NewMedicalFile {
    pub patient_id: String,
    pub patient_name: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Service for medical file operations
pub struct FileService {
    pool: PgPool,
    storage: Arc<StorageGateway>,
}

impl FileService {
    pub fn new(pool: PgPool, storage: Arc<StorageGateway>) -> Self {
        Self { pool, storage }
    }

    /// Validate the form fields and classify the filename
    ///
    /// Classification only looks at the base name, so directories in a
    /// client-supplied path never influence the category.
    fn validate_upload(input: &NewMedicalFile) -> Result<(AllowedFileType, FileCategory)> {
        if input.patient_id.trim().is_empty() || input.patient_name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "patient_id and patient_name are required".to_string(),
            ));
        }

        if !PATIENT_ID_REGEX.is_match(&input.patient_id) {
            return Err(AppError::Validation(
                "patient_id may only contain letters, digits, '_' and '-' (max 128)".to_string(),
            ));
        }

        let classification = classify(base_name(&input.file_name)).ok_or_else(|| {
            AppError::BadRequest(format!(
                "File type not allowed. Supported: {}",
                AllowedFileType::SUPPORTED
            ))
        })?;

        Ok((classification.file_type, classification.category))
    }

    /// Upload a file to storage and save its metadata
    ///
    /// If the metadata insert fails the uploaded object is deleted again
    /// (best effort) and the insert error is returned.
    pub async fn upload(&self, input: NewMedicalFile) -> Result<MedicalFileResponseDto> {
        let (file_type, category) = Self::validate_upload(&input)?;
        let content_type = file_type.content_type();
        let file_name = base_name(&input.file_name);
        let file_size = input.data.len() as i64;

        let storage_key = self
            .storage
            .upload(
                &input.data,
                file_name,
                content_type,
                &input.patient_id,
                category,
            )
            .await?;

        debug!("File uploaded to storage: {}", storage_key);

        let inserted = sqlx::query_as::<_, MedicalFile>(&format!(
            r#"
            INSERT INTO medical_files (id, patient_id, patient_name, file_name, file_type, file_size, storage_key, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {MEDICAL_FILE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&input.patient_id)
        .bind(&input.patient_name)
        .bind(file_name)
        .bind(content_type)
        .bind(file_size)
        .bind(&storage_key)
        .bind(category)
        .fetch_one(&self.pool)
        .await;

        let file = match inserted {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(
                    "Failed to save metadata for '{}', removing uploaded object: {:?}",
                    storage_key,
                    e
                );
                if let Err(cleanup) = self.storage.delete(&storage_key).await {
                    warn!("Orphaned object '{}' left in storage: {}", storage_key, cleanup);
                }
                return Err(AppError::Database(e));
            }
        };

        info!(
            "File metadata saved: id={}, key={}, category={}, size={}",
            file.id, file.storage_key, file.category, file.file_size
        );

        Ok(file.into())
    }

    /// List files, newest first, each with a fresh temporary access link
    pub async fn list(&self, query: &ListFilesQuery) -> Result<Vec<MedicalFileResponseDto>> {
        let category = match query.category.as_deref().filter(|c| !c.is_empty()) {
            Some(raw) => match raw.parse::<FileCategory>() {
                Ok(category) => Some(category),
                Err(_) => {
                    // No row can carry an unknown category
                    debug!("Unknown category filter '{}', returning no files", raw);
                    return Ok(Vec::new());
                }
            },
            None => None,
        };
        let patient_id = query.patient_id.as_deref().filter(|p| !p.is_empty());

        let files = sqlx::query_as::<_, MedicalFile>(&format!(
            r#"
            SELECT {MEDICAL_FILE_COLUMNS}
            FROM medical_files
            WHERE ($1::text IS NULL OR patient_id = $1)
              AND ($2::file_category IS NULL OR category = $2)
            ORDER BY uploaded_at DESC
            "#
        ))
        .bind(patient_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list medical files: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(self.attach_links(files).await)
    }

    /// Convert rows to DTOs with temporary links
    ///
    /// Link failures are logged and leave `access_url` empty; they never fail the listing.
    pub async fn attach_links(&self, files: Vec<MedicalFile>) -> Vec<MedicalFileResponseDto> {
        let mut items = Vec::with_capacity(files.len());

        for file in files {
            let access_url = if self.storage.is_configured() {
                match self
                    .storage
                    .temporary_link(&file.storage_key, TEMPORARY_LINK_TTL)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(
                            "Failed to generate temporary link for {}: {}",
                            file.storage_key, e
                        );
                        None
                    }
                }
            } else {
                None
            };

            let mut dto = MedicalFileResponseDto::from(file);
            dto.access_url = access_url;
            items.push(dto);
        }

        items
    }

    async fn find(&self, file_id: Uuid) -> Result<MedicalFile> {
        let file = sqlx::query_as::<_, MedicalFile>(&format!(
            "SELECT {MEDICAL_FILE_COLUMNS} FROM medical_files WHERE id = $1"
        ))
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;

        file.ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Delete the stored object and the metadata row
    ///
    /// Object deletion is best effort: a failure (or disabled storage) is
    /// logged and the metadata row is still removed.
    pub async fn delete(&self, file_id: Uuid) -> Result<()> {
        let file = self.find(file_id).await?;

        match self.storage.delete(&file.storage_key).await {
            Ok(()) => debug!("File deleted from storage: {}", file.storage_key),
            Err(AppError::StorageUnavailable(_)) => warn!(
                "Storage not configured, object '{}' was not deleted",
                file.storage_key
            ),
            Err(e) => warn!(
                "Failed to delete object '{}' from storage: {}",
                file.storage_key, e
            ),
        }

        let result = sqlx::query("DELETE FROM medical_files WHERE id = $1")
            .bind(file.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        info!("File deleted: id={}, key={}", file.id, file.storage_key);
        Ok(())
    }
}
