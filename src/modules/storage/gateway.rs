use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::files::classifier::FileCategory;
use crate::modules::storage::object_store::{ObjectMetadata, ObjectStore};
use crate::shared::file_name::extension;

/// Root prefix for every medical file object
pub const STORAGE_KEY_ROOT: &str = "medical-files";

/// Gateway between services and the object store
///
/// A gateway built with [`StorageGateway::disabled`] has no backend: every
/// operation fails with `AppError::StorageUnavailable` and the rest of the
/// API keeps working.
pub struct StorageGateway {
    backend: Option<Arc<dyn ObjectStore>>,
    operation_timeout: Duration,
}

impl StorageGateway {
    pub fn new(backend: Arc<dyn ObjectStore>, operation_timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            operation_timeout,
        }
    }

    pub fn disabled() -> Self {
        Self {
            backend: None,
            operation_timeout: Duration::ZERO,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&Arc<dyn ObjectStore>, AppError> {
        self.backend.as_ref().ok_or_else(|| {
            AppError::StorageUnavailable("object storage client is not configured".to_string())
        })
    }

    /// Build a fresh storage key: `medical-files/{category}/{owner_id}/{uuid}{.ext}`
    ///
    /// The extension is taken from `file_name` and lowercased; names without
    /// an extension produce a key without one.
    pub fn build_key(category: FileCategory, owner_id: &str, file_name: &str) -> String {
        let extension = extension(file_name)
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        format!(
            "{}/{}/{}/{}{}",
            STORAGE_KEY_ROOT,
            category.as_str(),
            owner_id,
            Uuid::new_v4(),
            extension
        )
    }

    async fn with_deadline<T, F>(
        &self,
        operation: F,
        on_timeout: impl FnOnce(String) -> AppError,
    ) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.operation_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(format!(
                "storage call exceeded {:?} deadline",
                self.operation_timeout
            ))),
        }
    }

    /// Upload file bytes and return the storage key
    ///
    /// Single attempt: a failure surfaces immediately to the caller.
    pub async fn upload(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: &str,
        owner_id: &str,
        category: FileCategory,
    ) -> Result<String, AppError> {
        let backend = self.backend()?;
        let key = Self::build_key(category, owner_id, file_name);
        let metadata = ObjectMetadata {
            patient_id: owner_id.to_string(),
            category,
            original_name: file_name.to_string(),
        };

        self.with_deadline(
            backend.put_object(&key, data, content_type, &metadata),
            AppError::UploadFailed,
        )
        .await?;

        info!(
            "Stored object: key={}, bucket={}, size={}",
            key,
            backend.bucket_name(),
            data.len()
        );
        Ok(key)
    }

    /// Signed URL granting read access to `key` for `ttl`
    pub async fn temporary_link(&self, key: &str, ttl: Duration) -> Result<String, AppError> {
        let backend = self.backend()?;
        self.with_deadline(backend.presign_get(key, ttl), AppError::Internal)
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let backend = self.backend()?;
        self.with_deadline(backend.delete_object(key), AppError::DeleteFailed)
            .await?;

        debug!("Deleted object: key={}", key);
        Ok(())
    }
}
