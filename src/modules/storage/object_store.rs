use std::time::Duration;

use async_trait::async_trait;

use crate::core::error::AppError;
use crate::features::files::classifier::FileCategory;

/// Metadata tags attached to every stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub patient_id: String,
    pub category: FileCategory,
    pub original_name: String,
}

/// Bucket-style object store
///
/// Implementations must be safe to share between concurrent requests.
/// Errors are reported as `AppError::UploadFailed` / `AppError::DeleteFailed`
/// for writes and deletes, `AppError::Internal` for link generation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` with server-side encryption and metadata tags
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), AppError>;

    /// Presigned GET URL valid for `expires_in`
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AppError>;

    async fn delete_object(&self, key: &str) -> Result<(), AppError>;

    fn bucket_name(&self) -> String;
}
