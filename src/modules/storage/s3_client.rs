//! S3-compatible storage client
//!
//! Uploads, presigned URL generation and deletes against AWS S3 or any
//! S3-compatible service (MinIO) via the rust-s3 crate.

use std::time::Duration;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use crate::core::config::StorageCredentials;
use crate::core::error::AppError;
use crate::modules::storage::object_store::{ObjectMetadata, ObjectStore};

const SERVER_SIDE_ENCRYPTION: &str = "AES256";

/// Longest validity S3 accepts for a presigned URL (7 days)
const MAX_PRESIGN_SECS: u64 = 7 * 24 * 60 * 60;

/// S3-compatible storage client
pub struct S3Client {
    bucket: Box<Bucket>,
}

impl S3Client {
    /// Create a new client for the configured bucket
    ///
    /// With a custom `endpoint` the client uses path-style URLs
    /// (http://endpoint/bucket instead of http://bucket.endpoint).
    pub fn new(
        credentials: StorageCredentials,
        region: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, AppError> {
        let s3_credentials = Credentials::new(
            Some(&credentials.access_key_id),
            Some(&credentials.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create S3 credentials: {}", e)))?;

        let s3_region = match endpoint {
            Some(endpoint) => Region::Custom {
                region: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => region
                .parse::<Region>()
                .map_err(|e| AppError::Internal(format!("Invalid AWS region '{}': {}", region, e)))?,
        };

        let mut bucket = Bucket::new(&credentials.bucket, s3_region, s3_credentials)
            .map_err(|e| AppError::Internal(format!("Failed to create S3 bucket handle: {}", e)))?;

        if endpoint.is_some() {
            bucket.set_path_style();
        }

        info!(
            "S3 client initialized for bucket: {}, region: {}, endpoint: {}",
            bucket.name(),
            region,
            endpoint.unwrap_or("aws")
        );

        Ok(Self { bucket })
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), AppError> {
        // Headers on a per-upload copy so concurrent uploads never share tags
        let mut bucket = self.bucket.clone();
        bucket.add_header("x-amz-server-side-encryption", SERVER_SIDE_ENCRYPTION);
        bucket.add_header("x-amz-meta-patient-id", &metadata.patient_id);
        bucket.add_header("x-amz-meta-category", metadata.category.as_str());
        bucket.add_header(
            "x-amz-meta-original-name",
            &urlencoding::encode(&metadata.original_name),
        );

        let response = bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| AppError::UploadFailed(format!("Failed to upload '{}': {}", key, e)))?;

        if !is_success(response.status_code()) {
            return Err(AppError::UploadFailed(format!(
                "Upload of '{}' rejected with status {}",
                key,
                response.status_code()
            )));
        }

        debug!("Uploaded object '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        let expiry_secs = expires_in.as_secs().clamp(1, MAX_PRESIGN_SECS) as u32;

        self.bucket
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to generate presigned URL for '{}': {}",
                    key, e
                ))
            })
    }

    async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::DeleteFailed(format!("Failed to delete '{}': {}", key, e)))?;

        if !is_success(response.status_code()) {
            return Err(AppError::DeleteFailed(format!(
                "Delete of '{}' rejected with status {}",
                key,
                response.status_code()
            )));
        }

        debug!("Deleted object '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> StorageCredentials {
        StorageCredentials {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            bucket: "medical-files-test".to_string(),
        }
    }

    #[test]
    fn test_new_with_aws_region() {
        let client = S3Client::new(credentials(), "eu-west-3", None).unwrap();
        assert_eq!(client.bucket_name(), "medical-files-test");
    }

    #[test]
    fn test_new_with_custom_endpoint() {
        let client =
            S3Client::new(credentials(), "us-east-1", Some("http://localhost:9000")).unwrap();
        assert_eq!(client.bucket_name(), "medical-files-test");
    }

    #[tokio::test]
    async fn test_presign_get_is_signed_for_key() {
        let client =
            S3Client::new(credentials(), "us-east-1", Some("http://localhost:9000")).unwrap();
        let url = client
            .presign_get(
                "medical-files/lab_results/p-1/abc.pdf",
                Duration::from_secs(3600),
            )
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:9000/medical-files-test/"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[test]
    fn test_is_success() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(403));
        assert!(!is_success(500));
    }
}
