//! Storage module for medical file objects
//!
//! Provides the `ObjectStore` seam, its S3-compatible implementation and the
//! `StorageGateway` used by services for upload, temporary links and delete.

mod gateway;
mod object_store;
mod s3_client;

pub use gateway::StorageGateway;
pub use object_store::{ObjectMetadata, ObjectStore};
pub use s3_client::S3Client;
