use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness check payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "doktolib-backend")]
    pub service: String,
    /// Whether object storage is configured
    pub storage_enabled: bool,
}
