use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::features::health::dtos::HealthResponseDto;
use crate::modules::storage::StorageGateway;
use crate::shared::constants::SERVICE_NAME;
use crate::shared::types::ApiResponse;

/// Liveness check
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthResponseDto>),
    ),
    tag = "health"
)]
pub async fn health_check(
    State(storage): State<Arc<StorageGateway>>,
) -> Json<ApiResponse<HealthResponseDto>> {
    Json(ApiResponse::success(
        Some(HealthResponseDto {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            service: SERVICE_NAME.to_string(),
            storage_enabled: storage.is_configured(),
        }),
        None,
        None,
    ))
}
