use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::doctors::dtos::{DoctorResponseDto, ListDoctorsQuery};
use crate::features::doctors::services::DoctorService;
use crate::shared::types::ApiResponse;

/// List doctors
///
/// Ordered by rating (best first), then name.
#[utoipa::path(
    get,
    path = "/api/v1/doctors",
    params(ListDoctorsQuery),
    responses(
        (status = 200, description = "List of doctors", body = ApiResponse<Vec<DoctorResponseDto>>),
    ),
    tag = "doctors"
)]
pub async fn list_doctors(
    State(service): State<Arc<DoctorService>>,
    AppQuery(query): AppQuery<ListDoctorsQuery>,
) -> Result<Json<ApiResponse<Vec<DoctorResponseDto>>>> {
    let doctors = service.list(&query).await?;
    Ok(Json(ApiResponse::list(doctors)))
}

/// Get doctor by id
#[utoipa::path(
    get,
    path = "/api/v1/doctors/{id}",
    params(
        ("id" = String, Path, description = "Doctor id")
    ),
    responses(
        (status = 200, description = "Doctor found", body = ApiResponse<DoctorResponseDto>),
        (status = 404, description = "Doctor not found")
    ),
    tag = "doctors"
)]
pub async fn get_doctor(
    State(service): State<Arc<DoctorService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DoctorResponseDto>>> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound("Doctor not found".to_string()))?;
    let doctor = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(doctor), None, None)))
}
