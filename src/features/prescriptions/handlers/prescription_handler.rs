use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::prescriptions::dtos::{
    CreatePrescriptionDto, DoctorPrescriptionDto, ListDoctorPrescriptionsQuery,
    PrescriptionResponseDto,
};
use crate::features::prescriptions::services::PrescriptionService;
use crate::shared::types::ApiResponse;

/// Create a prescription for an appointment
#[utoipa::path(
    post,
    path = "/api/v1/prescriptions",
    request_body = CreatePrescriptionDto,
    responses(
        (status = 201, description = "Prescription created", body = ApiResponse<PrescriptionResponseDto>),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "prescriptions"
)]
pub async fn create_prescription(
    State(service): State<Arc<PrescriptionService>>,
    AppJson(dto): AppJson<CreatePrescriptionDto>,
) -> Result<(StatusCode, Json<ApiResponse<PrescriptionResponseDto>>)> {
    let prescription = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(prescription),
            Some("Prescription created successfully".to_string()),
            None,
        )),
    ))
}

/// List a doctor's prescriptions
#[utoipa::path(
    get,
    path = "/api/v1/prescriptions/doctor/{doctor_id}",
    params(
        ("doctor_id" = String, Path, description = "Doctor id"),
        ListDoctorPrescriptionsQuery
    ),
    responses(
        (status = 200, description = "Prescriptions, newest first", body = ApiResponse<Vec<DoctorPrescriptionDto>>),
        (status = 400, description = "Invalid doctor id")
    ),
    tag = "prescriptions"
)]
pub async fn list_doctor_prescriptions(
    State(service): State<Arc<PrescriptionService>>,
    Path(doctor_id): Path<String>,
    AppQuery(query): AppQuery<ListDoctorPrescriptionsQuery>,
) -> Result<Json<ApiResponse<Vec<DoctorPrescriptionDto>>>> {
    let doctor_id = Uuid::parse_str(&doctor_id)
        .map_err(|_| AppError::BadRequest("Invalid doctor id".to_string()))?;

    let prescriptions = service.list_for_doctor(doctor_id, &query).await?;
    Ok(Json(ApiResponse::list(prescriptions)))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::prescriptions::routes;
    use crate::shared::test_helpers::{api_router, lazy_pool};

    fn server() -> TestServer {
        let service = Arc::new(PrescriptionService::new(lazy_pool()));
        TestServer::new(api_router(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_bad_request() {
        let response = server()
            .post("/api/v1/prescriptions")
            .json(&json!({ "appointment_id": Uuid::new_v4(), "dosage": "daily" }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_list_with_malformed_doctor_id_is_bad_request() {
        let response = server()
            .get("/api/v1/prescriptions/doctor/abc")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
