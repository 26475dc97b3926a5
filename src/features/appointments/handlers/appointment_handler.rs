use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::appointments::dtos::{
    AppointmentResponseDto, CreateAppointmentDto, DoctorAppointmentDto, DoctorAppointmentsQuery,
    ListAppointmentsQuery,
};
use crate::features::appointments::services::AppointmentService;
use crate::features::appointments::time_filter::AppointmentTimeFilter;
use crate::shared::types::ApiResponse;

/// Book an appointment
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = CreateAppointmentDto,
    responses(
        (status = 201, description = "Appointment booked", body = ApiResponse<AppointmentResponseDto>),
        (status = 400, description = "Invalid body, invalid date, past date or unknown doctor")
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(service): State<Arc<AppointmentService>>,
    AppJson(dto): AppJson<CreateAppointmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentResponseDto>>)> {
    let appointment = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(appointment),
            Some("Appointment booked successfully".to_string()),
            None,
        )),
    ))
}

/// List appointments
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    params(ListAppointmentsQuery),
    responses(
        (status = 200, description = "Appointments, earliest first", body = ApiResponse<Vec<AppointmentResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(service): State<Arc<AppointmentService>>,
    AppQuery(query): AppQuery<ListAppointmentsQuery>,
) -> Result<Json<ApiResponse<Vec<AppointmentResponseDto>>>> {
    let appointments = service.list(&query).await?;
    Ok(Json(ApiResponse::list(appointments)))
}

/// List a doctor's appointments
///
/// Each appointment carries its most recent prescription, if any.
#[utoipa::path(
    get,
    path = "/api/v1/appointments/doctor/{doctor_id}",
    params(
        ("doctor_id" = String, Path, description = "Doctor id"),
        DoctorAppointmentsQuery
    ),
    responses(
        (status = 200, description = "Appointments, latest first", body = ApiResponse<Vec<DoctorAppointmentDto>>),
        (status = 400, description = "Invalid doctor id")
    ),
    tag = "appointments"
)]
pub async fn list_doctor_appointments(
    State(service): State<Arc<AppointmentService>>,
    Path(doctor_id): Path<String>,
    AppQuery(query): AppQuery<DoctorAppointmentsQuery>,
) -> Result<Json<ApiResponse<Vec<DoctorAppointmentDto>>>> {
    let doctor_id = Uuid::parse_str(&doctor_id)
        .map_err(|_| AppError::BadRequest("Invalid doctor id".to_string()))?;
    let filter = AppointmentTimeFilter::parse(query.filter.as_deref());

    let appointments = service.list_for_doctor(doctor_id, filter).await?;
    Ok(Json(ApiResponse::list(appointments)))
}
