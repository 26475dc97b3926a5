use utoipa::{Modify, OpenApi};

use crate::features::appointments::{
    dtos as appointments_dtos, handlers as appointments_handlers,
};
use crate::features::doctors::{dtos as doctors_dtos, handlers as doctors_handlers};
use crate::features::files::{
    classifier::FileCategory, dtos as files_dtos, handlers as files_handlers,
};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::prescriptions::{
    dtos as prescriptions_dtos, handlers as prescriptions_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        // Doctors
        doctors_handlers::list_doctors,
        doctors_handlers::get_doctor,
        // Appointments
        appointments_handlers::create_appointment,
        appointments_handlers::list_appointments,
        appointments_handlers::list_doctor_appointments,
        // Prescriptions
        prescriptions_handlers::create_prescription,
        prescriptions_handlers::list_doctor_prescriptions,
        // Files
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::delete_file,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Health
            health_dtos::HealthResponseDto,
            ApiResponse<health_dtos::HealthResponseDto>,
            // Doctors
            doctors_dtos::DoctorResponseDto,
            ApiResponse<Vec<doctors_dtos::DoctorResponseDto>>,
            ApiResponse<doctors_dtos::DoctorResponseDto>,
            // Appointments
            appointments_dtos::CreateAppointmentDto,
            appointments_dtos::AppointmentResponseDto,
            appointments_dtos::DoctorAppointmentDto,
            ApiResponse<appointments_dtos::AppointmentResponseDto>,
            ApiResponse<Vec<appointments_dtos::AppointmentResponseDto>>,
            ApiResponse<Vec<appointments_dtos::DoctorAppointmentDto>>,
            // Prescriptions
            prescriptions_dtos::CreatePrescriptionDto,
            prescriptions_dtos::PrescriptionResponseDto,
            prescriptions_dtos::DoctorPrescriptionDto,
            ApiResponse<prescriptions_dtos::PrescriptionResponseDto>,
            ApiResponse<Vec<prescriptions_dtos::DoctorPrescriptionDto>>,
            // Files
            FileCategory,
            files_dtos::UploadMedicalFileDto,
            files_dtos::MedicalFileResponseDto,
            files_dtos::DeleteFileResponseDto,
            ApiResponse<files_dtos::MedicalFileResponseDto>,
            ApiResponse<Vec<files_dtos::MedicalFileResponseDto>>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "doctors", description = "Doctor directory"),
        (name = "appointments", description = "Appointment booking and schedules"),
        (name = "prescriptions", description = "Prescriptions written for appointments"),
        (name = "files", description = "Medical file upload and management"),
    ),
    info(
        title = "Doktolib API",
        version = "0.1.0",
        description = "API documentation for the Doktolib backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
