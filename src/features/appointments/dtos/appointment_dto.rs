use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::appointments::models::{Appointment, AppointmentWithPrescription};
use crate::features::prescriptions::dtos::PrescriptionResponseDto;

/// Request DTO for booking an appointment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentDto {
    pub doctor_id: Uuid,
    #[validate(length(min = 1, message = "Patient name is required"))]
    #[schema(example = "Jane Doe")]
    pub patient_name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "jane.doe@example.com")]
    pub patient_email: String,
    /// RFC 3339 timestamp, e.g. `2030-05-01T09:30:00Z`
    #[schema(example = "2030-05-01T09:30:00Z")]
    pub date_time: String,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    #[schema(example = 30)]
    pub duration_minutes: i32,
}

/// Response DTO for appointment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponseDto {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponseDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            doctor_id: a.doctor_id,
            patient_name: a.patient_name,
            patient_email: a.patient_email,
            date_time: a.date_time,
            duration_minutes: a.duration_minutes,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

/// Appointment with its most recent prescription
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorAppointmentDto {
    #[serde(flatten)]
    pub appointment: AppointmentResponseDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<PrescriptionResponseDto>,
}

impl From<AppointmentWithPrescription> for DoctorAppointmentDto {
    fn from(row: AppointmentWithPrescription) -> Self {
        let prescription = row.prescription().map(|p| p.into());
        Self {
            appointment: row.appointment.into(),
            prescription,
        }
    }
}

/// Query params for listing appointments
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAppointmentsQuery {
    /// Only appointments with this doctor
    pub doctor_id: Option<Uuid>,
}

/// Query params for a doctor's appointments
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoctorAppointmentsQuery {
    /// `past`, `today` or `future` (UTC days); anything else lists all
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn dto(patient_name: String, patient_email: String, duration_minutes: i32) -> CreateAppointmentDto {
        CreateAppointmentDto {
            doctor_id: Uuid::new_v4(),
            patient_name,
            patient_email,
            date_time: "2030-05-01T09:30:00Z".to_string(),
            duration_minutes,
        }
    }

    #[test]
    fn test_valid_booking_passes_validation() {
        for _ in 0..20 {
            let booking = dto(Name().fake(), SafeEmail().fake(), (1..120).fake());
            assert!(booking.validate().is_ok(), "{:?}", booking);
        }
    }

    #[test]
    fn test_invalid_booking_fields() {
        let errors = dto(String::new(), "not-an-email".to_string(), 0)
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("patient_name"));
        assert!(fields.contains_key("patient_email"));
        assert!(fields.contains_key("duration_minutes"));
    }

    #[test]
    fn test_prescription_omitted_when_absent() {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            patient_name: "Jane Doe".to_string(),
            patient_email: "jane@example.com".to_string(),
            date_time: now,
            duration_minutes: 30,
            status: "confirmed".to_string(),
            created_at: now,
        };
        let row = AppointmentWithPrescription {
            appointment: appointment.clone(),
            prescription_id: None,
            prescription_medications: None,
            prescription_dosage: None,
            prescription_instructions: None,
            prescription_created_at: None,
        };

        let json = serde_json::to_value(DoctorAppointmentDto::from(row)).unwrap();
        assert!(json.get("prescription").is_none());
        assert_eq!(json["status"], "confirmed");

        let prescription_id = Uuid::new_v4();
        let row = AppointmentWithPrescription {
            appointment,
            prescription_id: Some(prescription_id),
            prescription_medications: Some("Ibuprofen".to_string()),
            prescription_dosage: Some("200mg".to_string()),
            prescription_instructions: Some(String::new()),
            prescription_created_at: Some(now),
        };

        let dto = DoctorAppointmentDto::from(row);
        let prescription = dto.prescription.expect("prescription attached");
        assert_eq!(prescription.id, prescription_id);
        assert_eq!(prescription.appointment_id, dto.appointment.id);
        assert_eq!(prescription.patient_name, "Jane Doe");
    }
}
