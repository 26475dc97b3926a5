use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::prescriptions::models::{Prescription, PrescriptionWithAppointment};

/// Request DTO for creating a prescription
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePrescriptionDto {
    pub appointment_id: Uuid,
    #[validate(length(min = 1, message = "Medications are required"))]
    #[schema(example = "Amoxicillin 500mg")]
    pub medications: String,
    #[validate(length(min = 1, message = "Dosage is required"))]
    #[schema(example = "1 capsule 3 times a day")]
    pub dosage: String,
    #[serde(default)]
    pub instructions: String,
}

/// Response DTO for prescription
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionResponseDto {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub medications: String,
    pub dosage: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

impl From<Prescription> for PrescriptionResponseDto {
    fn from(p: Prescription) -> Self {
        Self {
            id: p.id,
            appointment_id: p.appointment_id,
            doctor_id: p.doctor_id,
            patient_name: p.patient_name,
            medications: p.medications,
            dosage: p.dosage,
            instructions: p.instructions,
            created_at: p.created_at,
        }
    }
}

/// Prescription with the date, duration and status of its appointment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorPrescriptionDto {
    #[serde(flatten)]
    pub prescription: PrescriptionResponseDto,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_duration: Option<i32>,
    pub appointment_status: Option<String>,
}

impl From<PrescriptionWithAppointment> for DoctorPrescriptionDto {
    fn from(row: PrescriptionWithAppointment) -> Self {
        Self {
            prescription: row.prescription.into(),
            appointment_date: row.appointment_date,
            appointment_duration: row.appointment_duration,
            appointment_status: row.appointment_status,
        }
    }
}

/// Query params for a doctor's prescriptions
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDoctorPrescriptionsQuery {
    /// Case-insensitive substring of the patient name
    pub patient: Option<String>,
    /// Case-insensitive substring of the medications
    pub medication: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_requires_medications_and_dosage() {
        let dto: CreatePrescriptionDto = serde_json::from_value(serde_json::json!({
            "appointment_id": Uuid::new_v4(),
            "medications": "",
            "dosage": ""
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("medications"));
        assert!(fields.contains_key("dosage"));
        assert_eq!(dto.instructions, "");
    }

    #[test]
    fn test_doctor_prescription_is_flat() {
        let dto = DoctorPrescriptionDto {
            prescription: PrescriptionResponseDto {
                id: Uuid::nil(),
                appointment_id: Uuid::nil(),
                doctor_id: Uuid::nil(),
                patient_name: "Jane Doe".to_string(),
                medications: "Ibuprofen".to_string(),
                dosage: "200mg".to_string(),
                instructions: String::new(),
                created_at: Utc::now(),
            },
            appointment_date: None,
            appointment_duration: Some(30),
            appointment_status: Some("confirmed".to_string()),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["medications"], "Ibuprofen");
        assert_eq!(json["appointment_duration"], 30);
        assert!(json.get("prescription").is_none());
    }
}
