use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for prescription
///
/// `doctor_id` and `patient_name` are copied from the appointment at write time.
#[derive(Debug, Clone, FromRow)]
pub struct Prescription {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub medications: String,
    pub dosage: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

/// Prescription row joined with its appointment
#[derive(Debug, Clone, FromRow)]
pub struct PrescriptionWithAppointment {
    #[sqlx(flatten)]
    pub prescription: Prescription,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_duration: Option<i32>,
    pub appointment_status: Option<String>,
}
