use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::prescriptions::models::Prescription;

/// Database model for appointment
#[derive(Debug, Clone, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Appointment row with the columns of its latest prescription, if any
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentWithPrescription {
    #[sqlx(flatten)]
    pub appointment: Appointment,
    pub prescription_id: Option<Uuid>,
    pub prescription_medications: Option<String>,
    pub prescription_dosage: Option<String>,
    pub prescription_instructions: Option<String>,
    pub prescription_created_at: Option<DateTime<Utc>>,
}

impl AppointmentWithPrescription {
    pub fn prescription(&self) -> Option<Prescription> {
        Some(Prescription {
            id: self.prescription_id?,
            appointment_id: self.appointment.id,
            doctor_id: self.appointment.doctor_id,
            patient_name: self.appointment.patient_name.clone(),
            medications: self.prescription_medications.clone().unwrap_or_default(),
            dosage: self.prescription_dosage.clone().unwrap_or_default(),
            instructions: self.prescription_instructions.clone().unwrap_or_default(),
            created_at: self.prescription_created_at?,
        })
    }
}
