use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::prescriptions::dtos::{
    CreatePrescriptionDto, DoctorPrescriptionDto, ListDoctorPrescriptionsQuery,
    PrescriptionResponseDto,
};
use crate::features::prescriptions::models::{Prescription, PrescriptionWithAppointment};
use crate::shared::search::contains_pattern;

/// Service for prescription operations
pub struct PrescriptionService {
    pool: PgPool,
}

impl PrescriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a prescription for an existing appointment
    pub async fn create(&self, dto: CreatePrescriptionDto) -> Result<PrescriptionResponseDto> {
        dto.validate()?;

        let (doctor_id, patient_name) = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT doctor_id, patient_name FROM appointments WHERE id = $1",
        )
        .bind(dto.appointment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch appointment: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        let prescription = sqlx::query_as::<_, Prescription>(
            r#"
            INSERT INTO prescriptions (id, appointment_id, doctor_id, patient_name, medications, dosage, instructions)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, appointment_id, doctor_id, patient_name, medications, dosage, instructions, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dto.appointment_id)
        .bind(doctor_id)
        .bind(&patient_name)
        .bind(&dto.medications)
        .bind(&dto.dosage)
        .bind(&dto.instructions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create prescription: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "Prescription created: id={}, appointment={}",
            prescription.id, prescription.appointment_id
        );

        Ok(prescription.into())
    }

    /// List a doctor's prescriptions, newest first
    pub async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
        query: &ListDoctorPrescriptionsQuery,
    ) -> Result<Vec<DoctorPrescriptionDto>> {
        let rows = sqlx::query_as::<_, PrescriptionWithAppointment>(
            r#"
            SELECT p.id, p.appointment_id, p.doctor_id, p.patient_name, p.medications, p.dosage,
                   p.instructions, p.created_at,
                   a.date_time AS appointment_date,
                   a.duration_minutes AS appointment_duration,
                   a.status AS appointment_status
            FROM prescriptions p
            LEFT JOIN appointments a ON p.appointment_id = a.id
            WHERE p.doctor_id = $1
              AND ($2::text IS NULL OR p.patient_name ILIKE $2)
              AND ($3::text IS NULL OR p.medications ILIKE $3)
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(doctor_id)
        .bind(contains_pattern(query.patient.as_deref()))
        .bind(contains_pattern(query.medication.as_deref()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list prescriptions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn seed_appointment(pool: &PgPool, patient_name: &str) -> (Uuid, Uuid) {
        let doctor_id: Uuid = sqlx::query_scalar(
            "INSERT INTO doctors (name, specialty, location) VALUES ('Dr. Who', 'General', 'Paris') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();

        let appointment_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO appointments (id, doctor_id, patient_name, patient_email, date_time, duration_minutes) \
             VALUES ($1, $2, $3, 'patient@example.com', $4, 30)",
        )
        .bind(appointment_id)
        .bind(doctor_id)
        .bind(patient_name)
        .bind(Utc::now() + Duration::days(1))
        .execute(pool)
        .await
        .unwrap();

        (doctor_id, appointment_id)
    }

    fn create_dto(appointment_id: Uuid, medications: &str) -> CreatePrescriptionDto {
        CreatePrescriptionDto {
            appointment_id,
            medications: medications.to_string(),
            dosage: "twice a day".to_string(),
            instructions: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_lookup() {
        let service = PrescriptionService::new(crate::shared::test_helpers::lazy_pool());
        let result = service.create(create_dto(Uuid::new_v4(), "")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_create_copies_appointment_fields(pool: PgPool) {
        let (doctor_id, appointment_id) = seed_appointment(&pool, "Jane Doe").await;
        let service = PrescriptionService::new(pool);

        let prescription = service
            .create(create_dto(appointment_id, "Amoxicillin"))
            .await
            .unwrap();

        assert_eq!(prescription.doctor_id, doctor_id);
        assert_eq!(prescription.patient_name, "Jane Doe");
        assert_eq!(prescription.instructions, "");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_create_for_unknown_appointment_is_not_found(pool: PgPool) {
        let service = PrescriptionService::new(pool);
        let result = service.create(create_dto(Uuid::new_v4(), "Amoxicillin")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_list_for_doctor_filters_and_joins(pool: PgPool) {
        let (doctor_id, appointment_id) = seed_appointment(&pool, "Jane Doe").await;
        let service = PrescriptionService::new(pool);

        service
            .create(create_dto(appointment_id, "Amoxicillin 500mg"))
            .await
            .unwrap();
        service
            .create(create_dto(appointment_id, "Ibuprofen"))
            .await
            .unwrap();

        let all = service
            .list_for_doctor(doctor_id, &ListDoctorPrescriptionsQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].prescription.medications, "Ibuprofen");
        assert_eq!(all[0].appointment_duration, Some(30));
        assert_eq!(all[0].appointment_status.as_deref(), Some("confirmed"));

        let filtered = service
            .list_for_doctor(
                doctor_id,
                &ListDoctorPrescriptionsQuery {
                    patient: Some("jane".to_string()),
                    medication: Some("AMOXI".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].prescription.medications, "Amoxicillin 500mg");
    }
}
