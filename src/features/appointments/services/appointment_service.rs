use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::appointments::dtos::{
    AppointmentResponseDto, CreateAppointmentDto, DoctorAppointmentDto, ListAppointmentsQuery,
};
use crate::features::appointments::models::{Appointment, AppointmentWithPrescription};
use crate::features::appointments::time_filter::AppointmentTimeFilter;
use crate::shared::constants::APPOINTMENT_STATUS_CONFIRMED;

/// Service for appointment operations
pub struct AppointmentService {
    pool: PgPool,
}

/// Parse and check a requested slot against `now`
fn parse_slot(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let date_time = DateTime::parse_from_rfc3339(raw)
        .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))?
        .with_timezone(&Utc);

    if date_time < now {
        return Err(AppError::BadRequest(
            "Cannot book appointments in the past".to_string(),
        ));
    }

    Ok(date_time)
}

impl AppointmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Book an appointment
    ///
    /// No availability check is made; an unknown doctor is rejected by the
    /// foreign key.
    pub async fn create(&self, dto: CreateAppointmentDto) -> Result<AppointmentResponseDto> {
        dto.validate()?;
        let date_time = parse_slot(&dto.date_time, Utc::now())?;

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, doctor_id, patient_name, patient_email, date_time, duration_minutes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, doctor_id, patient_name, patient_email, date_time, duration_minutes, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dto.doctor_id)
        .bind(&dto.patient_name)
        .bind(&dto.patient_email)
        .bind(date_time)
        .bind(dto.duration_minutes)
        .bind(APPOINTMENT_STATUS_CONFIRMED)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::BadRequest("Doctor does not exist".to_string())
            }
            e => {
                tracing::error!("Failed to create appointment: {:?}", e);
                AppError::Database(e)
            }
        })?;

        info!(
            "Appointment booked: id={}, doctor={}, at={}",
            appointment.id, appointment.doctor_id, appointment.date_time
        );

        Ok(appointment.into())
    }

    /// List appointments, earliest first
    pub async fn list(&self, query: &ListAppointmentsQuery) -> Result<Vec<AppointmentResponseDto>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, doctor_id, patient_name, patient_email, date_time, duration_minutes, status, created_at
            FROM appointments
            WHERE ($1::uuid IS NULL OR doctor_id = $1)
            ORDER BY date_time ASC
            "#,
        )
        .bind(query.doctor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list appointments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// List a doctor's appointments, latest first, each with its newest prescription
    pub async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
        filter: AppointmentTimeFilter,
    ) -> Result<Vec<DoctorAppointmentDto>> {
        let (from, until) = filter.bounds(Utc::now());

        let rows = sqlx::query_as::<_, AppointmentWithPrescription>(
            r#"
            SELECT a.id, a.doctor_id, a.patient_name, a.patient_email, a.date_time,
                   a.duration_minutes, a.status, a.created_at,
                   p.id AS prescription_id,
                   p.medications AS prescription_medications,
                   p.dosage AS prescription_dosage,
                   p.instructions AS prescription_instructions,
                   p.created_at AS prescription_created_at
            FROM appointments a
            LEFT JOIN LATERAL (
                SELECT id, medications, dosage, instructions, created_at
                FROM prescriptions
                WHERE appointment_id = a.id
                ORDER BY created_at DESC
                LIMIT 1
            ) p ON TRUE
            WHERE a.doctor_id = $1
              AND ($2::timestamptz IS NULL OR a.date_time >= $2)
              AND ($3::timestamptz IS NULL OR a.date_time < $3)
            ORDER BY a.date_time DESC
            "#,
        )
        .bind(doctor_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list doctor appointments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
