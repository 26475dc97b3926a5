use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::doctors::dtos::{DoctorResponseDto, ListDoctorsQuery};
use crate::features::doctors::models::Doctor;
use crate::shared::search::contains_pattern;

/// Service for doctor operations
pub struct DoctorService {
    pool: PgPool,
}

impl DoctorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List doctors, best rated first
    pub async fn list(&self, query: &ListDoctorsQuery) -> Result<Vec<DoctorResponseDto>> {
        let doctors = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, specialty, location, rating, price_per_hour, avatar, experience_years, languages
            FROM doctors
            WHERE ($1::text IS NULL OR specialty ILIKE $1)
              AND ($2::text IS NULL OR location ILIKE $2)
            ORDER BY rating DESC, name ASC
            "#,
        )
        .bind(contains_pattern(query.specialty.as_deref()))
        .bind(contains_pattern(query.location.as_deref()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list doctors: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    /// Get doctor by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<DoctorResponseDto> {
        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, specialty, location, rating, price_per_hour, avatar, experience_years, languages
            FROM doctors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get doctor by id: {:?}", e);
            AppError::Database(e)
        })?;

        doctor
            .map(|d| d.into())
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))
    }
}
