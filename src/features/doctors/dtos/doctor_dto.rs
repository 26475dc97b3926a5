use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::doctors::models::Doctor;

/// Response DTO for doctor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorResponseDto {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub location: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 4.8)]
    pub rating: Decimal,
    pub price_per_hour: i32,
    pub avatar: String,
    pub experience_years: i32,
    pub languages: String,
}

impl From<Doctor> for DoctorResponseDto {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialty: d.specialty,
            location: d.location,
            rating: d.rating,
            price_per_hour: d.price_per_hour,
            avatar: d.avatar,
            experience_years: d.experience_years,
            languages: d.languages,
        }
    }
}

/// Query params for listing doctors
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDoctorsQuery {
    /// Case-insensitive substring of the specialty
    pub specialty: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
}
