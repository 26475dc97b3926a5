use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for doctor
#[derive(Debug, Clone, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub location: String,
    /// NUMERIC(2,1), e.g. 4.8
    pub rating: Decimal,
    pub price_per_hour: i32,
    pub avatar: String,
    pub experience_years: i32,
    /// Comma separated, as entered
    pub languages: String,
}
