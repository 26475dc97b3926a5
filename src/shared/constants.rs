/// Prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "doktolib-backend";

/// Appointment status assigned on booking
pub const APPOINTMENT_STATUS_CONFIRMED: &str = "confirmed";
