use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::appointments::handlers;
use crate::features::appointments::services::AppointmentService;

/// Create routes for the appointments feature
pub fn routes(service: Arc<AppointmentService>) -> Router {
    Router::new()
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/appointments/doctor/{doctor_id}",
            get(handlers::list_doctor_appointments),
        )
        .with_state(service)
}
