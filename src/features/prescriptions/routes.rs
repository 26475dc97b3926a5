use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::prescriptions::handlers;
use crate::features::prescriptions::services::PrescriptionService;

/// Create routes for the prescriptions feature
pub fn routes(service: Arc<PrescriptionService>) -> Router {
    Router::new()
        .route("/prescriptions", post(handlers::create_prescription))
        .route(
            "/prescriptions/doctor/{doctor_id}",
            get(handlers::list_doctor_prescriptions),
        )
        .with_state(service)
}
