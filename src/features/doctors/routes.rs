use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::doctors::handlers;
use crate::features::doctors::services::DoctorService;

/// Create routes for the doctors feature
pub fn routes(service: Arc<DoctorService>) -> Router {
    Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{id}", get(handlers::get_doctor))
        .with_state(service)
}
