use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::health::handlers;
use crate::modules::storage::StorageGateway;

/// Create routes for the health feature
pub fn routes(storage: Arc<StorageGateway>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(storage)
}
