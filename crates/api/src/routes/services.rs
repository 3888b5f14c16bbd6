use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::services, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/services",
            get(services::list_services).post(services::create_service),
        )
        .route("/api/services/:id", get(services::get_service))
}
