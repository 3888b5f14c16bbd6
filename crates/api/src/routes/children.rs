use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::children, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/children",
            get(children::list_children).post(children::create_child),
        )
        .route("/api/children/:id", get(children::get_child))
}
