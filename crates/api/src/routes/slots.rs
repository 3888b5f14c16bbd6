use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::slots, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(slots::list_slots).post(slots::create_slot))
        .route("/api/slots/check", post(slots::check_conflict))
        .route(
            "/api/slots/:id",
            get(slots::get_slot)
                .put(slots::update_slot)
                .delete(slots::deactivate_slot),
        )
}
