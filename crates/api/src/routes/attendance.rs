use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers::attendance, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/sessions/:id/attendance",
            put(attendance::update_attendance),
        )
        .route("/api/attendance/:date", get(attendance::daily_roster))
}
