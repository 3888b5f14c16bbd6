use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::billing, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/billing/:year/:month", get(billing::monthly_summary))
}
