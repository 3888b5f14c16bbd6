use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::{billing, subscriptions},
    ApiState,
};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/subscriptions",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/api/subscriptions/:id", get(subscriptions::get_subscription))
        .route(
            "/api/subscriptions/:id/schedule",
            put(subscriptions::update_schedule),
        )
        .route(
            "/api/subscriptions/:id/status",
            put(subscriptions::update_status),
        )
        .route(
            "/api/subscriptions/:id/sessions",
            get(subscriptions::list_sessions).post(subscriptions::generate_sessions),
        )
        .route(
            "/api/subscriptions/:id/statement/:year/:month",
            get(billing::subscription_statement),
        )
}
