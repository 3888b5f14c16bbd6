use std::sync::Arc;

use axum_test::TestServer;
use daycare_api::{build_router, ApiState};
use daycare_core::scheduling::generator::SessionGenerator;
use daycare_db::mock::create_test_pool;
use serde_json::{json, Value};

pub struct TestContext {
    pub server: TestServer,
}

impl TestContext {
    /// Router over a fresh in-memory database, generating three months by default.
    pub async fn new() -> Self {
        let pool = create_test_pool().await.expect("test pool");
        let state = Arc::new(ApiState::new(pool, SessionGenerator::default(), 3));
        let server = TestServer::new(build_router(state)).expect("test server");
        Self { server }
    }

    pub async fn create_service(&self, name: &str, rate_cents: i64) -> i64 {
        let response = self
            .server
            .post("/api/services")
            .json(&json!({
                "name": name,
                "description": null,
                "session_rate_cents": rate_cents,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("service id")
    }

    pub async fn create_child(&self, first_name: &str) -> i64 {
        let response = self
            .server
            .post("/api/children")
            .json(&json!({
                "first_name": first_name,
                "last_name": "Okafor",
                "birthdate": "2021-03-14",
                "guardian_email": "guardian@example.com",
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("child id")
    }

    pub async fn post_slot(
        &self,
        day_of_week: u8,
        start: &str,
        end: &str,
        service_id: Option<i64>,
    ) -> axum_test::TestResponse {
        self.server
            .post("/api/slots")
            .json(&json!({
                "day_of_week": day_of_week,
                "start_time": start,
                "end_time": end,
                "service_id": service_id,
            }))
            .await
    }

    pub async fn create_slot(
        &self,
        day_of_week: u8,
        start: &str,
        end: &str,
        service_id: Option<i64>,
    ) -> i64 {
        let response = self.post_slot(day_of_week, start, end, service_id).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("slot id")
    }

    pub async fn create_subscription(
        &self,
        child_id: i64,
        service_id: i64,
        schedule: Value,
        start_month: u32,
        start_year: i32,
    ) -> i64 {
        let response = self
            .server
            .post("/api/subscriptions")
            .json(&json!({
                "child_id": child_id,
                "service_id": service_id,
                "weekly_schedule": schedule,
                "start_month": start_month,
                "start_year": start_year,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("subscription id")
    }
}

/// Seven-key weekly schedule with the given `(day, slot)` assignments.
pub fn schedule(assignments: &[(u8, i64)]) -> Value {
    let mut map = serde_json::Map::new();
    for day in 0..7u8 {
        let slot = assignments
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, slot)| json!(slot))
            .unwrap_or(Value::Null);
        map.insert(day.to_string(), slot);
    }
    Value::Object(map)
}
