use axum::http::StatusCode;
use daycare_core::models::session::{RosterEntry, Session, SessionStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{schedule, TestContext};

async fn generated_february() -> (TestContext, Vec<Session>) {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Lena").await;
    let thursday_slot = ctx.create_slot(4, "08:30", "12:30", Some(service_id)).await;
    let subscription_id = ctx
        .create_subscription(child_id, service_id, schedule(&[(4, thursday_slot)]), 2, 2024)
        .await;

    let url = format!("/api/subscriptions/{}/sessions", subscription_id);
    ctx.server
        .post(&url)
        .add_query_param("months", 1)
        .await
        .assert_status(StatusCode::CREATED);
    let sessions = ctx.server.get(&url).await.json::<Vec<Session>>();

    (ctx, sessions)
}

#[tokio::test]
async fn test_mark_session_completed_with_notes() {
    let (ctx, sessions) = generated_february().await;
    let first = &sessions[0];

    let response = ctx
        .server
        .put(&format!("/api/sessions/{}/attendance", first.id))
        .json(&json!({ "status": "completed", "notes": "Picked up early" }))
        .await;

    response.assert_status_ok();
    let session = response.json::<Session>();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.notes.as_deref(), Some("Picked up early"));

    let again = ctx
        .server
        .put(&format!("/api/sessions/{}/attendance", first.id))
        .json(&json!({ "status": "no_show", "notes": null }))
        .await
        .json::<Session>();
    assert_eq!(again.status, SessionStatus::NoShow);
    assert_eq!(again.notes.as_deref(), Some("Picked up early"));
}

#[tokio::test]
async fn test_attendance_for_unknown_session_is_not_found() {
    let ctx = TestContext::new().await;

    ctx.server
        .put("/api/sessions/12345/attendance")
        .json(&json!({ "status": "completed", "notes": null }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_daily_roster_lists_child_and_service() {
    let (ctx, _) = generated_february().await;

    let response = ctx.server.get("/api/attendance/2024-02-01").await;

    response.assert_status_ok();
    let roster = response.json::<Vec<RosterEntry>>();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].child_name, "Lena Okafor");
    assert_eq!(roster[0].service_name, "Preschool");
    assert_eq!(roster[0].status, SessionStatus::Scheduled);

    let friday = ctx.server.get("/api/attendance/2024-02-02").await;
    assert!(friday.json::<Vec<RosterEntry>>().is_empty());
}

#[tokio::test]
async fn test_roster_with_bad_date_is_bad_request() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/api/attendance/02-01-2024")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
