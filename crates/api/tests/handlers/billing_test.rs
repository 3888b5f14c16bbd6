use axum::http::StatusCode;
use daycare_core::{
    billing::{BillingSummary, MonthlyStatement},
    models::session::Session,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{schedule, TestContext};

#[tokio::test]
async fn test_statement_excludes_cancelled_sessions() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Noor").await;
    let monday = ctx.create_slot(1, "07:00", "11:00", Some(service_id)).await;
    let subscription_id = ctx
        .create_subscription(child_id, service_id, schedule(&[(1, monday)]), 2, 2024)
        .await;
    let sessions_url = format!("/api/subscriptions/{}/sessions", subscription_id);

    ctx.server
        .post(&sessions_url)
        .add_query_param("months", 2)
        .await
        .assert_status(StatusCode::CREATED);
    let sessions = ctx.server.get(&sessions_url).await.json::<Vec<Session>>();

    ctx.server
        .put(&format!("/api/sessions/{}/attendance", sessions[0].id))
        .json(&json!({ "status": "cancelled", "notes": "Family trip" }))
        .await
        .assert_status_ok();
    ctx.server
        .put(&format!("/api/sessions/{}/attendance", sessions[1].id))
        .json(&json!({ "status": "no_show", "notes": null }))
        .await
        .assert_status_ok();

    let statement = ctx
        .server
        .get(&format!(
            "/api/subscriptions/{}/statement/2024/2",
            subscription_id
        ))
        .await
        .json::<MonthlyStatement>();

    // Four Mondays in February 2024, one cancelled.
    assert_eq!(statement.cancelled, 1);
    assert_eq!(statement.no_show, 1);
    assert_eq!(statement.billable_sessions, 3);
    assert_eq!(statement.total_cents, 3 * 4500);
}

#[tokio::test]
async fn test_monthly_summary_totals_every_subscription() {
    let ctx = TestContext::new().await;
    let preschool = ctx.create_service("Preschool", 4500).await;
    let toddlers = ctx.create_service("Toddlers", 6000).await;
    let first_child = ctx.create_child("Noor").await;
    let second_child = ctx.create_child("Tomas").await;
    let monday = ctx.create_slot(1, "07:00", "11:00", Some(preschool)).await;
    let friday = ctx.create_slot(5, "07:00", "11:00", Some(toddlers)).await;

    for (child_id, service_id, assignment) in [
        (first_child, preschool, (1, monday)),
        (second_child, toddlers, (5, friday)),
    ] {
        let subscription_id = ctx
            .create_subscription(child_id, service_id, schedule(&[assignment]), 2, 2024)
            .await;
        ctx.server
            .post(&format!("/api/subscriptions/{}/sessions", subscription_id))
            .add_query_param("months", 1)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let summary = ctx
        .server
        .get("/api/billing/2024/2")
        .await
        .json::<BillingSummary>();

    // February 2024: four Mondays, four Fridays.
    assert_eq!(summary.statements.len(), 2);
    assert_eq!(summary.billable_sessions, 8);
    assert_eq!(summary.total_cents, 4 * 4500 + 4 * 6000);
}

#[tokio::test]
async fn test_billing_rejects_invalid_month() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/api/billing/2024/13")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_rate_above_limit_is_rejected() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/api/services")
        .json(&json!({
            "name": "Overnight",
            "description": null,
            "session_rate_cents": i64::MAX,
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
