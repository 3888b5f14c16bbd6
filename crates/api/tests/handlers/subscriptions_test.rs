use axum::http::StatusCode;
use daycare_core::{
    models::{
        session::{GenerationReport, Session, SessionStatus},
        subscription::{Subscription, SubscriptionStatus},
    },
    scheduling::calendar::YearMonth,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{schedule, TestContext};

struct Enrolment {
    ctx: TestContext,
    service_id: i64,
    monday_slot: i64,
    subscription_id: i64,
}

async fn monday_enrolment(start_month: u32, start_year: i32) -> Enrolment {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Amara").await;
    let monday_slot = ctx.create_slot(1, "08:00", "12:00", Some(service_id)).await;
    let subscription_id = ctx
        .create_subscription(
            child_id,
            service_id,
            schedule(&[(1, monday_slot)]),
            start_month,
            start_year,
        )
        .await;

    Enrolment {
        ctx,
        service_id,
        monday_slot,
        subscription_id,
    }
}

#[tokio::test]
async fn test_create_subscription_stores_weekly_schedule() {
    let enrolment = monday_enrolment(11, 2024).await;

    let response = enrolment
        .ctx
        .server
        .get(&format!("/api/subscriptions/{}", enrolment.subscription_id))
        .await;

    response.assert_status_ok();
    let subscription = response.json::<Subscription>();
    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.weekly_schedule.slot_for(1), Some(enrolment.monday_slot));
    assert_eq!(subscription.weekly_schedule.slot_ids(), vec![enrolment.monday_slot]);
}

#[tokio::test]
async fn test_subscription_rejects_slot_on_wrong_day() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Amara").await;
    let monday_slot = ctx.create_slot(1, "08:00", "12:00", Some(service_id)).await;

    let response = ctx
        .server
        .post("/api/subscriptions")
        .json(&json!({
            "child_id": child_id,
            "service_id": service_id,
            "weekly_schedule": schedule(&[(2, monday_slot)]),
            "start_month": 11,
            "start_year": 2024,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscription_rejects_slot_of_other_service() {
    let ctx = TestContext::new().await;
    let preschool = ctx.create_service("Preschool", 4500).await;
    let toddlers = ctx.create_service("Toddlers", 5000).await;
    let child_id = ctx.create_child("Amara").await;
    let toddler_slot = ctx.create_slot(1, "08:00", "12:00", Some(toddlers)).await;

    let response = ctx
        .server
        .post("/api/subscriptions")
        .json(&json!({
            "child_id": child_id,
            "service_id": preschool,
            "weekly_schedule": schedule(&[(1, toddler_slot)]),
            "start_month": 11,
            "start_year": 2024,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscription_with_partial_schedule_is_unprocessable() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Amara").await;

    let response = ctx
        .server
        .post("/api/subscriptions")
        .json(&json!({
            "child_id": child_id,
            "service_id": service_id,
            "weekly_schedule": { "1": null },
            "start_month": 11,
            "start_year": 2024,
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_subscription_for_unknown_child_is_not_found() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;

    let response = ctx
        .server
        .post("/api/subscriptions")
        .json(&json!({
            "child_id": 404,
            "service_id": service_id,
            "weekly_schedule": schedule(&[]),
            "start_month": 11,
            "start_year": 2024,
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_sessions_across_year_boundary() {
    let enrolment = monday_enrolment(11, 2024).await;
    let url = format!("/api/subscriptions/{}/sessions", enrolment.subscription_id);

    let response = enrolment.ctx.server.post(&url).await;

    response.assert_status(StatusCode::CREATED);
    let report = response.json::<GenerationReport>();
    // Mondays: 4 in Nov 2024, 5 in Dec 2024, 4 in Jan 2025.
    assert_eq!(report.drafted, 13);
    assert_eq!(report.inserted, 13);
    assert!(report.skipped_months.is_empty());

    let sessions = enrolment.ctx.server.get(&url).await.json::<Vec<Session>>();
    assert_eq!(sessions.len(), 13);
    assert_eq!(sessions[0].session_date.to_string(), "2024-11-04");
    assert_eq!(sessions[12].session_date.to_string(), "2025-01-27");
    assert!(sessions
        .iter()
        .all(|s| s.status == SessionStatus::Scheduled && s.session_time.to_string() == "08:00:00"));
}

#[tokio::test]
async fn test_second_generation_skips_existing_months() {
    let enrolment = monday_enrolment(11, 2024).await;
    let url = format!("/api/subscriptions/{}/sessions", enrolment.subscription_id);

    enrolment
        .ctx
        .server
        .post(&url)
        .add_query_param("months", 1)
        .await
        .assert_status(StatusCode::CREATED);

    let report = enrolment
        .ctx
        .server
        .post(&url)
        .add_query_param("months", 2)
        .await
        .json::<GenerationReport>();

    assert_eq!(report.inserted, 5);
    assert_eq!(report.skipped_months, vec![YearMonth { year: 2024, month: 11 }]);

    let sessions = enrolment.ctx.server.get(&url).await.json::<Vec<Session>>();
    assert_eq!(sessions.len(), 9);
}

#[tokio::test]
async fn test_empty_schedule_generates_nothing() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let child_id = ctx.create_child("Amara").await;
    let subscription_id = ctx
        .create_subscription(child_id, service_id, schedule(&[]), 2, 2024)
        .await;

    let report = ctx
        .server
        .post(&format!("/api/subscriptions/{}/sessions", subscription_id))
        .await
        .json::<GenerationReport>();

    assert_eq!(report.drafted, 0);
    assert_eq!(report.inserted, 0);
}

#[tokio::test]
async fn test_paused_subscription_cannot_generate() {
    let enrolment = monday_enrolment(2, 2024).await;
    let base = format!("/api/subscriptions/{}", enrolment.subscription_id);

    let paused = enrolment
        .ctx
        .server
        .put(&format!("{}/status", base))
        .json(&json!({ "status": "paused" }))
        .await;
    paused.assert_status_ok();
    assert_eq!(paused.json::<Value>()["status"], "paused");

    enrolment
        .ctx
        .server
        .post(&format!("{}/sessions", base))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_for_unknown_subscription_is_not_found() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/api/subscriptions/77/sessions")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case::zero(0)]
#[case::past_limit(25)]
#[case::huge(u32::MAX)]
#[tokio::test]
async fn test_window_outside_limits_is_bad_request(#[case] months: u32) {
    let enrolment = monday_enrolment(2, 2024).await;
    let url = format!("/api/subscriptions/{}/sessions", enrolment.subscription_id);

    enrolment
        .ctx
        .server
        .post(&url)
        .add_query_param("months", months)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let sessions = enrolment.ctx.server.get(&url).await.json::<Vec<Session>>();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_update_schedule_adds_wednesday() {
    let enrolment = monday_enrolment(2, 2024).await;
    let wednesday_slot = enrolment
        .ctx
        .create_slot(3, "09:00", "11:00", Some(enrolment.service_id))
        .await;
    let base = format!("/api/subscriptions/{}", enrolment.subscription_id);

    let updated = enrolment
        .ctx
        .server
        .put(&format!("{}/schedule", base))
        .json(&json!({
            "weekly_schedule": schedule(&[(1, enrolment.monday_slot), (3, wednesday_slot)]),
        }))
        .await;
    updated.assert_status_ok();

    let report = enrolment
        .ctx
        .server
        .post(&format!("{}/sessions", base))
        .add_query_param("months", 1)
        .await
        .json::<GenerationReport>();

    // February 2024 has four Mondays and four Wednesdays.
    assert_eq!(report.inserted, 8);
}
