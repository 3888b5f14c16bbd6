use axum::http::StatusCode;
use daycare_core::models::slot::{ConflictCheckResponse, ScheduleSlot};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_slot_returns_created_slot() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;

    let response = ctx.post_slot(1, "08:00", "12:00", Some(service_id)).await;

    response.assert_status(StatusCode::CREATED);
    let slot = response.json::<ScheduleSlot>();
    assert_eq!(slot.day_of_week, 1);
    assert_eq!(slot.service_id, Some(service_id));
    assert_eq!(slot.max_capacity, 1);
    assert!(slot.is_active);
}

#[tokio::test]
async fn test_overlapping_slot_is_rejected_with_conflict() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let existing = ctx.create_slot(1, "08:00", "12:00", Some(service_id)).await;

    let response = ctx.post_slot(1, "11:00", "13:00", Some(service_id)).await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(&format!("slot {}", existing)), "{}", message);
}

#[rstest]
#[case::touching_end("12:00", "14:00", StatusCode::CREATED)]
#[case::touching_start("06:00", "08:00", StatusCode::CREATED)]
#[case::contained("09:00", "10:00", StatusCode::CONFLICT)]
#[case::enclosing("07:00", "13:00", StatusCode::CONFLICT)]
#[tokio::test]
async fn test_slot_boundaries(
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: StatusCode,
) {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    ctx.create_slot(1, "08:00", "12:00", Some(service_id)).await;

    let response = ctx.post_slot(1, start, end, Some(service_id)).await;

    response.assert_status(expected);
}

#[tokio::test]
async fn test_different_services_do_not_conflict() {
    let ctx = TestContext::new().await;
    let preschool = ctx.create_service("Preschool", 4500).await;
    let toddlers = ctx.create_service("Toddlers", 5000).await;
    ctx.create_slot(2, "08:00", "12:00", Some(preschool)).await;

    let response = ctx.post_slot(2, "09:00", "11:00", Some(toddlers)).await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_slot_without_service_conflicts_with_every_service() {
    let ctx = TestContext::new().await;
    let preschool = ctx.create_service("Preschool", 4500).await;
    ctx.create_slot(2, "08:00", "12:00", Some(preschool)).await;

    let response = ctx.post_slot(2, "10:00", "11:00", None).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[rstest]
#[case::end_before_start(1, "12:00", "08:00")]
#[case::empty_interval(1, "08:00", "08:00")]
#[case::bad_day(7, "08:00", "09:00")]
#[case::bad_clock(1, "8am", "09:00")]
#[tokio::test]
async fn test_invalid_slot_is_bad_request(
    #[case] day: u8,
    #[case] start: &str,
    #[case] end: &str,
) {
    let ctx = TestContext::new().await;

    let response = ctx.post_slot(day, start, end, None).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slot_for_unknown_service_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.post_slot(1, "08:00", "09:00", Some(999)).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_slot_ignores_itself_but_not_neighbours() {
    let ctx = TestContext::new().await;
    let service_id = ctx.create_service("Preschool", 4500).await;
    let morning = ctx.create_slot(3, "08:00", "10:00", Some(service_id)).await;
    ctx.create_slot(3, "13:00", "15:00", Some(service_id)).await;

    let widened = ctx
        .server
        .put(&format!("/api/slots/{}", morning))
        .json(&json!({
            "day_of_week": 3,
            "start_time": "07:30",
            "end_time": "11:00",
            "service_id": service_id,
        }))
        .await;
    widened.assert_status_ok();
    assert_eq!(widened.json::<Value>()["start_time"], "07:30");

    let clashing = ctx
        .server
        .put(&format!("/api/slots/{}", morning))
        .json(&json!({
            "day_of_week": 3,
            "start_time": "08:00",
            "end_time": "14:00",
            "service_id": service_id,
        }))
        .await;
    clashing.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_deactivated_slot_no_longer_blocks() {
    let ctx = TestContext::new().await;
    let slot = ctx.create_slot(4, "08:00", "12:00", None).await;

    ctx.server
        .delete(&format!("/api/slots/{}", slot))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    ctx.post_slot(4, "09:00", "10:00", None)
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .delete("/api/slots/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_conflict_is_a_dry_run() {
    let ctx = TestContext::new().await;
    let slot = ctx.create_slot(5, "08:00", "12:00", None).await;

    let overlapping = ctx
        .server
        .post("/api/slots/check")
        .json(&json!({
            "day_of_week": 5,
            "start_time": "11:59",
            "end_time": "12:30",
            "service_id": null,
            "exclude_id": null,
        }))
        .await;
    overlapping.assert_status_ok();
    assert_eq!(
        overlapping.json::<ConflictCheckResponse>(),
        ConflictCheckResponse {
            conflict: true,
            conflicting_slot_id: Some(slot),
        }
    );

    let excluded = ctx
        .server
        .post("/api/slots/check")
        .json(&json!({
            "day_of_week": 5,
            "start_time": "11:59",
            "end_time": "12:30",
            "service_id": null,
            "exclude_id": slot,
        }))
        .await;
    assert_eq!(
        excluded.json::<ConflictCheckResponse>(),
        ConflictCheckResponse {
            conflict: false,
            conflicting_slot_id: None,
        }
    );

    let listed = ctx.server.get("/api/slots").await.json::<Vec<ScheduleSlot>>();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_list_slots_filters_by_day() {
    let ctx = TestContext::new().await;
    ctx.create_slot(1, "08:00", "09:00", None).await;
    ctx.create_slot(2, "08:00", "09:00", None).await;
    ctx.create_slot(2, "10:00", "11:00", None).await;

    let response = ctx
        .server
        .get("/api/slots")
        .add_query_param("day_of_week", 2)
        .await;

    response.assert_status_ok();
    let slots = response.json::<Vec<ScheduleSlot>>();
    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|slot| slot.day_of_week == 2));
}
