//! # Subscription Handlers
//!
//! A subscription binds a child to a service with a weekly slot pattern. Every slot
//! referenced by the pattern must exist, be active, sit on the weekday it is assigned
//! to and be open to the subscription's service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use daycare_core::{
    clock::day_name,
    errors::CareError,
    models::{
        session::{GenerationReport, Session},
        slot::ScheduleSlot,
        subscription::{
            CreateSubscriptionRequest, Subscription, UpdateSubscriptionStatusRequest,
            UpdateWeeklyScheduleRequest,
        },
        weekly_schedule::WeeklySchedule,
    },
    scheduling::calendar::validate_window,
};
use daycare_db::{repositories, DbPool};
use serde::Deserialize;
use std::sync::Arc;

use crate::{generation::generate_for_subscription, middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub months: Option<u32>,
}

async fn load_subscription(pool: &DbPool, id: i64) -> Result<Subscription, AppError> {
    let row = repositories::subscription::get_subscription_by_id(pool, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Subscription with ID {} not found", id)))?;
    Ok(Subscription::try_from(row)?)
}

async fn validate_schedule_slots(
    pool: &DbPool,
    schedule: &WeeklySchedule,
    service_id: i64,
) -> Result<(), AppError> {
    let rows = repositories::slot::get_slots_by_ids(pool, &schedule.slot_ids()).await?;
    let slots = rows
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    for (day, slot_id) in schedule.assignments() {
        let slot = slots
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| CareError::Validation(format!("Slot {} does not exist", slot_id)))?;

        if !slot.is_active {
            return Err(AppError(CareError::Validation(format!(
                "Slot {} is inactive",
                slot_id
            ))));
        }
        if slot.day_of_week != day {
            return Err(AppError(CareError::Validation(format!(
                "Slot {} is on {}, not {}",
                slot_id,
                day_name(slot.day_of_week),
                day_name(day)
            ))));
        }
        if slot.service_id.is_some_and(|id| id != service_id) {
            return Err(AppError(CareError::Validation(format!(
                "Slot {} belongs to another service",
                slot_id
            ))));
        }
    }

    Ok(())
}

#[axum::debug_handler]
pub async fn create_subscription(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<Subscription>), AppError> {
    payload.validate()?;

    repositories::child::get_child_by_id(&state.db_pool, payload.child_id)
        .await?
        .ok_or_else(|| {
            CareError::NotFound(format!("Child with ID {} not found", payload.child_id))
        })?;
    repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
        .await?
        .ok_or_else(|| {
            CareError::NotFound(format!("Service with ID {} not found", payload.service_id))
        })?;

    validate_schedule_slots(&state.db_pool, &payload.weekly_schedule, payload.service_id).await?;

    let row = repositories::subscription::create_subscription(
        &state.db_pool,
        payload.child_id,
        payload.service_id,
        &payload.weekly_schedule,
        payload.start_month,
        payload.start_year,
    )
    .await?;

    tracing::info!(
        "Created subscription {} for child {} starting {}-{:02}",
        row.id,
        row.child_id,
        row.start_year,
        row.start_month
    );

    Ok((StatusCode::CREATED, Json(Subscription::try_from(row)?)))
}

#[axum::debug_handler]
pub async fn list_subscriptions(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let rows = repositories::subscription::list_subscriptions(&state.db_pool).await?;
    let subscriptions = rows
        .into_iter()
        .map(Subscription::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(subscriptions))
}

#[axum::debug_handler]
pub async fn get_subscription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Subscription>, AppError> {
    Ok(Json(load_subscription(&state.db_pool, id).await?))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWeeklyScheduleRequest>,
) -> Result<Json<Subscription>, AppError> {
    let current = load_subscription(&state.db_pool, id).await?;
    validate_schedule_slots(&state.db_pool, &payload.weekly_schedule, current.service_id).await?;

    let row = repositories::subscription::update_weekly_schedule(
        &state.db_pool,
        id,
        &payload.weekly_schedule,
    )
    .await?
    .ok_or_else(|| CareError::NotFound(format!("Subscription with ID {} not found", id)))?;

    Ok(Json(Subscription::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSubscriptionStatusRequest>,
) -> Result<Json<Subscription>, AppError> {
    let row = repositories::subscription::update_status(&state.db_pool, id, payload.status)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Subscription with ID {} not found", id)))?;

    tracing::info!("Subscription {} is now {}", id, payload.status);
    Ok(Json(Subscription::try_from(row)?))
}

/// Generates sessions for the next `months` months (server default when omitted),
/// up to [`MAX_WINDOW_MONTHS`](daycare_core::scheduling::calendar::MAX_WINDOW_MONTHS).
#[axum::debug_handler]
pub async fn generate_sessions(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Query(params): Query<GenerateParams>,
) -> Result<(StatusCode, Json<GenerationReport>), AppError> {
    let months = validate_window(params.months.unwrap_or(state.generation_months))?;

    let report =
        generate_for_subscription(state.store.as_ref(), &state.generator, id, months).await?;

    Ok((StatusCode::CREATED, Json(report)))
}

#[axum::debug_handler]
pub async fn list_sessions(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Session>>, AppError> {
    load_subscription(&state.db_pool, id).await?;

    let rows = repositories::session::get_sessions_by_subscription(&state.db_pool, id).await?;
    let sessions = rows
        .into_iter()
        .map(Session::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(sessions))
}
