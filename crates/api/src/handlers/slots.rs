//! # Schedule Slot Handlers
//!
//! Slots are validated, then checked against the active slots of the same weekday
//! in the same write transaction that stores them. A slot that would overlap
//! another active slot in an overlapping service scope is rejected with
//! `409 Conflict`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use daycare_core::{
    errors::CareError,
    models::slot::{ConflictCheckRequest, ConflictCheckResponse, ScheduleSlot, SlotFilter, SlotRequest},
    scheduling::conflict::find_conflict,
};
use daycare_db::{repositories, slot_store, DbPool};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

async fn active_slots_for_day(pool: &DbPool, day_of_week: u8) -> Result<Vec<ScheduleSlot>, AppError> {
    let rows = repositories::slot::get_active_slots_for_day(pool, day_of_week).await?;
    let slots = rows
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(slots)
}

async fn ensure_service_exists(pool: &DbPool, service_id: Option<i64>) -> Result<(), AppError> {
    if let Some(service_id) = service_id {
        repositories::service::get_service_by_id(pool, service_id)
            .await?
            .ok_or_else(|| CareError::NotFound(format!("Service with ID {} not found", service_id)))?;
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SlotRequest>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let candidate = payload.to_candidate()?;
    ensure_service_exists(&state.db_pool, candidate.service_id).await?;

    let slot = slot_store::save_slot(
        &state.db_pool,
        None,
        &candidate,
        payload.max_capacity,
        payload.is_active,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<SlotFilter>,
) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let rows = repositories::slot::list_slots(&state.db_pool, &filter).await?;
    let slots = rows
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let row = repositories::slot::get_slot_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Slot with ID {} not found", id)))?;
    Ok(Json(ScheduleSlot::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<SlotRequest>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let candidate = payload.to_candidate()?;
    ensure_service_exists(&state.db_pool, candidate.service_id).await?;

    let slot = slot_store::save_slot(
        &state.db_pool,
        Some(id),
        &candidate,
        payload.max_capacity,
        payload.is_active,
    )
    .await?;

    Ok(Json(slot))
}

/// Deactivates a slot. It stops taking part in conflict checks, while subscriptions
/// that already reference it keep generating at its start time.
#[axum::debug_handler]
pub async fn deactivate_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !repositories::slot::deactivate_slot(&state.db_pool, id).await? {
        return Err(AppError(CareError::NotFound(format!("Slot with ID {} not found", id))));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn check_conflict(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let candidate = payload.to_candidate()?;
    let existing = active_slots_for_day(&state.db_pool, candidate.day_of_week).await?;
    let conflicting_slot_id = find_conflict(&candidate, &existing).map(|slot| slot.id);

    Ok(Json(ConflictCheckResponse {
        conflict: conflicting_slot_id.is_some(),
        conflicting_slot_id,
    }))
}
