use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use daycare_core::{
    errors::CareError,
    models::session::{AttendanceUpdateRequest, RosterEntry, Session},
};
use daycare_db::repositories;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Records a session's attendance. Notes are kept when the request omits them.
#[axum::debug_handler]
pub async fn update_attendance(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AttendanceUpdateRequest>,
) -> Result<Json<Session>, AppError> {
    let row = repositories::session::update_attendance(
        &state.db_pool,
        id,
        payload.status,
        payload.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| CareError::NotFound(format!("Session with ID {} not found", id)))?;

    Ok(Json(Session::try_from(row)?))
}

#[axum::debug_handler]
pub async fn daily_roster(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<Vec<RosterEntry>>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        CareError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
    })?;

    let rows = repositories::session::get_roster_for_date(&state.db_pool, date).await?;
    let roster = rows
        .into_iter()
        .map(RosterEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(roster))
}
