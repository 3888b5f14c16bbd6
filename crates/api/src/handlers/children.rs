use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use daycare_core::{
    errors::CareError,
    models::child::{Child, CreateChildRequest},
};
use daycare_db::repositories;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_child(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateChildRequest>,
) -> Result<(StatusCode, Json<Child>), AppError> {
    payload.validate(Utc::now().date_naive())?;

    let row = repositories::child::create_child(
        &state.db_pool,
        payload.first_name.trim(),
        payload.last_name.trim(),
        payload.birthdate,
        payload.guardian_email.trim(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Child::from(row))))
}

#[axum::debug_handler]
pub async fn list_children(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Child>>, AppError> {
    let rows = repositories::child::list_children(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(Child::from).collect()))
}

#[axum::debug_handler]
pub async fn get_child(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Child>, AppError> {
    let row = repositories::child::get_child_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Child with ID {} not found", id)))?;
    Ok(Json(Child::from(row)))
}
