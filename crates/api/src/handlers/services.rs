use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use daycare_core::{
    errors::CareError,
    models::service::{CreateServiceRequest, Service},
};
use daycare_db::repositories;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    payload.validate()?;

    let row = repositories::service::create_service(
        &state.db_pool,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.session_rate_cents,
    )
    .await?;

    tracing::info!("Created service {} ({})", row.id, row.name);
    Ok((StatusCode::CREATED, Json(Service::from(row))))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let rows = repositories::service::list_services(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Service>, AppError> {
    let row = repositories::service::get_service_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Service with ID {} not found", id)))?;
    Ok(Json(Service::from(row)))
}
