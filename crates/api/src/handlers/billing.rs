use axum::{
    extract::{Path, State},
    Json,
};
use daycare_core::{
    billing::{BillingSummary, MonthlyStatement},
    errors::CareError,
    models::{session::Session, subscription::Subscription},
    scheduling::calendar::YearMonth,
};
use daycare_db::repositories;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn monthly_summary(
    State(state): State<Arc<ApiState>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<BillingSummary>, AppError> {
    let period = YearMonth::new(year, month)?;

    let rows = repositories::session::get_sessions_in_period(&state.db_pool, period).await?;
    let sessions = rows
        .into_iter()
        .map(Session::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let rates = repositories::session::get_rates_for_period(&state.db_pool, period).await?;

    let statements = rates
        .into_iter()
        .map(|(subscription_id, rate_cents)| {
            MonthlyStatement::compute(subscription_id, period, rate_cents, &sessions)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(BillingSummary::from_statements(period, statements)?))
}

#[axum::debug_handler]
pub async fn subscription_statement(
    State(state): State<Arc<ApiState>>,
    Path((id, year, month)): Path<(i64, i32, u32)>,
) -> Result<Json<MonthlyStatement>, AppError> {
    let period = YearMonth::new(year, month)?;

    let row = repositories::subscription::get_subscription_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CareError::NotFound(format!("Subscription with ID {} not found", id)))?;
    let subscription = Subscription::try_from(row)?;

    let service = repositories::service::get_service_by_id(&state.db_pool, subscription.service_id)
        .await?
        .ok_or_else(|| {
            CareError::NotFound(format!("Service with ID {} not found", subscription.service_id))
        })?;

    let rows = repositories::session::get_sessions_by_subscription(&state.db_pool, id).await?;
    let sessions = rows
        .into_iter()
        .map(Session::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(MonthlyStatement::compute(
        id,
        period,
        service.session_rate_cents,
        &sessions,
    )?))
}
