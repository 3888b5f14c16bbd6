//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every handler
//! reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use daycare_core::errors::CareError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps a [`CareError`] and implements `IntoResponse`, producing a
/// `{ "error": message }` body.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use daycare_api::middleware::error_handling::AppError;
/// use daycare_core::errors::CareError;
///
/// async fn handler(id: i64) -> Result<Json<i64>, AppError> {
///     if id < 0 {
///         return Err(AppError(CareError::Validation("id must be positive".into())));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CareError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CareError::NotFound(_) => StatusCode::NOT_FOUND,
            CareError::Validation(_) => StatusCode::BAD_REQUEST,
            CareError::Conflict(_) => StatusCode::CONFLICT,
            CareError::AlreadyGenerated(_) => StatusCode::CONFLICT,
            CareError::MalformedSchedule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CareError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CareError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from CareError to AppError
impl From<CareError> for AppError {
    fn from(err: CareError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository functions return `eyre::Result`; their failures are storage failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CareError::Database(err))
    }
}
