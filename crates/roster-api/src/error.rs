//! API error type, the shared envelope formatters, and the
//! [`axum::response::IntoResponse`] implementation that ties them together.
//!
//! Every failing handler funnels through [`ApiError`]; the two formatters
//! [`not_found`] and [`internal_error`] are the only places that shape 404 and
//! 500 bodies.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error code attached to guarded-transition conflicts.
pub const CONFLICT_CODE: &str = "Error 0";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A lookup or listing produced no rows. Carries the resource label.
  #[error("{0} not found")]
  NotFound(String),

  /// A guarded transition matched no rows because the record is already in
  /// the target state.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{operation} failed: {source}")]
  Internal {
    operation: &'static str,
    #[source]
    source:    Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Adapter for `map_err` that tags a store failure with the operation it
  /// interrupted.
  pub fn store<E>(operation: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| Self::Internal { operation, source: Box::new(e) }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(resource) => not_found(&resource),
      ApiError::Conflict(message) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "message": message, "error": CONFLICT_CODE })),
      )
        .into_response(),
      ApiError::BadRequest(detail) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "message": "Invalid request", "error": detail })),
      )
        .into_response(),
      ApiError::Internal { operation, source } => internal_error(operation, &*source),
    }
  }
}

/// 404 envelope for a missing resource.
pub fn not_found(resource: &str) -> Response {
  (
    StatusCode::NOT_FOUND,
    Json(json!({ "ok": false, "message": format!("{resource} not found") })),
  )
    .into_response()
}

/// 500 envelope for a failure inside `operation`.
pub fn internal_error(
  operation: &str,
  error: &(dyn std::error::Error + Send + Sync),
) -> Response {
  tracing::error!(operation, %error, "request failed");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({
      "ok":      false,
      "message": format!("Error in {operation}"),
      "error":   error.to_string(),
    })),
  )
    .into_response()
}
