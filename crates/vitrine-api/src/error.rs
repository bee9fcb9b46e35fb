//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every variant renders as the uniform `{success: false, ...}` envelope
//! used across the API.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vitrine_core::validate::FieldError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// 400 with the full field-error list.
  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// 500 with a caller-facing generic message. `detail` carries the
  /// underlying error string and is populated only when the server is
  /// configured to expose internal errors.
  #[error("internal error: {message}")]
  Internal {
    message: String,
    detail:  Option<String>,
  },
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "success": false,
          "message": "Validation failed",
          "errors": errors,
        })),
      )
        .into_response(),

      ApiError::BadRequest(message) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": message })),
      )
        .into_response(),

      ApiError::NotFound(message) => (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": message })),
      )
        .into_response(),

      ApiError::Internal { message, detail } => {
        let mut body = json!({ "success": false, "message": message });
        if let Some(detail) = detail {
          body["error"] = json!(detail);
        }
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
      }
    }
  }
}
