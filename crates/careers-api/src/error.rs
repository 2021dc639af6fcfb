//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Backend and AI failures are logged here and answered with a generic
//! message; their detail never reaches the client.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use careers_ai::AiError;
use careers_core::validate::FieldErrors;
use serde_json::json;
use thiserror::Error;

/// Shown when a write is rejected by field validation.
pub const VALIDATION_MESSAGE: &str = "Please correct the highlighted fields.";

/// Shown for any store failure.
pub const BACKEND_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Shown for any failure of the AI collaborator.
pub const AI_MESSAGE: &str = "The AI assistant could not complete the request.";

pub const AI_TIMEOUT_MESSAGE: &str = "The AI assistant took too long to respond.";

/// An error returned by a repository, the auth gate, or an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("ai error: {0}")]
  Ai(#[source] AiError),

  #[error("timed out: {0}")]
  Timeout(String),

  #[error("unavailable: {0}")]
  Unavailable(String),
}

impl ApiError {
  /// Wrap a store error.
  pub fn backend<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Backend(Box::new(e))
  }
}

impl From<careers_core::Error> for ApiError {
  fn from(e: careers_core::Error) -> Self {
    match e {
      careers_core::Error::Validation(fields) => ApiError::Validation(fields),
      other => ApiError::backend(other),
    }
  }
}

impl From<AiError> for ApiError {
  fn from(e: AiError) -> Self {
    match e {
      AiError::Input(message) => ApiError::BadRequest(message),
      AiError::Http(e) if e.is_timeout() => {
        tracing::warn!(error = %e, "AI call timed out");
        ApiError::Timeout(AI_TIMEOUT_MESSAGE.to_owned())
      }
      other => ApiError::Ai(other),
    }
  }
}

// Malformed paths, queries and bodies are answered like any other bad request.

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::Validation(fields) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": VALIDATION_MESSAGE, "fields": fields }),
      ),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, json!({ "error": m })),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, json!({ "error": m })),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Backend(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": BACKEND_MESSAGE }))
      }
      ApiError::Ai(e) => {
        tracing::warn!(error = %e, "AI call failed");
        (StatusCode::BAD_GATEWAY, json!({ "error": AI_MESSAGE }))
      }
      ApiError::Timeout(m) => (StatusCode::GATEWAY_TIMEOUT, json!({ "error": m })),
      ApiError::Unavailable(m) => {
        (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": m }))
      }
    };
    (status, Json(body)).into_response()
  }
}
