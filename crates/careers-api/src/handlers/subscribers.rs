//! Handlers for the newsletter list.

use axum::{Json, extract::State, http::StatusCode};
use careers_ai::Assistant;
use careers_core::{store::CareersStore, subscriber::SubscribeOutcome};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  ApiError, AppState,
  extract::{AdminSession, ApiJson},
};

#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
  #[serde(default)]
  pub email: String,
}

/// `POST /subscribers`: 201 for a new address, 200 if already listed.
pub async fn subscribe<S, A>(
  State(state): State<AppState<S, A>>,
  ApiJson(body): ApiJson<SubscribeBody>,
) -> Result<(StatusCode, Json<Value>), ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let outcome = state.subscribers().subscribe(&body.email).await?;
  let status = match outcome {
    SubscribeOutcome::Subscribed { .. } => StatusCode::CREATED,
    SubscribeOutcome::AlreadySubscribed => StatusCode::OK,
  };
  Ok((status, Json(json!({ "message": outcome.message(), "outcome": outcome }))))
}

/// `GET /admin/subscribers/count`
pub async fn count<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
) -> Result<Json<Value>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let count = state.subscribers().count().await?;
  Ok(Json(json!({ "count": count })))
}
