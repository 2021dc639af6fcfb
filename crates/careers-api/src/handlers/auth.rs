//! Handlers for signing in and out.

use axum::{Json, extract::State, http::StatusCode};
use careers_ai::Assistant;
use careers_core::{
  store::CareersStore,
  user::{AdminUser, Session},
};
use serde::Deserialize;

use crate::{
  ApiError, AppState,
  extract::{AdminSession, ApiJson, SuperAdminSession},
  gate::LoginSuccess,
};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

/// `POST /auth/login`
pub async fn login<S, A>(
  State(state): State<AppState<S, A>>,
  ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<LoginSuccess>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let success = state.gate().login(&body.email, &body.password).await?;
  Ok(Json(success))
}

/// `POST /auth/logout`
pub async fn logout<S, A>(
  State(state): State<AppState<S, A>>,
  admin: AdminSession,
) -> Result<StatusCode, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  state.gate().logout(&admin.token).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/session`
pub async fn session<S, A>(
  State(_state): State<AppState<S, A>>,
  admin: AdminSession,
) -> Json<Session>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Json(admin.session())
}

/// `GET /admin/staff`
pub async fn staff<S, A>(
  State(state): State<AppState<S, A>>,
  SuperAdminSession(admin): SuperAdminSession,
) -> Result<Json<Vec<AdminUser>>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Ok(Json(state.gate().list_admin_staff(&admin.session()).await?))
}
