//! Request extractors.
//!
//! The session extractors resolve the session fully before the handler runs:
//! a protected handler never observes an in-flight or unauthenticated state.
//! [`ApiPath`], [`ApiQuery`] and [`ApiJson`] wrap axum's own extractors so
//! their rejections carry the usual JSON error body.

use axum::{
  extract::{FromRequest, FromRequestParts},
  http::{HeaderMap, header, request::Parts},
};
use careers_ai::Assistant;
use careers_core::{
  store::CareersStore,
  user::{AdminUser, Session},
};

use crate::{ApiError, AppState};

pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required.";
pub const SUPER_ADMIN_REQUIRED_MESSAGE: &str = "Super admin access required.";

// ─── Input ───────────────────────────────────────────────────────────────────

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// ─── Sessions ────────────────────────────────────────────────────────────────

/// The bearer token from an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

/// Any signed-in admin. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession {
  pub user:  AdminUser,
  pub token: String,
}

impl AdminSession {
  pub fn session(&self) -> Session { Session::Authenticated { user: self.user.clone() } }
}

impl<S, A> FromRequestParts<AppState<S, A>> for AdminSession
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, A>,
  ) -> Result<Self, Self::Rejection> {
    let unauthorized = || ApiError::Unauthorized(AUTH_REQUIRED_MESSAGE.to_owned());

    let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?.to_owned();
    match state.gate().current_session(&token).await? {
      Session::Authenticated { user } => Ok(AdminSession { user, token }),
      Session::Unauthenticated => Err(unauthorized()),
    }
  }
}

/// A signed-in super admin. 401 when signed out, 403 for other roles.
#[derive(Debug, Clone)]
pub struct SuperAdminSession(pub AdminSession);

impl<S, A> FromRequestParts<AppState<S, A>> for SuperAdminSession
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, A>,
  ) -> Result<Self, Self::Rejection> {
    let admin = AdminSession::from_request_parts(parts, state).await?;
    if !admin.user.is_super_admin() {
      return Err(ApiError::Forbidden(SUPER_ADMIN_REQUIRED_MESSAGE.to_owned()));
    }
    Ok(SuperAdminSession(admin))
  }
}
