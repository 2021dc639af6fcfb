//! The auth gate: login, role resolution, and session lookup.
//!
//! Authentication is delegated to an [`IdentityProvider`]. The role comes from
//! the user record keyed by the identity's uid, and [`AuthGate::resolve_role`]
//! is the only place that creates or changes those records.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use careers_core::{
  store::CareersStore,
  user::{
    AdminUser, Identity, IdentityError, IdentityProvider, PLACEHOLDER_UID, Role, Session,
    SessionRecord,
  },
  validate::FieldErrors,
};
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{ApiConfig, ApiError};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";
pub const NOT_PROVISIONED_MESSAGE: &str = "This account does not have admin access.";
pub const MIN_PASSWORD_CHARS: usize = 6;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("invalid login input: {0}")]
  Validation(FieldErrors),

  #[error("invalid credentials")]
  InvalidCredentials,

  /// The identity is valid but no user record exists and auto-provisioning
  /// is disabled.
  #[error("identity has no admin record")]
  NotProvisioned,

  #[error("identity provider error: {0}")]
  Provider(String),

  #[error(transparent)]
  Api(#[from] ApiError),
}

impl From<IdentityError> for AuthError {
  fn from(e: IdentityError) -> Self {
    match e {
      IdentityError::InvalidCredentials => AuthError::InvalidCredentials,
      IdentityError::Provider(message) => AuthError::Provider(message),
    }
  }
}

impl From<AuthError> for ApiError {
  fn from(e: AuthError) -> Self {
    match e {
      AuthError::Validation(fields) => ApiError::Validation(fields),
      AuthError::InvalidCredentials => {
        ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_owned())
      }
      AuthError::NotProvisioned => ApiError::Forbidden(NOT_PROVISIONED_MESSAGE.to_owned()),
      AuthError::Provider(message) => ApiError::Unavailable(message),
      AuthError::Api(e) => e,
    }
  }
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// A fresh random bearer token (32 bytes, URL-safe base64).
pub fn generate_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// The digest stored in place of a token.
pub fn token_digest(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

// ─── Gate ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginSuccess {
  pub token:      String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub expires_at: DateTime<Utc>,
  pub user:       AdminUser,
}

pub struct AuthGate<'a, S, I> {
  store:    &'a S,
  identity: &'a I,
  config:   &'a ApiConfig,
}

impl<'a, S, I> AuthGate<'a, S, I>
where
  S: CareersStore,
  I: IdentityProvider,
{
  pub fn new(store: &'a S, identity: &'a I, config: &'a ApiConfig) -> Self {
    Self { store, identity, config }
  }

  fn is_super_admin_email(&self, email: &str) -> bool {
    email.trim().eq_ignore_ascii_case(self.config.super_admin_email.trim())
  }

  /// Check credentials, resolve the role, and open a session.
  pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
    let mut errors = FieldErrors::new();
    errors.email("email", email, "Please enter a valid email address.");
    if password.chars().count() < MIN_PASSWORD_CHARS {
      errors.add("password", "Password must be at least 6 characters.");
    }
    if !errors.is_empty() {
      return Err(AuthError::Validation(errors));
    }

    let identity = match self.identity.authenticate(email.trim(), password).await {
      Ok(identity) => identity,
      Err(e) => {
        warn!(error = %e, "login rejected");
        return Err(e.into());
      }
    };
    let user = self.resolve_role(&identity).await?;

    let now = Utc::now();
    match self.store.purge_expired_sessions(now).await {
      Ok(0) => {}
      Ok(purged) => info!(purged, "expired sessions purged"),
      Err(e) => warn!(error = %e, "could not purge expired sessions"),
    }

    let token = generate_token();
    let expires_at = now + self.config.session_ttl;
    self
      .store
      .insert_session(SessionRecord {
        token_hash: token_digest(&token),
        uid: user.uid.clone(),
        created_at: now,
        expires_at,
      })
      .await
      .map_err(ApiError::backend)?;

    info!(uid = %user.uid, role = %user.role, "admin signed in");
    Ok(LoginSuccess { token, expires_at, user })
  }

  /// Decide the role for an authenticated identity, creating or reconciling
  /// its user record as needed.
  pub async fn resolve_role(&self, identity: &Identity) -> Result<AdminUser, AuthError> {
    let existing = self
      .store
      .get_user(identity.uid.clone())
      .await
      .map_err(ApiError::backend)?;

    if self.is_super_admin_email(&identity.email)
      && existing.as_ref().is_none_or(|u| u.is_placeholder)
    {
      self
        .store
        .put_user(AdminUser {
          uid:            identity.uid.clone(),
          email:          identity.email.clone(),
          role:           Role::SuperAdmin,
          is_placeholder: false,
        })
        .await
        .map_err(ApiError::backend)?;
      self
        .store
        .delete_user(PLACEHOLDER_UID.to_owned())
        .await
        .map_err(ApiError::backend)?;
      info!(uid = %identity.uid, "super admin record claimed");
    }

    if let Some(user) = self
      .store
      .get_user(identity.uid.clone())
      .await
      .map_err(ApiError::backend)?
    {
      return Ok(user);
    }

    if !self.config.auto_provision_admins {
      return Err(AuthError::NotProvisioned);
    }

    let user = AdminUser {
      uid:            identity.uid.clone(),
      email:          identity.email.clone(),
      role:           Role::Admin,
      is_placeholder: false,
    };
    self.store.put_user(user.clone()).await.map_err(ApiError::backend)?;
    info!(uid = %user.uid, "admin record provisioned");
    Ok(user)
  }

  /// Make sure some record carries the super-admin email, creating the
  /// placeholder if not. Failures are logged only.
  pub async fn ensure_super_admin_exists(&self) {
    let email = self.config.super_admin_email.trim().to_owned();
    match self.store.find_user_by_email(email.clone()).await {
      Ok(Some(_)) => {}
      Ok(None) => match self.store.put_user(AdminUser::placeholder(email)).await {
        Ok(()) => info!("super admin placeholder created"),
        Err(e) => error!(error = %e, "could not create super admin placeholder"),
      },
      Err(e) => error!(error = %e, "could not look up super admin record"),
    }
  }

  /// Resolve a bearer token to a session. Unknown, expired, or orphaned
  /// tokens are all `Unauthenticated`.
  pub async fn current_session(&self, token: &str) -> Result<Session, ApiError> {
    let digest = token_digest(token);
    let Some(record) = self
      .store
      .get_session(digest.clone())
      .await
      .map_err(ApiError::backend)?
    else {
      return Ok(Session::Unauthenticated);
    };

    if record.is_expired_at(Utc::now()) {
      self.store.delete_session(digest).await.map_err(ApiError::backend)?;
      return Ok(Session::Unauthenticated);
    }

    match self.store.get_user(record.uid).await.map_err(ApiError::backend)? {
      Some(user) if !user.is_placeholder => Ok(Session::Authenticated { user }),
      _ => Ok(Session::Unauthenticated),
    }
  }

  /// End the session for `token`. Unknown tokens are not an error.
  pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
    self
      .store
      .delete_session(token_digest(token))
      .await
      .map_err(ApiError::backend)?;
    Ok(())
  }

  /// Every real user record; super admins only.
  pub async fn list_admin_staff(&self, session: &Session) -> Result<Vec<AdminUser>, ApiError> {
    match session.role() {
      Some(Role::SuperAdmin) => self.store.list_users().await.map_err(ApiError::backend),
      Some(Role::Admin) => Err(ApiError::Forbidden(
        "Only the super admin can view staff.".to_owned(),
      )),
      None => Err(ApiError::Unauthorized("Authentication required.".to_owned())),
    }
  }
}
