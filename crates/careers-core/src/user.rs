//! Admin users, roles, identities, and sessions.
//!
//! Authentication (who are you?) is delegated to an [`IdentityProvider`].
//! Authorization (what may you do?) comes from the role stored on the user's
//! [`AdminUser`] record, keyed by the identity's `uid`.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Record id used for the super-admin row created before its owner's first
/// login.
pub const PLACEHOLDER_UID: &str = "super-admin-placeholder";

/// Default designated super-admin email.
pub const DEFAULT_SUPER_ADMIN_EMAIL: &str = "super@admin.com";

// ─── Roles ───────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Admin,
  SuperAdmin,
}

impl Role {
  pub fn parse(s: &str) -> Result<Self, Error> {
    s.parse().map_err(|_| Error::UnknownRole(s.to_owned()))
  }
}

/// A role record. Roles are never changed through the application surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
  pub uid:            String,
  pub email:          String,
  pub role:           Role,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub is_placeholder: bool,
}

impl AdminUser {
  pub fn placeholder(email: impl Into<String>) -> Self {
    Self {
      uid:            PLACEHOLDER_UID.to_owned(),
      email:          email.into(),
      role:           Role::SuperAdmin,
      is_placeholder: true,
    }
  }

  pub fn is_super_admin(&self) -> bool { self.role == Role::SuperAdmin }
}

// ─── Sessions ────────────────────────────────────────────────────────────────

/// The resolved state of a request's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
  Unauthenticated,
  Authenticated { user: AdminUser },
}

impl Session {
  pub fn user(&self) -> Option<&AdminUser> {
    match self {
      Self::Authenticated { user } => Some(user),
      Self::Unauthenticated => None,
    }
  }

  pub fn role(&self) -> Option<Role> { self.user().map(|u| u.role) }
}

/// A persisted login session. Only a digest of the bearer token is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
  pub token_hash: String,
  pub uid:        String,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool { now >= self.expires_at }
}

// ─── Identities ──────────────────────────────────────────────────────────────

/// An authenticated identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub uid:   String,
  pub email: String,
}

/// A locally stored credential.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
  pub uid:           String,
  pub email:         String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
  /// Unknown email or wrong password; deliberately indistinguishable.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("{0}")]
  Provider(String),
}

/// Verifies email/password credentials.
pub trait IdentityProvider: Send + Sync {
  fn authenticate<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Identity, IdentityError>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_wire_names() {
    assert_eq!(Role::SuperAdmin.as_ref(), "SUPER_ADMIN");
    assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
    assert!(Role::parse("OWNER").is_err());
    assert_eq!(serde_json::to_value(Role::SuperAdmin).unwrap(), "SUPER_ADMIN");
  }

  #[test]
  fn session_accessors() {
    assert_eq!(Session::Unauthenticated.role(), None);
    let session = Session::Authenticated {
      user: AdminUser {
        uid:            "u1".into(),
        email:          "a@example.com".into(),
        role:           Role::Admin,
        is_placeholder: false,
      },
    };
    assert_eq!(session.role(), Some(Role::Admin));
  }
}
