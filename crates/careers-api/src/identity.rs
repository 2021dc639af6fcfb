//! Local email/password identity provider backed by the `identities` table.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use careers_core::{
  store::CareersStore,
  user::{Identity, IdentityError, IdentityProvider, IdentityRecord},
};
use rand_core::OsRng;

/// Produce an argon2 PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| IdentityError::Provider(format!("argon2 error: {e}")))
}

fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
    .is_ok()
}

pub struct LocalIdentityProvider<S> {
  store: Arc<S>,
}

impl<S: CareersStore> LocalIdentityProvider<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Create a credential. `Ok(None)` if the email is already registered.
  pub async fn register(
    &self,
    email: &str,
    password: &str,
  ) -> Result<Option<IdentityRecord>, IdentityError> {
    let hash = hash_password(password)?;
    self
      .store
      .insert_identity(email.trim().to_lowercase(), hash)
      .await
      .map_err(|e| IdentityError::Provider(e.to_string()))
  }
}

impl<S: CareersStore> IdentityProvider for LocalIdentityProvider<S> {
  async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
    let record = self
      .store
      .find_identity(email.trim().to_owned())
      .await
      .map_err(|e| IdentityError::Provider(e.to_string()))?
      .ok_or(IdentityError::InvalidCredentials)?;

    if !verify_password(password, &record.password_hash) {
      return Err(IdentityError::InvalidCredentials);
    }
    Ok(Identity { uid: record.uid, email: record.email })
  }
}
