//! The `CareersStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `careers-store-sqlite`).
//! Repositories and the auth gate in `careers-api` depend on this abstraction,
//! not on any concrete backend.
//!
//! Every single-row write is atomic on its own; nothing here spans rows in a
//! transaction.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  applicant::{Applicant, NewApplicant},
  job::{Job, NewJob},
  subscriber::Subscriber,
  user::{AdminUser, IdentityRecord, SessionRecord},
};

/// Abstraction over the persistence backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CareersStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Jobs ──────────────────────────────────────────────────────────────

  /// Persist a new job. `id` and `created_at` are assigned by the store.
  fn insert_job(
    &self,
    input: NewJob,
  ) -> impl Future<Output = Result<Job, Self::Error>> + Send + '_;

  /// Persist a fully-formed job, keeping its `id` and `created_at`. Used when
  /// importing postings from another system.
  fn import_job(
    &self,
    job: Job,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a job by id. Returns `None` if not found.
  fn get_job(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Job>, Self::Error>> + Send + '_;

  /// Jobs ordered newest first. With `created_since`, only jobs created at or
  /// after that instant.
  fn list_jobs(
    &self,
    created_since: Option<DateTime<Utc>>,
  ) -> impl Future<Output = Result<Vec<Job>, Self::Error>> + Send + '_;

  fn count_jobs(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Overwrite the editable fields of `job`. `created_at` and `created_by`
  /// are never written. Returns `false` if the job does not exist.
  fn update_job(
    &self,
    job: Job,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Hard delete. Returns `false` if nothing was deleted.
  fn delete_job(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Applicants ────────────────────────────────────────────────────────

  /// Persist an application. `applied_at` is assigned by the store.
  fn insert_applicant(
    &self,
    input: NewApplicant,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  /// All applicants, newest first.
  fn list_applicants(
    &self,
  ) -> impl Future<Output = Result<Vec<Applicant>, Self::Error>> + Send + '_;

  // ── Subscribers ───────────────────────────────────────────────────────

  /// Insert a subscriber unless the email is already present, in which case
  /// `None` is returned and nothing is written.
  fn insert_subscriber(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Subscriber>, Self::Error>> + Send + '_;

  fn count_subscribers(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Users (role records) ──────────────────────────────────────────────

  fn get_user(
    &self,
    uid: String,
  ) -> impl Future<Output = Result<Option<AdminUser>, Self::Error>> + Send + '_;

  /// Any user record (placeholder or not) with this email.
  fn find_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<AdminUser>, Self::Error>> + Send + '_;

  /// Insert or overwrite the record keyed by `user.uid`.
  fn put_user(
    &self,
    user: AdminUser,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_user(
    &self,
    uid: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All non-placeholder user records, ordered by email.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<AdminUser>, Self::Error>> + Send + '_;

  // ── Identities (credentials) ──────────────────────────────────────────

  /// Create a credential. Returns `None` if the email is already registered.
  fn insert_identity(
    &self,
    email: String,
    password_hash: String,
  ) -> impl Future<Output = Result<Option<IdentityRecord>, Self::Error>> + Send + '_;

  fn find_identity(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<IdentityRecord>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  fn insert_session(
    &self,
    session: SessionRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_session(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<Option<SessionRecord>, Self::Error>> + Send + '_;

  fn delete_session(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Drop every session that has expired at `now`. Returns how many went.
  fn purge_expired_sessions(
    &self,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
