//! A store wrapper that can be told to fail or to stop answering.

use std::sync::atomic::{AtomicBool, Ordering};

use careers_core::{
  applicant::{Applicant, NewApplicant},
  job::{Job, NewJob},
  store::CareersStore,
  subscriber::Subscriber,
  user::{AdminUser, IdentityRecord, SessionRecord},
};
use careers_store_sqlite::SqliteStore;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreFault {
  #[error("store is offline")]
  Offline,

  #[error(transparent)]
  Sqlite(#[from] careers_store_sqlite::Error),
}

pub(crate) struct FlakyStore {
  inner:   SqliteStore,
  failing: AtomicBool,
  stalled: AtomicBool,
}

impl FlakyStore {
  pub fn new(inner: SqliteStore) -> Self {
    Self { inner, failing: AtomicBool::new(false), stalled: AtomicBool::new(false) }
  }

  /// Every call returns [`StoreFault::Offline`] while set.
  pub fn set_failing(&self, failing: bool) { self.failing.store(failing, Ordering::SeqCst); }

  /// Every call waits forever while set.
  pub fn set_stalled(&self, stalled: bool) { self.stalled.store(stalled, Ordering::SeqCst); }

  async fn check(&self) -> Result<(), StoreFault> {
    if self.stalled.load(Ordering::SeqCst) {
      std::future::pending::<()>().await;
    }
    if self.failing.load(Ordering::SeqCst) {
      return Err(StoreFault::Offline);
    }
    Ok(())
  }
}

macro_rules! delegate {
  ($( fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty; )*) => {
    $(
      async fn $name(&self $(, $arg: $ty)*) -> Result<$ret, StoreFault> {
        self.check().await?;
        Ok(self.inner.$name($($arg),*).await?)
      }
    )*
  };
}

impl CareersStore for FlakyStore {
  type Error = StoreFault;

  delegate! {
    fn insert_job(&self, input: NewJob) -> Job;
    fn import_job(&self, job: Job) -> ();
    fn get_job(&self, id: Uuid) -> Option<Job>;
    fn list_jobs(&self, created_since: Option<DateTime<Utc>>) -> Vec<Job>;
    fn count_jobs(&self) -> u64;
    fn update_job(&self, job: Job) -> bool;
    fn delete_job(&self, id: Uuid) -> bool;
    fn insert_applicant(&self, input: NewApplicant) -> Applicant;
    fn list_applicants(&self) -> Vec<Applicant>;
    fn insert_subscriber(&self, email: String) -> Option<Subscriber>;
    fn count_subscribers(&self) -> u64;
    fn get_user(&self, uid: String) -> Option<AdminUser>;
    fn find_user_by_email(&self, email: String) -> Option<AdminUser>;
    fn put_user(&self, user: AdminUser) -> ();
    fn delete_user(&self, uid: String) -> bool;
    fn list_users(&self) -> Vec<AdminUser>;
    fn insert_identity(&self, email: String, password_hash: String) -> Option<IdentityRecord>;
    fn find_identity(&self, email: String) -> Option<IdentityRecord>;
    fn insert_session(&self, session: SessionRecord) -> ();
    fn get_session(&self, token_hash: String) -> Option<SessionRecord>;
    fn delete_session(&self, token_hash: String) -> bool;
    fn purge_expired_sessions(&self, now: DateTime<Utc>) -> u64;
  }
}
