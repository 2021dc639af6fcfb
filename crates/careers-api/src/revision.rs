//! Content revision: a counter bumped on every job write.
//!
//! Views derived from the job list (public listings, the dashboard) poll
//! `GET /revision` and compare it with the value they rendered to know when to
//! refresh.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Clone, Default)]
pub struct Revision(Arc<AtomicU64>);

impl Revision {
  pub fn new() -> Self { Self::default() }

  pub fn current(&self) -> u64 { self.0.load(Ordering::Acquire) }

  /// Advance the revision; returns the new value.
  pub fn bump(&self) -> u64 { self.0.fetch_add(1, Ordering::AcqRel) + 1 }
}
