//! JSON API for the agency careers site.
//!
//! Holds the domain services (job, applicant and subscriber repositories, the
//! auth gate, the admin dashboard) and exposes them as an axum [`Router`]
//! backed by any [`CareersStore`] and [`Assistant`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", careers_api::api_router(state))
//! ```

pub mod dashboard;
pub mod error;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod identity;
pub mod repo;
pub mod revision;
pub mod seed;

#[cfg(test)]
mod tests;

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{get, post, put},
};
use careers_ai::Assistant;
use careers_core::{store::CareersStore, user::DEFAULT_SUPER_ADMIN_EMAIL};
use chrono::TimeDelta;

pub use error::ApiError;
use gate::AuthGate;
use identity::LocalIdentityProvider;
use repo::{ApplicantRepository, JobRepository, SubscriberRepository};
pub use revision::Revision;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Policy knobs for the API layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// The one email allowed to bootstrap as super admin.
  pub super_admin_email:     String,
  /// Give unseen identities the `ADMIN` role on first login. When `false`,
  /// such logins are refused until a record is provisioned out of band.
  pub auto_provision_admins: bool,
  pub session_ttl:           TimeDelta,
  /// Upper bound on the dashboard's aggregate store reads.
  pub backend_timeout:       Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      super_admin_email:     DEFAULT_SUPER_ADMIN_EMAIL.to_owned(),
      auto_provision_admins: true,
      session_ttl:           TimeDelta::hours(12),
      backend_timeout:       Duration::from_secs(10),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, A> {
  pub store:     Arc<S>,
  pub assistant: Arc<A>,
  pub identity:  Arc<LocalIdentityProvider<S>>,
  pub config:    Arc<ApiConfig>,
  pub revision:  Revision,
}

impl<S, A> Clone for AppState<S, A> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      assistant: Arc::clone(&self.assistant),
      identity:  Arc::clone(&self.identity),
      config:    Arc::clone(&self.config),
      revision:  self.revision.clone(),
    }
  }
}

impl<S, A> AppState<S, A>
where
  S: CareersStore,
  A: Assistant,
{
  pub fn new(store: Arc<S>, assistant: Arc<A>, config: ApiConfig) -> Self {
    Self {
      identity: Arc::new(LocalIdentityProvider::new(Arc::clone(&store))),
      store,
      assistant,
      config: Arc::new(config),
      revision: Revision::new(),
    }
  }

  pub fn jobs(&self) -> JobRepository<'_, S, A> {
    JobRepository::new(&*self.store, &*self.assistant, &self.revision)
  }

  pub fn applicants(&self) -> ApplicantRepository<'_, S> { ApplicantRepository::new(&*self.store) }

  pub fn subscribers(&self) -> SubscriberRepository<'_, S> {
    SubscriberRepository::new(&*self.store)
  }

  pub fn gate(&self) -> AuthGate<'_, S, LocalIdentityProvider<S>> {
    AuthGate::new(&*self.store, &*self.identity, &self.config)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, A>(state: AppState<S, A>) -> Router<()>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  use handlers::{applicants, assist, auth, dashboard, jobs, subscribers};

  Router::new()
    // Public
    .route("/jobs", get(jobs::list_public::<S, A>))
    .route("/jobs/{id}", get(jobs::get_one::<S, A>))
    .route("/jobs/{id}/applications", post(applicants::submit::<S, A>))
    .route("/jobs/{id}/related-blogs", post(assist::related_blogs::<S, A>))
    .route("/subscribers", post(subscribers::subscribe::<S, A>))
    .route("/resume/parse", post(assist::parse_resume::<S, A>))
    .route("/resume/enhance", post(assist::enhance_resume::<S, A>))
    .route("/revision", get(jobs::revision::<S, A>))
    // Auth
    .route("/auth/login", post(auth::login::<S, A>))
    .route("/auth/logout", post(auth::logout::<S, A>))
    .route("/auth/session", get(auth::session::<S, A>))
    // Admin
    .route("/admin/dashboard", get(dashboard::load::<S, A>))
    .route("/admin/jobs", get(jobs::list_all::<S, A>).post(jobs::create::<S, A>))
    .route("/admin/jobs/{id}", put(jobs::update::<S, A>).delete(jobs::remove::<S, A>))
    .route("/admin/applicants", get(applicants::list::<S, A>))
    .route("/admin/subscribers/count", get(subscribers::count::<S, A>))
    .route("/admin/staff", get(auth::staff::<S, A>))
    .route("/admin/assist/job-description", post(assist::job_description::<S, A>))
    .route("/admin/assist/tags", post(assist::tags::<S, A>))
    .with_state(state)
}
