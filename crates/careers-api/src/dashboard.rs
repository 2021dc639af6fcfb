//! Admin dashboard view-model.
//!
//! One call gathers everything the dashboard shows. The reads run
//! concurrently under a single deadline; if any of them fails or the deadline
//! passes, the caller gets one generic error and no partial view.

use careers_ai::Assistant;
use careers_core::{
  applicant::{EnrichedApplicant, enrich},
  job::Job,
  store::CareersStore,
  user::{AdminUser, Role, Session},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{ApiError, AppState};

pub const DASHBOARD_ERROR_MESSAGE: &str = "Could not load dashboard data.";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

// ─── Job table ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSort {
  Title,
  #[default]
  CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

fn default_page() -> usize { 1 }

fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }

/// Sorting and paging for the dashboard's job table. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct JobTableQuery {
  #[serde(default)]
  pub sort:      JobSort,
  #[serde(default)]
  pub order:     SortOrder,
  #[serde(default = "default_page")]
  pub page:      usize,
  #[serde(default = "default_page_size")]
  pub page_size: usize,
}

impl Default for JobTableQuery {
  fn default() -> Self {
    Self {
      sort:      JobSort::default(),
      order:     SortOrder::default(),
      page:      default_page(),
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
  #[serde(flatten)]
  pub job:     Job,
  /// Outside the freshness window at load time.
  pub expired: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTablePage {
  pub rows:        Vec<JobRow>,
  pub page:        usize,
  pub page_size:   usize,
  pub total_rows:  usize,
  pub total_pages: usize,
}

/// Sort and slice `jobs` for display. Out-of-range pages come back empty.
pub fn job_table(jobs: &[Job], query: JobTableQuery, now: DateTime<Utc>) -> JobTablePage {
  let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
  let page = query.page.max(1);

  let mut sorted: Vec<&Job> = jobs.iter().collect();
  sorted.sort_by(|a, b| {
    let ord = match query.sort {
      JobSort::Title => a
        .content
        .title
        .to_lowercase()
        .cmp(&b.content.title.to_lowercase()),
      JobSort::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    let ord = ord.then_with(|| a.id.cmp(&b.id));
    match query.order {
      SortOrder::Asc => ord,
      SortOrder::Desc => ord.reverse(),
    }
  });

  let total_rows = sorted.len();
  let rows = sorted
    .into_iter()
    .skip((page - 1).saturating_mul(page_size))
    .take(page_size)
    .map(|job| JobRow { expired: job.is_expired_at(now), job: job.clone() })
    .collect();

  JobTablePage {
    rows,
    page,
    page_size,
    total_rows,
    total_pages: total_rows.div_ceil(page_size),
  }
}

// ─── View ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
  pub active_jobs: usize,
  pub total_jobs:  usize,
  pub applicants:  usize,
  pub subscribers: u64,
  /// Only present for the super admin.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub staff:       Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
  pub role:       Role,
  pub counts:     DashboardCounts,
  pub jobs:       JobTablePage,
  pub applicants: Vec<EnrichedApplicant>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub staff:      Option<Vec<AdminUser>>,
}

/// Load the dashboard for `user`. Staff is only fetched for the super admin.
/// The super-admin bootstrap runs first, inside the same deadline as the
/// reads.
pub async fn load<S, A>(
  state: &AppState<S, A>,
  user: &AdminUser,
  query: JobTableQuery,
) -> Result<DashboardView, ApiError>
where
  S: CareersStore,
  A: Assistant,
{
  let gate = state.gate();
  let session = Session::Authenticated { user: user.clone() };
  let jobs_repo = state.jobs();
  let applicants_repo = state.applicants();
  let subscribers_repo = state.subscribers();

  let gather = async {
    gate.ensure_super_admin_exists().await;
    tokio::try_join!(
      jobs_repo.try_list_jobs(true),
      applicants_repo.list_applicants(),
      subscribers_repo.count(),
      async {
        if user.is_super_admin() {
          gate.list_admin_staff(&session).await.map(Some)
        } else {
          Ok(None)
        }
      },
    )
  };

  let (jobs, applicants, subscribers, staff) =
    match tokio::time::timeout(state.config.backend_timeout, gather).await {
      Ok(Ok(parts)) => parts,
      Ok(Err(e)) => {
        error!(error = %e, "dashboard load failed");
        return Err(ApiError::Unavailable(DASHBOARD_ERROR_MESSAGE.to_owned()));
      }
      Err(_) => {
        error!(timeout = ?state.config.backend_timeout, "dashboard load timed out");
        return Err(ApiError::Unavailable(DASHBOARD_ERROR_MESSAGE.to_owned()));
      }
    };

  let now = Utc::now();
  let applicants = enrich(applicants, &jobs);

  Ok(DashboardView {
    role: user.role,
    counts: DashboardCounts {
      active_jobs: jobs.iter().filter(|j| !j.is_expired_at(now)).count(),
      total_jobs: jobs.len(),
      applicants: applicants.len(),
      subscribers,
      staff: staff.as_ref().map(Vec::len),
    },
    jobs: job_table(&jobs, query, now),
    applicants,
    staff,
  })
}
