use std::time::Duration;

use careers_core::{
  job::{Job, freshness_cutoff},
  store::CareersStore,
  user::{AdminUser, Role},
};
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use super::{draft, flaky_state, state};
use crate::{
  ApiConfig, ApiError,
  dashboard::{DASHBOARD_ERROR_MESSAGE, JobSort, JobTableQuery, SortOrder, job_table, load},
};

fn user(email: &str, role: Role) -> AdminUser {
  AdminUser {
    uid: format!("uid-{email}"),
    email: email.into(),
    role,
    is_placeholder: false,
  }
}

#[tokio::test]
async fn admin_view_omits_staff() {
  let s = state().await;
  let admin = user("editor@example.com", Role::Admin);
  s.store.put_user(admin.clone()).await.unwrap();

  let fresh = s.jobs().add_job(draft("UX Designer"), &admin.email).await.unwrap();
  let stale = Job {
    id: Uuid::new_v4(),
    created_at: freshness_cutoff(Utc::now()) - TimeDelta::days(2),
    ..fresh.clone()
  };
  s.store.import_job(stale).await.unwrap();
  s.subscribers().subscribe("reader@example.com").await.unwrap();

  let view = load(&s, &admin, JobTableQuery::default()).await.unwrap();
  assert_eq!(view.role, Role::Admin);
  assert_eq!(view.counts.total_jobs, 2);
  assert_eq!(view.counts.active_jobs, 1);
  assert_eq!(view.counts.subscribers, 1);
  assert_eq!(view.counts.staff, None);
  assert!(view.staff.is_none());
  assert_eq!(view.jobs.rows.iter().filter(|r| r.expired).count(), 1);

  // Loading also bootstraps the super-admin placeholder.
  let found = s.store.find_user_by_email("super@admin.com".into()).await.unwrap();
  assert!(found.is_some_and(|u| u.is_placeholder));
}

#[tokio::test]
async fn super_admin_view_includes_staff() {
  let s = state().await;
  let root = user("super@admin.com", Role::SuperAdmin);
  s.store.put_user(root.clone()).await.unwrap();
  s.store.put_user(user("editor@example.com", Role::Admin)).await.unwrap();

  let view = load(&s, &root, JobTableQuery::default()).await.unwrap();
  let staff = view.staff.unwrap();
  assert_eq!(staff.len(), 2);
  assert_eq!(view.counts.staff, Some(2));
}

#[tokio::test]
async fn applicants_carry_job_titles() {
  let s = state().await;
  let admin = user("editor@example.com", Role::Admin);
  let job = s.jobs().add_job(draft("UX Designer"), &admin.email).await.unwrap();
  s.applicants()
    .add_applicant(job.id, careers_core::applicant::ApplicationSubmission {
      name: "Jane".into(),
      email: "jane@example.com".into(),
      resume: "jane.pdf".into(),
      cover_letter: None,
    })
    .await
    .unwrap();

  let view = load(&s, &admin, JobTableQuery::default()).await.unwrap();
  assert_eq!(view.counts.applicants, 1);
  assert_eq!(view.applicants[0].job_title, "UX Designer");
}

// ─── Job table ───────────────────────────────────────────────────────────────

fn jobs(titles: &[&str]) -> Vec<Job> {
  let now = Utc::now();
  titles
    .iter()
    .enumerate()
    .map(|(i, title)| Job {
      id:         Uuid::new_v4(),
      content:    draft(title).validate().unwrap(),
      skills:     Vec::new(),
      created_at: now - TimeDelta::minutes(i as i64),
      created_by: "ops@example.com".into(),
    })
    .collect()
}

fn titles(page: &crate::dashboard::JobTablePage) -> Vec<&str> {
  page.rows.iter().map(|r| r.job.content.title.as_str()).collect()
}

#[test]
fn table_sorts_by_title_case_insensitively() {
  let list = jobs(&["beta", "Alpha", "gamma"]);
  let query = JobTableQuery { sort: JobSort::Title, order: SortOrder::Asc, ..Default::default() };
  assert_eq!(titles(&job_table(&list, query, Utc::now())), vec!["Alpha", "beta", "gamma"]);

  let query = JobTableQuery { order: SortOrder::Desc, ..query };
  assert_eq!(titles(&job_table(&list, query, Utc::now())), vec!["gamma", "beta", "Alpha"]);
}

#[test]
fn table_defaults_to_newest_first() {
  let list = jobs(&["newest", "middle", "oldest"]);
  let page = job_table(&list, JobTableQuery::default(), Utc::now());
  assert_eq!(titles(&page), vec!["newest", "middle", "oldest"]);
}

#[test]
fn table_pagination() {
  let list = jobs(&["a", "b", "c", "d", "e"]);
  let query = JobTableQuery {
    sort: JobSort::Title,
    order: SortOrder::Asc,
    page: 2,
    page_size: 2,
  };
  let page = job_table(&list, query, Utc::now());
  assert_eq!(titles(&page), vec!["c", "d"]);
  assert_eq!(page.total_rows, 5);
  assert_eq!(page.total_pages, 3);

  let past_end = job_table(&list, JobTableQuery { page: 9, ..query }, Utc::now());
  assert!(past_end.rows.is_empty());

  let zero = job_table(&list, JobTableQuery { page: 0, page_size: 0, ..query }, Utc::now());
  assert_eq!(zero.page, 1);
  assert_eq!(zero.page_size, 1);
  assert_eq!(titles(&zero), vec!["a"]);
}

#[tokio::test]
async fn store_failure_yields_generic_error() {
  let s = flaky_state(ApiConfig::default()).await;
  let owner = user("owner@example.com", Role::SuperAdmin);
  s.store.put_user(owner.clone()).await.unwrap();
  s.jobs().add_job(draft("UX Designer"), &owner.email).await.unwrap();
  s.store.set_failing(true);

  let err = load(&s, &owner, JobTableQuery::default()).await.unwrap_err();
  let ApiError::Unavailable(message) = err else { panic!("expected unavailable") };
  assert_eq!(message, DASHBOARD_ERROR_MESSAGE);

  s.store.set_failing(false);
  assert!(load(&s, &owner, JobTableQuery::default()).await.is_ok());
}

#[tokio::test]
async fn zero_deadline_yields_generic_error() {
  let s = flaky_state(ApiConfig { backend_timeout: Duration::ZERO, ..ApiConfig::default() }).await;
  let admin = user("editor@example.com", Role::Admin);
  s.store.put_user(admin.clone()).await.unwrap();
  s.jobs().add_job(draft("UX Designer"), &admin.email).await.unwrap();
  s.store.set_stalled(true);

  let err = load(&s, &admin, JobTableQuery::default()).await.unwrap_err();
  let ApiError::Unavailable(message) = err else { panic!("expected unavailable") };
  assert_eq!(message, DASHBOARD_ERROR_MESSAGE);
}

#[tokio::test]
async fn stalled_bootstrap_is_bounded_by_deadline() {
  let s = flaky_state(ApiConfig {
    backend_timeout: Duration::from_millis(50),
    ..ApiConfig::default()
  })
  .await;
  let admin = user("editor@example.com", Role::Admin);
  s.store.set_stalled(true);

  let outcome = tokio::time::timeout(
    Duration::from_secs(5),
    load(&s, &admin, JobTableQuery::default()),
  )
  .await
  .expect("load must give up at its own deadline");
  assert!(matches!(outcome, Err(ApiError::Unavailable(m)) if m == DASHBOARD_ERROR_MESSAGE));
}
