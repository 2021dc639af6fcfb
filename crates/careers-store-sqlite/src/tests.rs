//! Integration tests for `SqliteStore` against an in-memory database.

use careers_core::{
  applicant::NewApplicant,
  job::{Application, Job, JobContent, NewJob, freshness_cutoff},
  store::CareersStore,
  user::{AdminUser, PLACEHOLDER_UID, Role, SessionRecord},
};
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn content(title: &str) -> JobContent {
  JobContent {
    title:            title.into(),
    company:          "Acme Corp".into(),
    location:         "Remote".into(),
    description:      "Build and run distributed systems.".into(),
    responsibilities: vec!["Ship features".into()],
    must_have_skills: vec!["Rust".into()],
    industry_type:    "Software".into(),
    department:       "Engineering".into(),
    employment_type:  "Full-time".into(),
    role_category:    "Backend".into(),
    education:        "Any graduate".into(),
    tags:             vec!["rust".into(), "backend".into()],
    application:      Application::Form,
  }
}

fn new_job(title: &str) -> NewJob {
  NewJob {
    content:    content(title),
    skills:     vec!["Rust".into(), "SQL".into()],
    created_by: "admin@example.com".into(),
  }
}

fn admin(uid: &str, email: &str) -> AdminUser {
  AdminUser {
    uid:            uid.into(),
    email:          email.into(),
    role:           Role::Admin,
    is_placeholder: false,
  }
}

// ─── Jobs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_job() {
  let s = store().await;

  let job = s.insert_job(new_job("Backend Engineer")).await.unwrap();
  let fetched = s.get_job(job.id).await.unwrap().expect("job exists");

  assert_eq!(fetched, job);
  assert_eq!(fetched.skills, vec!["Rust", "SQL"]);
  assert_eq!(fetched.created_by, "admin@example.com");
}

#[tokio::test]
async fn get_job_missing_returns_none() {
  let s = store().await;
  assert!(s.get_job(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn link_application_round_trips() {
  let s = store().await;
  let mut input = new_job("Designer");
  input.content.application = Application::Link {
    apply_link: "https://jobs.example.com/apply/42".parse().unwrap(),
  };

  let job = s.insert_job(input).await.unwrap();
  let fetched = s.get_job(job.id).await.unwrap().unwrap();
  assert_eq!(
    fetched.content.application.apply_link().map(|u| u.as_str()),
    Some("https://jobs.example.com/apply/42")
  );
}

#[tokio::test]
async fn list_jobs_applies_freshness_cutoff() {
  let s = store().await;
  let now = Utc::now();

  for (title, age_days) in [("Today", 0), ("Three days", 3), ("Ten days", 10)] {
    s.import_job(Job {
      id:         Uuid::new_v4(),
      content:    content(title),
      skills:     vec![],
      created_at: now - TimeDelta::days(age_days),
      created_by: "admin@example.com".into(),
    })
    .await
    .unwrap();
  }

  let fresh = s.list_jobs(Some(freshness_cutoff(now))).await.unwrap();
  let titles: Vec<_> = fresh.iter().map(|j| j.content.title.as_str()).collect();
  assert_eq!(titles, vec!["Today", "Three days"]);

  let all = s.list_jobs(None).await.unwrap();
  let titles: Vec<_> = all.iter().map(|j| j.content.title.as_str()).collect();
  assert_eq!(titles, vec!["Today", "Three days", "Ten days"]);
  assert!(all[2].is_expired_at(now));
  assert_eq!(s.count_jobs().await.unwrap(), 3);
}

#[tokio::test]
async fn update_job_keeps_creation_fields() {
  let s = store().await;
  let job = s.insert_job(new_job("Backend Engineer")).await.unwrap();

  let mut edited = job.clone();
  edited.content.title = "Staff Engineer".into();
  edited.created_by = "someone-else@example.com".into();
  edited.created_at = job.created_at - TimeDelta::days(30);
  assert!(s.update_job(edited).await.unwrap());

  let fetched = s.get_job(job.id).await.unwrap().unwrap();
  assert_eq!(fetched.content.title, "Staff Engineer");
  assert_eq!(fetched.created_by, job.created_by);
  assert_eq!(fetched.created_at, job.created_at);
}

#[tokio::test]
async fn update_missing_job_returns_false() {
  let s = store().await;
  let mut ghost = s.insert_job(new_job("Ghost")).await.unwrap();
  ghost.id = Uuid::new_v4();
  assert!(!s.update_job(ghost).await.unwrap());
}

#[tokio::test]
async fn delete_job_is_hard_and_reports_absence() {
  let s = store().await;
  let job = s.insert_job(new_job("Backend Engineer")).await.unwrap();

  assert!(s.delete_job(job.id).await.unwrap());
  assert!(s.get_job(job.id).await.unwrap().is_none());
  assert!(!s.delete_job(job.id).await.unwrap());
}

// ─── Applicants ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn applicants_survive_job_deletion_and_list_newest_first() {
  let s = store().await;
  let job = s.insert_job(new_job("Backend Engineer")).await.unwrap();

  let first = s
    .insert_applicant(NewApplicant {
      job_id:       job.id,
      name:         "Ada".into(),
      email:        "ada@example.com".into(),
      resume:       "ada.pdf".into(),
      cover_letter: None,
    })
    .await
    .unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  let second = s
    .insert_applicant(NewApplicant {
      job_id:       job.id,
      name:         "Grace".into(),
      email:        "grace@example.com".into(),
      resume:       "grace.pdf".into(),
      cover_letter: Some("Hello".into()),
    })
    .await
    .unwrap();

  s.delete_job(job.id).await.unwrap();

  let all = s.list_applicants().await.unwrap();
  assert_eq!(all, vec![second, first]);
}

// ─── Subscribers ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_subscriber_is_not_inserted() {
  let s = store().await;

  let first = s.insert_subscriber("jane@example.com".into()).await.unwrap();
  assert!(first.is_some());

  let again = s.insert_subscriber("JANE@example.com".into()).await.unwrap();
  assert!(again.is_none());

  assert_eq!(s.count_subscribers().await.unwrap(), 1);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_user_upserts_and_list_skips_placeholders() {
  let s = store().await;

  s.put_user(AdminUser::placeholder("super@admin.com")).await.unwrap();
  s.put_user(admin("u-b", "bob@example.com")).await.unwrap();
  s.put_user(admin("u-a", "alice@example.com")).await.unwrap();

  let mut promoted = admin("u-b", "bob@example.com");
  promoted.role = Role::SuperAdmin;
  s.put_user(promoted).await.unwrap();

  let users = s.list_users().await.unwrap();
  let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
  assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);
  assert_eq!(users[1].role, Role::SuperAdmin);

  let placeholder = s.get_user(PLACEHOLDER_UID.into()).await.unwrap().unwrap();
  assert!(placeholder.is_placeholder);
}

#[tokio::test]
async fn find_user_by_email_prefers_real_records() {
  let s = store().await;
  s.put_user(AdminUser::placeholder("super@admin.com")).await.unwrap();

  let found = s.find_user_by_email("SUPER@admin.com".into()).await.unwrap().unwrap();
  assert!(found.is_placeholder);

  let mut real = admin("u-super", "super@admin.com");
  real.role = Role::SuperAdmin;
  s.put_user(real).await.unwrap();

  let found = s.find_user_by_email("super@admin.com".into()).await.unwrap().unwrap();
  assert_eq!(found.uid, "u-super");

  assert!(s.delete_user(PLACEHOLDER_UID.into()).await.unwrap());
  assert!(!s.delete_user(PLACEHOLDER_UID.into()).await.unwrap());
}

// ─── Identities and sessions ─────────────────────────────────────────────────

#[tokio::test]
async fn identity_email_is_unique() {
  let s = store().await;

  let record = s
    .insert_identity("admin@example.com".into(), "$argon2id$stub".into())
    .await
    .unwrap()
    .expect("first insert");
  let dup = s
    .insert_identity("Admin@Example.com".into(), "$argon2id$other".into())
    .await
    .unwrap();
  assert!(dup.is_none());

  let found = s.find_identity("ADMIN@example.com".into()).await.unwrap().unwrap();
  assert_eq!(found.uid, record.uid);
  assert_eq!(found.password_hash, "$argon2id$stub");
}

#[tokio::test]
async fn sessions_insert_get_delete() {
  let s = store().await;
  let now = Utc::now();
  let session = SessionRecord {
    token_hash: "abc123".into(),
    uid:        "u-a".into(),
    created_at: now,
    expires_at: now + TimeDelta::hours(12),
  };
  s.insert_session(session).await.unwrap();

  let fetched = s.get_session("abc123".into()).await.unwrap().unwrap();
  assert_eq!(fetched.uid, "u-a");
  assert!(!fetched.is_expired_at(now));
  assert!(fetched.is_expired_at(now + TimeDelta::hours(13)));

  assert!(s.delete_session("abc123".into()).await.unwrap());
  assert!(!s.delete_session("abc123".into()).await.unwrap());
  assert!(s.get_session("abc123".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn purge_drops_only_expired_sessions() {
  let s = store().await;
  let now = Utc::now();
  for (hash, ttl) in [("stale", TimeDelta::hours(-1)), ("edge", TimeDelta::zero()), ("live", TimeDelta::hours(1))] {
    s.insert_session(SessionRecord {
      token_hash: hash.into(),
      uid:        "u-a".into(),
      created_at: now - TimeDelta::hours(2),
      expires_at: now + ttl,
    })
    .await
    .unwrap();
  }

  assert_eq!(s.purge_expired_sessions(now).await.unwrap(), 2);
  assert!(s.get_session("stale".into()).await.unwrap().is_none());
  assert!(s.get_session("edge".into()).await.unwrap().is_none());
  assert!(s.get_session("live".into()).await.unwrap().is_some());
  assert_eq!(s.purge_expired_sessions(now).await.unwrap(), 0);
}
