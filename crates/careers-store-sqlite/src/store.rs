//! [`SqliteStore`], the SQLite implementation of [`CareersStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use careers_core::{
  applicant::{Applicant, NewApplicant},
  job::{Job, NewJob},
  store::CareersStore,
  subscriber::Subscriber,
  user::{AdminUser, IdentityRecord, SessionRecord},
};

use crate::{
  Result,
  encode::{
    EncodedJobContent, JOB_COLUMNS, RawApplicant, RawIdentity, RawJob, RawSession,
    RawUser, decode_count, decode_millis, encode_millis, encode_uuid,
  },
  schema::SCHEMA,
};

/// The current instant, truncated to the millisecond precision the columns
/// hold, so returned values compare equal to what a later read produces.
fn now_millis() -> Result<DateTime<Utc>> { decode_millis(encode_millis(Utc::now())) }

// ─── Store ───────────────────────────────────────────────────────────────────

/// A careers store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_job(&self, job: &Job) -> Result<()> {
    let id_str  = encode_uuid(job.id);
    let enc     = EncodedJobContent::new(&job.content, &job.skills)?;
    let at_ms   = encode_millis(job.created_at);
    let creator = job.created_by.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO jobs (
             job_id, title, company, location, description,
             responsibilities, must_have_skills, industry_type, department,
             employment_type, role_category, education, tags, skills,
             application_type, apply_link, created_at, created_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                     ?15, ?16, ?17, ?18)",
          rusqlite::params![
            id_str,
            enc.title,
            enc.company,
            enc.location,
            enc.description,
            enc.responsibilities,
            enc.must_have_skills,
            enc.industry_type,
            enc.department,
            enc.employment_type,
            enc.role_category,
            enc.education,
            enc.tags,
            enc.skills,
            enc.application_type,
            enc.apply_link,
            at_ms,
            creator,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn count(&self, sql: &'static str) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, [], |r| r.get(0))?))
      .await?;
    decode_count(n)
  }
}

// ─── CareersStore impl ───────────────────────────────────────────────────────

impl CareersStore for SqliteStore {
  type Error = crate::Error;

  // ── Jobs ──────────────────────────────────────────────────────────────────

  async fn insert_job(&self, input: NewJob) -> Result<Job> {
    let job = Job {
      id:         Uuid::new_v4(),
      content:    input.content,
      skills:     input.skills,
      created_at: now_millis()?,
      created_by: input.created_by,
    };
    self.write_job(&job).await?;
    Ok(job)
  }

  async fn import_job(&self, job: Job) -> Result<()> { self.write_job(&job).await }

  async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawJob> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE job_id = ?1"),
            rusqlite::params![id_str],
            RawJob::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawJob::into_job).transpose()
  }

  async fn list_jobs(&self, created_since: Option<DateTime<Utc>>) -> Result<Vec<Job>> {
    let since_ms = created_since.map(encode_millis);

    let raws: Vec<RawJob> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {JOB_COLUMNS} FROM jobs
           WHERE ?1 IS NULL OR created_at >= ?1
           ORDER BY created_at DESC, job_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![since_ms], RawJob::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJob::into_job).collect()
  }

  async fn count_jobs(&self) -> Result<u64> { self.count("SELECT COUNT(*) FROM jobs").await }

  async fn update_job(&self, job: Job) -> Result<bool> {
    let id_str = encode_uuid(job.id);
    let enc    = EncodedJobContent::new(&job.content, &job.skills)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE jobs SET
             title = ?2, company = ?3, location = ?4, description = ?5,
             responsibilities = ?6, must_have_skills = ?7, industry_type = ?8,
             department = ?9, employment_type = ?10, role_category = ?11,
             education = ?12, tags = ?13, skills = ?14,
             application_type = ?15, apply_link = ?16
           WHERE job_id = ?1",
          rusqlite::params![
            id_str,
            enc.title,
            enc.company,
            enc.location,
            enc.description,
            enc.responsibilities,
            enc.must_have_skills,
            enc.industry_type,
            enc.department,
            enc.employment_type,
            enc.role_category,
            enc.education,
            enc.tags,
            enc.skills,
            enc.application_type,
            enc.apply_link,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_job(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM jobs WHERE job_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  // ── Applicants ────────────────────────────────────────────────────────────

  async fn insert_applicant(&self, input: NewApplicant) -> Result<Applicant> {
    let applicant = Applicant {
      id:           Uuid::new_v4(),
      job_id:       input.job_id,
      name:         input.name,
      email:        input.email,
      resume:       input.resume,
      cover_letter: input.cover_letter,
      applied_at:   now_millis()?,
    };

    let id_str     = encode_uuid(applicant.id);
    let job_id_str = encode_uuid(applicant.job_id);
    let name       = applicant.name.clone();
    let email      = applicant.email.clone();
    let resume     = applicant.resume.clone();
    let cover      = applicant.cover_letter.clone();
    let at_ms      = encode_millis(applicant.applied_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO applicants
             (applicant_id, job_id, name, email, resume, cover_letter, applied_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, job_id_str, name, email, resume, cover, at_ms],
        )?;
        Ok(())
      })
      .await?;

    Ok(applicant)
  }

  async fn list_applicants(&self) -> Result<Vec<Applicant>> {
    let raws: Vec<RawApplicant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT applicant_id, job_id, name, email, resume, cover_letter, applied_at
           FROM applicants
           ORDER BY applied_at DESC, applicant_id",
        )?;
        let rows = stmt
          .query_map([], RawApplicant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawApplicant::into_applicant).collect()
  }

  // ── Subscribers ───────────────────────────────────────────────────────────

  async fn insert_subscriber(&self, email: String) -> Result<Option<Subscriber>> {
    let subscriber = Subscriber {
      id:            Uuid::new_v4(),
      email,
      subscribed_at: now_millis()?,
    };

    let id_str = encode_uuid(subscriber.id);
    let email  = subscriber.email.clone();
    let at_ms  = encode_millis(subscriber.subscribed_at);

    // The UNIQUE constraint settles concurrent subscriptions of one address.
    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO subscribers (subscriber_id, email, subscribed_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT(email) DO NOTHING",
          rusqlite::params![id_str, email, at_ms],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(subscriber))
  }

  async fn count_subscribers(&self) -> Result<u64> {
    self.count("SELECT COUNT(*) FROM subscribers").await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn get_user(&self, uid: String) -> Result<Option<AdminUser>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT uid, email, role, is_placeholder FROM users WHERE uid = ?1",
            rusqlite::params![uid],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn find_user_by_email(&self, email: String) -> Result<Option<AdminUser>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT uid, email, role, is_placeholder FROM users
             WHERE email = ?1 COLLATE NOCASE
             ORDER BY is_placeholder, uid
             LIMIT 1",
            rusqlite::params![email],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn put_user(&self, user: AdminUser) -> Result<()> {
    let role = user.role.as_ref().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (uid, email, role, is_placeholder)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(uid) DO UPDATE SET
             email          = excluded.email,
             role           = excluded.role,
             is_placeholder = excluded.is_placeholder",
          rusqlite::params![user.uid, user.email, role, user.is_placeholder],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_user(&self, uid: String) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM users WHERE uid = ?1", rusqlite::params![uid])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn list_users(&self) -> Result<Vec<AdminUser>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT uid, email, role, is_placeholder FROM users
           WHERE is_placeholder = 0
           ORDER BY email COLLATE NOCASE, uid",
        )?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  // ── Identities ────────────────────────────────────────────────────────────

  async fn insert_identity(
    &self,
    email: String,
    password_hash: String,
  ) -> Result<Option<IdentityRecord>> {
    let record = IdentityRecord {
      uid: Uuid::new_v4().simple().to_string(),
      email,
      password_hash,
      created_at: now_millis()?,
    };

    let uid   = record.uid.clone();
    let email = record.email.clone();
    let hash  = record.password_hash.clone();
    let at_ms = encode_millis(record.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO identities (uid, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(email) DO NOTHING",
          rusqlite::params![uid, email, hash, at_ms],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(record))
  }

  async fn find_identity(&self, email: String) -> Result<Option<IdentityRecord>> {
    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT uid, email, password_hash, created_at FROM identities
             WHERE email = ?1",
            rusqlite::params![email],
            |row| {
              Ok(RawIdentity {
                uid:           row.get(0)?,
                email:         row.get(1)?,
                password_hash: row.get(2)?,
                created_at:    row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_record).transpose()
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn insert_session(&self, session: SessionRecord) -> Result<()> {
    let created_ms = encode_millis(session.created_at);
    let expires_ms = encode_millis(session.expires_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token_hash, uid, created_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![session.token_hash, session.uid, created_ms, expires_ms],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_session(&self, token_hash: String) -> Result<Option<SessionRecord>> {
    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT token_hash, uid, created_at, expires_at FROM sessions
             WHERE token_hash = ?1",
            rusqlite::params![token_hash],
            |row| {
              Ok(RawSession {
                token_hash: row.get(0)?,
                uid:        row.get(1)?,
                created_at: row.get(2)?,
                expires_at: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_record).transpose()
  }

  async fn delete_session(&self, token_hash: String) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM sessions WHERE token_hash = ?1",
          rusqlite::params![token_hash],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
    let now_ms = encode_millis(now);
    let purged = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM sessions WHERE expires_at <= ?1",
          rusqlite::params![now_ms],
        )?)
      })
      .await?;
    Ok(purged as u64)
  }
}
