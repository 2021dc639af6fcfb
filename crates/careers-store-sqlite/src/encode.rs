//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as epoch milliseconds. String lists are stored as
//! compact JSON arrays. UUIDs are stored as hyphenated lowercase strings.

use careers_core::{
  applicant::Applicant,
  job::{Application, Job, JobContent},
  user::{AdminUser, IdentityRecord, Role, SessionRecord},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_millis(dt: DateTime<Utc>) -> i64 { dt.timestamp_millis() }

pub fn decode_millis(ms: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(ms).ok_or(Error::Timestamp(ms))
}

// ─── Lists ───────────────────────────────────────────────────────────────────

pub fn encode_list(values: &[String]) -> Result<String> {
  Ok(serde_json::to_string(values)?)
}

pub fn decode_list(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::Count(n))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawJob::from_row`].
pub const JOB_COLUMNS: &str = "job_id, title, company, location, description,
  responsibilities, must_have_skills, industry_type, department,
  employment_type, role_category, education, tags, skills,
  application_type, apply_link, created_at, created_by";

/// Raw values read directly from a `jobs` row.
pub struct RawJob {
  pub job_id:           String,
  pub title:            String,
  pub company:          String,
  pub location:         String,
  pub description:      String,
  pub responsibilities: String,
  pub must_have_skills: String,
  pub industry_type:    String,
  pub department:       String,
  pub employment_type:  String,
  pub role_category:    String,
  pub education:        String,
  pub tags:             String,
  pub skills:           String,
  pub application_type: String,
  pub apply_link:       Option<String>,
  pub created_at:       i64,
  pub created_by:       String,
}

impl RawJob {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      job_id:           row.get(0)?,
      title:            row.get(1)?,
      company:          row.get(2)?,
      location:         row.get(3)?,
      description:      row.get(4)?,
      responsibilities: row.get(5)?,
      must_have_skills: row.get(6)?,
      industry_type:    row.get(7)?,
      department:       row.get(8)?,
      employment_type:  row.get(9)?,
      role_category:    row.get(10)?,
      education:        row.get(11)?,
      tags:             row.get(12)?,
      skills:           row.get(13)?,
      application_type: row.get(14)?,
      apply_link:       row.get(15)?,
      created_at:       row.get(16)?,
      created_by:       row.get(17)?,
    })
  }

  pub fn into_job(self) -> Result<Job> {
    let application =
      Application::from_parts(&self.application_type, self.apply_link.as_deref())?;

    Ok(Job {
      id:         decode_uuid(&self.job_id)?,
      content:    JobContent {
        title: self.title,
        company: self.company,
        location: self.location,
        description: self.description,
        responsibilities: decode_list(&self.responsibilities)?,
        must_have_skills: decode_list(&self.must_have_skills)?,
        industry_type: self.industry_type,
        department: self.department,
        employment_type: self.employment_type,
        role_category: self.role_category,
        education: self.education,
        tags: decode_list(&self.tags)?,
        application,
      },
      skills:     decode_list(&self.skills)?,
      created_at: decode_millis(self.created_at)?,
      created_by: self.created_by,
    })
  }
}

/// Encoded form of the editable job columns, ready to bind.
pub struct EncodedJobContent {
  pub title:            String,
  pub company:          String,
  pub location:         String,
  pub description:      String,
  pub responsibilities: String,
  pub must_have_skills: String,
  pub industry_type:    String,
  pub department:       String,
  pub employment_type:  String,
  pub role_category:    String,
  pub education:        String,
  pub tags:             String,
  pub skills:           String,
  pub application_type: String,
  pub apply_link:       Option<String>,
}

impl EncodedJobContent {
  pub fn new(content: &JobContent, skills: &[String]) -> Result<Self> {
    Ok(Self {
      title:            content.title.clone(),
      company:          content.company.clone(),
      location:         content.location.clone(),
      description:      content.description.clone(),
      responsibilities: encode_list(&content.responsibilities)?,
      must_have_skills: encode_list(&content.must_have_skills)?,
      industry_type:    content.industry_type.clone(),
      department:       content.department.clone(),
      employment_type:  content.employment_type.clone(),
      role_category:    content.role_category.clone(),
      education:        content.education.clone(),
      tags:             encode_list(&content.tags)?,
      skills:           encode_list(skills)?,
      application_type: content.application.kind().as_ref().to_owned(),
      apply_link:       content.application.apply_link().map(|u| u.to_string()),
    })
  }
}

/// Raw values read directly from an `applicants` row.
pub struct RawApplicant {
  pub applicant_id: String,
  pub job_id:       String,
  pub name:         String,
  pub email:        String,
  pub resume:       String,
  pub cover_letter: Option<String>,
  pub applied_at:   i64,
}

impl RawApplicant {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      applicant_id: row.get(0)?,
      job_id:       row.get(1)?,
      name:         row.get(2)?,
      email:        row.get(3)?,
      resume:       row.get(4)?,
      cover_letter: row.get(5)?,
      applied_at:   row.get(6)?,
    })
  }

  pub fn into_applicant(self) -> Result<Applicant> {
    Ok(Applicant {
      id:           decode_uuid(&self.applicant_id)?,
      job_id:       decode_uuid(&self.job_id)?,
      name:         self.name,
      email:        self.email,
      resume:       self.resume,
      cover_letter: self.cover_letter,
      applied_at:   decode_millis(self.applied_at)?,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub uid:            String,
  pub email:          String,
  pub role:           String,
  pub is_placeholder: bool,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      uid:            row.get(0)?,
      email:          row.get(1)?,
      role:           row.get(2)?,
      is_placeholder: row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<AdminUser> {
    Ok(AdminUser {
      uid:            self.uid,
      email:          self.email,
      role:           Role::parse(&self.role)?,
      is_placeholder: self.is_placeholder,
    })
  }
}

/// Raw values read directly from an `identities` row.
pub struct RawIdentity {
  pub uid:           String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    i64,
}

impl RawIdentity {
  pub fn into_record(self) -> Result<IdentityRecord> {
    Ok(IdentityRecord {
      uid:           self.uid,
      email:         self.email,
      password_hash: self.password_hash,
      created_at:    decode_millis(self.created_at)?,
    })
  }
}

/// Raw values read directly from a `sessions` row.
pub struct RawSession {
  pub token_hash: String,
  pub uid:        String,
  pub created_at: i64,
  pub expires_at: i64,
}

impl RawSession {
  pub fn into_record(self) -> Result<SessionRecord> {
    Ok(SessionRecord {
      token_hash: self.token_hash,
      uid:        self.uid,
      created_at: decode_millis(self.created_at)?,
      expires_at: decode_millis(self.expires_at)?,
    })
  }
}
