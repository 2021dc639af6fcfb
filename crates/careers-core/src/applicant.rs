//! Applicants and their enrichment with job titles.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, job::Job, validate::FieldErrors};

/// Display label for an applicant whose job no longer exists.
pub const UNKNOWN_JOB_TITLE: &str = "Unknown Job (Expired)";

/// A stored job application. Only the resume's filename is kept; the file
/// itself never reaches this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
  pub id:           Uuid,
  /// May point at a job that has since been deleted.
  pub job_id:       Uuid,
  pub name:         String,
  pub email:        String,
  pub resume:       String,
  pub cover_letter: Option<String>,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub applied_at:   DateTime<Utc>,
}

/// Public application form input; the job id comes from the URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationSubmission {
  pub name:         String,
  pub email:        String,
  /// Original filename of the uploaded resume.
  pub resume:       String,
  pub cover_letter: Option<String>,
}

impl ApplicationSubmission {
  pub fn validate(self, job_id: Uuid) -> Result<NewApplicant> {
    let mut errors = FieldErrors::new();
    errors.min_chars("name", &self.name, 1, "Name is required.");
    errors.email("email", &self.email, "Please enter a valid email address.");
    errors.min_chars("resume", &self.resume, 1, "Resume is required.");

    let cover_letter = self
      .cover_letter
      .map(|c| c.trim().to_owned())
      .filter(|c| !c.is_empty());

    errors.finish(NewApplicant {
      job_id,
      name: self.name.trim().to_owned(),
      email: self.email.trim().to_owned(),
      resume: self.resume.trim().to_owned(),
      cover_letter,
    })
  }
}

/// Input to [`crate::store::CareersStore::insert_applicant`].
/// `applied_at` is always set by the store.
#[derive(Debug, Clone)]
pub struct NewApplicant {
  pub job_id:       Uuid,
  pub name:         String,
  pub email:        String,
  pub resume:       String,
  pub cover_letter: Option<String>,
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

/// Outcome of resolving an applicant's `job_id` against the job list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobLink {
  Found { title: String },
  /// The referenced job was deleted.
  Missing,
}

impl JobLink {
  pub fn title(&self) -> &str {
    match self {
      Self::Found { title } => title,
      Self::Missing => UNKNOWN_JOB_TITLE,
    }
  }

  pub fn is_missing(&self) -> bool { matches!(self, Self::Missing) }
}

/// An applicant joined with the title of the job it applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedApplicant {
  #[serde(flatten)]
  pub applicant: Applicant,
  pub job:       JobLink,
  pub job_title: String,
}

/// Join every applicant to its job through an in-memory lookup.
pub fn enrich(applicants: Vec<Applicant>, jobs: &[Job]) -> Vec<EnrichedApplicant> {
  let titles: HashMap<Uuid, &str> = jobs
    .iter()
    .map(|job| (job.id, job.content.title.as_str()))
    .collect();

  applicants
    .into_iter()
    .map(|applicant| {
      let job = match titles.get(&applicant.job_id) {
        Some(title) => JobLink::Found { title: (*title).to_owned() },
        None => JobLink::Missing,
      };
      EnrichedApplicant {
        job_title: job.title().to_owned(),
        applicant,
        job,
      }
    })
    .collect()
}
