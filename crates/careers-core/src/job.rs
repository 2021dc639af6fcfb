//! Job postings.
//!
//! A job is created by an admin, edited only through a full re-validation of
//! its merged fields, and hard-deleted. Expiry is never stored: a posting is
//! "fresh" while its `created_at` lies inside the freshness window, computed
//! against the current time on every read.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
  Error, Result,
  validate::{FieldErrors, normalize_list, parse_http_url},
};

// ─── Freshness window ────────────────────────────────────────────────────────

/// Postings older than this many days drop out of default listings.
pub const FRESHNESS_WINDOW_DAYS: i64 = 7;

/// The oldest `created_at` that still counts as fresh at `now`.
pub fn freshness_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
  now - TimeDelta::days(FRESHNESS_WINDOW_DAYS)
}

// ─── Application channel ─────────────────────────────────────────────────────

/// Discriminant of [`Application`]; also the value of the
/// `application_type` column.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApplicationType {
  /// Candidates apply on an external site.
  Link,
  /// Candidates apply through the built-in application form.
  Form,
}

/// How candidates apply. The link only exists for [`ApplicationType::Link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "application_type", rename_all = "lowercase")]
pub enum Application {
  Link { apply_link: Url },
  Form,
}

impl Application {
  pub fn kind(&self) -> ApplicationType {
    match self {
      Self::Link { .. } => ApplicationType::Link,
      Self::Form => ApplicationType::Form,
    }
  }

  pub fn apply_link(&self) -> Option<&Url> {
    match self {
      Self::Link { apply_link } => Some(apply_link),
      Self::Form => None,
    }
  }

  /// Rebuild from the stored discriminant and optional link.
  pub fn from_parts(kind: &str, apply_link: Option<&str>) -> Result<Self> {
    let kind: ApplicationType = kind
      .parse()
      .map_err(|_| Error::UnknownApplicationType(kind.to_owned()))?;
    match kind {
      ApplicationType::Form => Ok(Self::Form),
      ApplicationType::Link => apply_link
        .and_then(parse_http_url)
        .map(|apply_link| Self::Link { apply_link })
        .ok_or_else(|| {
          let mut errors = FieldErrors::new();
          errors.add("apply_link", "stored apply link is not a valid URL");
          Error::Validation(errors)
        }),
    }
  }
}

// ─── Job ─────────────────────────────────────────────────────────────────────

/// The admin-editable body of a posting, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContent {
  pub title:            String,
  pub company:          String,
  pub location:         String,
  pub description:      String,
  pub responsibilities: Vec<String>,
  pub must_have_skills: Vec<String>,
  pub industry_type:    String,
  pub department:       String,
  pub employment_type:  String,
  pub role_category:    String,
  pub education:        String,
  /// Admin-curated labels; insertion order is display order.
  pub tags:             Vec<String>,
  #[serde(flatten)]
  pub application:      Application,
}

/// A persisted job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
  pub id:         Uuid,
  #[serde(flatten)]
  pub content:    JobContent,
  /// Derived from the description by the AI collaborator.
  pub skills:     Vec<String>,
  /// Server-assigned; never changes after creation.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
  /// Email of the admin who created the posting; never changes.
  pub created_by: String,
}

impl Job {
  /// `true` once the posting has left the freshness window at `now`.
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.created_at < freshness_cutoff(now)
  }
}

/// Input to [`crate::store::CareersStore::insert_job`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewJob {
  pub content:    JobContent,
  pub skills:     Vec<String>,
  pub created_by: String,
}

// ─── Drafts and patches ──────────────────────────────────────────────────────

/// Unvalidated job form input. Missing fields deserialize as empty so they
/// surface as field errors rather than as a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
  pub title:            String,
  pub company:          String,
  pub location:         String,
  pub description:      String,
  pub responsibilities: Vec<String>,
  pub must_have_skills: Vec<String>,
  pub industry_type:    String,
  pub department:       String,
  pub employment_type:  String,
  pub role_category:    String,
  pub education:        String,
  pub tags:             Vec<String>,
  pub application_type: Option<ApplicationType>,
  pub apply_link:       Option<String>,
}

impl JobDraft {
  pub fn validate(self) -> Result<JobContent> {
    let mut errors = FieldErrors::new();

    errors.min_chars("title", &self.title, 2, "Title must be at least 2 characters.");
    errors.min_chars(
      "company",
      &self.company,
      2,
      "Company name must be at least 2 characters.",
    );
    errors.min_chars(
      "location",
      &self.location,
      2,
      "Location must be at least 2 characters.",
    );
    errors.min_chars(
      "description",
      &self.description,
      10,
      "Description must be at least 10 characters.",
    );
    errors.min_chars("industry_type", &self.industry_type, 1, "Industry is required.");
    errors.min_chars("department", &self.department, 1, "Department is required.");
    errors.min_chars(
      "employment_type",
      &self.employment_type,
      1,
      "Employment type is required.",
    );
    errors.min_chars(
      "role_category",
      &self.role_category,
      1,
      "Role category is required.",
    );
    errors.min_chars("education", &self.education, 1, "Education is required.");

    let responsibilities = normalize_list(self.responsibilities);
    let must_have_skills = normalize_list(self.must_have_skills);
    let tags = normalize_list(self.tags);
    errors.non_empty_list(
      "responsibilities",
      &responsibilities,
      "Please list at least one responsibility.",
    );
    errors.non_empty_list(
      "must_have_skills",
      &must_have_skills,
      "Please list at least one skill.",
    );
    errors.non_empty_list("tags", &tags, "At least one tag is required.");

    let application = match self.application_type {
      None => {
        errors.add("application_type", "Application type is required.");
        None
      }
      Some(ApplicationType::Form) => Some(Application::Form),
      Some(ApplicationType::Link) => {
        match self.apply_link.as_deref().and_then(parse_http_url) {
          Some(apply_link) => Some(Application::Link { apply_link }),
          None => {
            errors.add(
              "apply_link",
              "A valid URL is required for external link applications.",
            );
            None
          }
        }
      }
    };

    let application = match application {
      Some(application) if errors.is_empty() => application,
      _ => return Err(Error::Validation(errors)),
    };

    Ok(JobContent {
      title: self.title.trim().to_owned(),
      company: self.company.trim().to_owned(),
      location: self.location.trim().to_owned(),
      description: self.description.trim().to_owned(),
      responsibilities,
      must_have_skills,
      industry_type: self.industry_type.trim().to_owned(),
      department: self.department.trim().to_owned(),
      employment_type: self.employment_type.trim().to_owned(),
      role_category: self.role_category.trim().to_owned(),
      education: self.education.trim().to_owned(),
      tags,
      application,
    })
  }
}

impl From<&JobContent> for JobDraft {
  fn from(c: &JobContent) -> Self {
    JobDraft {
      title:            c.title.clone(),
      company:          c.company.clone(),
      location:         c.location.clone(),
      description:      c.description.clone(),
      responsibilities: c.responsibilities.clone(),
      must_have_skills: c.must_have_skills.clone(),
      industry_type:    c.industry_type.clone(),
      department:       c.department.clone(),
      employment_type:  c.employment_type.clone(),
      role_category:    c.role_category.clone(),
      education:        c.education.clone(),
      tags:             c.tags.clone(),
      application_type: Some(c.application.kind()),
      apply_link:       c.application.apply_link().map(Url::to_string),
    }
  }
}

/// A partial edit. Present fields replace the stored ones; `created_at` and
/// `created_by` are not editable and therefore have no field here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPatch {
  pub title:            Option<String>,
  pub company:          Option<String>,
  pub location:         Option<String>,
  pub description:      Option<String>,
  pub responsibilities: Option<Vec<String>>,
  pub must_have_skills: Option<Vec<String>>,
  pub industry_type:    Option<String>,
  pub department:       Option<String>,
  pub employment_type:  Option<String>,
  pub role_category:    Option<String>,
  pub education:        Option<String>,
  pub tags:             Option<Vec<String>>,
  pub application_type: Option<ApplicationType>,
  pub apply_link:       Option<String>,
}

impl JobPatch {
  /// Merge this patch over `base`, producing a draft that still has to pass
  /// [`JobDraft::validate`].
  pub fn apply_to(self, base: &JobContent) -> JobDraft {
    let mut draft = JobDraft::from(base);

    macro_rules! merge {
      ($($field:ident),* $(,)?) => {
        $( if let Some(v) = self.$field { draft.$field = v; } )*
      };
    }
    merge!(
      title,
      company,
      location,
      description,
      responsibilities,
      must_have_skills,
      industry_type,
      department,
      employment_type,
      role_category,
      education,
      tags,
    );

    if let Some(kind) = self.application_type {
      draft.application_type = Some(kind);
    }
    if self.apply_link.is_some() {
      draft.apply_link = self.apply_link;
    }
    draft
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> JobDraft {
    JobDraft {
      title:            "Senior Frontend Developer".into(),
      company:          "Analyzed".into(),
      location:         "Remote".into(),
      description:      "Build the client side of our web applications.".into(),
      responsibilities: vec!["Develop new user-facing features".into()],
      must_have_skills: vec!["React".into(), "TypeScript".into()],
      industry_type:    "Technology".into(),
      department:       "Engineering".into(),
      employment_type:  "Full Time, Permanent".into(),
      role_category:    "Software Development".into(),
      education:        "UG: Any Graduate".into(),
      tags:             vec!["React".into(), "Next.js".into()],
      application_type: Some(ApplicationType::Link),
      apply_link:       Some("https://jobs.example.com/frontend".into()),
    }
  }

  fn field_errors(result: Result<JobContent>) -> FieldErrors {
    match result {
      Err(Error::Validation(errors)) => errors,
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn valid_draft_passes() {
    let content = draft().validate().unwrap();
    assert_eq!(content.application.kind(), ApplicationType::Link);
    assert_eq!(
      content.application.apply_link().map(Url::as_str),
      Some("https://jobs.example.com/frontend")
    );
  }

  #[test]
  fn short_fields_are_reported() {
    let mut d = draft();
    d.title = "A".into();
    d.description = "short".into();
    d.tags.clear();

    let errors = field_errors(d.validate());
    assert!(errors.get("title").is_some());
    assert!(errors.get("description").is_some());
    assert!(errors.get("tags").is_some());
    assert!(errors.get("company").is_none());
  }

  #[test]
  fn link_application_requires_valid_url() {
    let mut d = draft();
    d.apply_link = Some("not a url".into());
    let errors = field_errors(d.validate());
    assert!(errors.get("apply_link").is_some());

    let mut d = draft();
    d.apply_link = None;
    assert!(field_errors(d.validate()).get("apply_link").is_some());
  }

  #[test]
  fn form_application_ignores_link() {
    let mut d = draft();
    d.application_type = Some(ApplicationType::Form);
    d.apply_link = Some("garbage".into());
    let content = d.validate().unwrap();
    assert_eq!(content.application, Application::Form);
  }

  #[test]
  fn patch_merges_present_fields_only() {
    let base = draft().validate().unwrap();
    let patch = JobPatch {
      title: Some("Staff Frontend Developer".into()),
      application_type: Some(ApplicationType::Form),
      ..Default::default()
    };
    let merged = patch.apply_to(&base).validate().unwrap();
    assert_eq!(merged.title, "Staff Frontend Developer");
    assert_eq!(merged.company, base.company);
    assert_eq!(merged.tags, base.tags);
    assert_eq!(merged.application, Application::Form);
  }

  #[test]
  fn expiry_is_relative_to_now() {
    let now = Utc::now();
    let mut job = Job {
      id:         Uuid::new_v4(),
      content:    draft().validate().unwrap(),
      skills:     vec![],
      created_at: now - TimeDelta::days(3),
      created_by: "admin@example.com".into(),
    };
    assert!(!job.is_expired_at(now));
    job.created_at = now - TimeDelta::days(10);
    assert!(job.is_expired_at(now));
  }

  #[test]
  fn job_json_uses_millis_and_flat_application() {
    let job = Job {
      id:         Uuid::nil(),
      content:    draft().validate().unwrap(),
      skills:     vec!["React".into()],
      created_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
      created_by: "admin@example.com".into(),
    };
    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["created_at"], 1_700_000_000_123_i64);
    assert_eq!(json["application_type"], "link");
    assert_eq!(json["apply_link"], "https://jobs.example.com/frontend");
    assert_eq!(json["title"], "Senior Frontend Developer");
  }
}
