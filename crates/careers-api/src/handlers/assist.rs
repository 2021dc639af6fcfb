//! Handlers for the AI helpers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/assist/job-description` | Body: `{"job_title":..}` |
//! | `POST` | `/admin/assist/tags`            | Body: `{"job_description":..}` |
//! | `POST` | `/resume/parse`                 | Body: `{"resume_data_uri":"data:..;base64,.."}` |
//! | `POST` | `/resume/enhance`               | Body: a resume draft |
//! | `POST` | `/jobs/{id}/related-blogs`      | Body: `{"blogs":[..]}`; 404 if the job is missing |

use axum::{Json, extract::State};
use careers_ai::{
  Assistant, BlogPost, EnhancedResume, ParsedResume, ResumeDraft, find_relevant_blogs,
};
use careers_core::store::CareersStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  ApiError, AppState,
  extract::{AdminSession, ApiJson, ApiPath},
};

fn require(value: &str, what: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(ApiError::BadRequest(format!("{what} is required.")));
  }
  Ok(())
}

// ─── Job authoring ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobTitleBody {
  #[serde(default)]
  pub job_title: String,
}

#[derive(Debug, Serialize)]
pub struct JobDescriptionReply {
  pub job_description: String,
}

/// `POST /admin/assist/job-description`
pub async fn job_description<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
  ApiJson(body): ApiJson<JobTitleBody>,
) -> Result<Json<JobDescriptionReply>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  require(&body.job_title, "A job title")?;
  let job_description = state.assistant.suggest_job_description(&body.job_title).await?;
  Ok(Json(JobDescriptionReply { job_description }))
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionBody {
  #[serde(default)]
  pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct TagsReply {
  pub tags: Vec<String>,
}

/// `POST /admin/assist/tags`
pub async fn tags<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
  ApiJson(body): ApiJson<JobDescriptionBody>,
) -> Result<Json<TagsReply>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  require(&body.job_description, "A job description")?;
  let tags = state.assistant.generate_tags(&body.job_description).await?;
  Ok(Json(TagsReply { tags }))
}

// ─── Candidates ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeFileBody {
  #[serde(default)]
  pub resume_data_uri: String,
}

/// `POST /resume/parse`
pub async fn parse_resume<S, A>(
  State(state): State<AppState<S, A>>,
  ApiJson(body): ApiJson<ResumeFileBody>,
) -> Result<Json<ParsedResume>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  require(&body.resume_data_uri, "A resume file")?;
  Ok(Json(state.assistant.parse_resume(&body.resume_data_uri).await?))
}

/// `POST /resume/enhance`
pub async fn enhance_resume<S, A>(
  State(state): State<AppState<S, A>>,
  ApiJson(draft): ApiJson<ResumeDraft>,
) -> Result<Json<EnhancedResume>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Ok(Json(state.assistant.enhance_resume(&draft).await?))
}

#[derive(Debug, Deserialize)]
pub struct BlogCatalogueBody {
  #[serde(default)]
  pub blogs: Vec<BlogPost>,
}

#[derive(Debug, Serialize)]
pub struct RelatedBlogsReply {
  pub blogs: Vec<BlogPost>,
}

/// `POST /jobs/{id}/related-blogs`
pub async fn related_blogs<S, A>(
  State(state): State<AppState<S, A>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<BlogCatalogueBody>,
) -> Result<Json<RelatedBlogsReply>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let job = state
    .jobs()
    .get_job(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))?;

  let blogs =
    find_relevant_blogs(&*state.assistant, &job.content.title, &job.skills, body.blogs).await?;
  Ok(Json(RelatedBlogsReply { blogs }))
}
