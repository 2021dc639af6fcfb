//! Handlers for applications.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use careers_ai::Assistant;
use careers_core::{
  applicant::{ApplicationSubmission, EnrichedApplicant},
  store::CareersStore,
};
use uuid::Uuid;

use crate::{
  ApiError, AppState,
  extract::{AdminSession, ApiJson, ApiPath},
};

/// `POST /jobs/{id}/applications`
pub async fn submit<S, A>(
  State(state): State<AppState<S, A>>,
  ApiPath(job_id): ApiPath<Uuid>,
  ApiJson(submission): ApiJson<ApplicationSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let applicant = state.applicants().add_applicant(job_id, submission).await?;
  Ok((StatusCode::CREATED, Json(applicant)))
}

/// `GET /admin/applicants`, each row carrying its job's title.
pub async fn list<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
) -> Result<Json<Vec<EnrichedApplicant>>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Ok(Json(state.applicants().list_enriched_applicants(None).await?))
}
