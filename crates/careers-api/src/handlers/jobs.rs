//! Handlers for job postings.
//!
//! | Method   | Path               | Notes |
//! |----------|--------------------|-------|
//! | `GET`    | `/jobs`            | Active postings only |
//! | `GET`    | `/jobs/{id}`       | 404 if not found |
//! | `GET`    | `/admin/jobs`      | Expired postings included |
//! | `POST`   | `/admin/jobs`      | Body: a job draft; 201 |
//! | `PUT`    | `/admin/jobs/{id}` | Body: a partial job; 404 if not found |
//! | `DELETE` | `/admin/jobs/{id}` | 204, or 404 if not found |
//! | `GET`    | `/revision`        | Bumped on every job write |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use careers_ai::Assistant;
use careers_core::{
  job::{Job, JobDraft, JobPatch},
  store::CareersStore,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
  ApiError, AppState,
  extract::{AdminSession, ApiJson, ApiPath},
};

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("job {id} not found")) }

// ─── Public ───────────────────────────────────────────────────────────────────

/// `GET /jobs`
pub async fn list_public<S, A>(State(state): State<AppState<S, A>>) -> Json<Vec<Job>>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Json(state.jobs().list_jobs(false).await)
}

/// `GET /jobs/{id}`
pub async fn get_one<S, A>(
  State(state): State<AppState<S, A>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Job>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let job = state.jobs().get_job(id).await?.ok_or_else(|| not_found(id))?;
  Ok(Json(job))
}

/// `GET /revision`
pub async fn revision<S, A>(State(state): State<AppState<S, A>>) -> Json<Value>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Json(json!({ "revision": state.revision.current() }))
}

// ─── Admin ────────────────────────────────────────────────────────────────────

/// `GET /admin/jobs`
pub async fn list_all<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
) -> Result<Json<Vec<Job>>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  Ok(Json(state.jobs().try_list_jobs(true).await?))
}

/// `POST /admin/jobs`
pub async fn create<S, A>(
  State(state): State<AppState<S, A>>,
  admin: AdminSession,
  ApiJson(draft): ApiJson<JobDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let job = state.jobs().add_job(draft, &admin.user.email).await?;
  Ok((StatusCode::CREATED, Json(job)))
}

/// `PUT /admin/jobs/{id}`
pub async fn update<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(patch): ApiJson<JobPatch>,
) -> Result<Json<Job>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let job = state.jobs().update_job(id, patch).await?.ok_or_else(|| not_found(id))?;
  Ok(Json(job))
}

/// `DELETE /admin/jobs/{id}`
pub async fn remove<S, A>(
  State(state): State<AppState<S, A>>,
  _admin: AdminSession,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  if state.jobs().delete_job(id).await? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}
