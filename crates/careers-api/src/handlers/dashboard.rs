//! `GET /admin/dashboard[?sort=title|created_at&order=asc|desc&page=N&page_size=N]`

use axum::{Json, extract::State};
use careers_ai::Assistant;
use careers_core::store::CareersStore;

use crate::{
  ApiError, AppState,
  dashboard::{DashboardView, JobTableQuery},
  extract::{AdminSession, ApiQuery},
};

pub async fn load<S, A>(
  State(state): State<AppState<S, A>>,
  admin: AdminSession,
  ApiQuery(query): ApiQuery<JobTableQuery>,
) -> Result<Json<DashboardView>, ApiError>
where
  S: CareersStore + 'static,
  A: Assistant + 'static,
{
  let view = crate::dashboard::load(&state, &admin.user, query).await?;
  Ok(Json(view))
}
