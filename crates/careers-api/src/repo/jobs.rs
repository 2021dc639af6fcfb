//! Job repository: listing with the freshness window, AI-assisted writes.

use careers_ai::Assistant;
use careers_core::{
  job::{Job, JobDraft, JobPatch, NewJob, freshness_cutoff},
  store::CareersStore,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiError, revision::Revision, seed};

pub struct JobRepository<'a, S, A> {
  store:     &'a S,
  assistant: &'a A,
  revision:  &'a Revision,
}

impl<'a, S, A> JobRepository<'a, S, A>
where
  S: CareersStore,
  A: Assistant,
{
  pub fn new(store: &'a S, assistant: &'a A, revision: &'a Revision) -> Self {
    Self { store, assistant, revision }
  }

  /// Jobs newest first. A store failure is logged and yields an empty list so
  /// public pages still render.
  pub async fn list_jobs(&self, include_expired: bool) -> Vec<Job> {
    match self.try_list_jobs(include_expired).await {
      Ok(jobs) => jobs,
      Err(e) => {
        warn!(error = %e, include_expired, "job listing failed; serving empty list");
        Vec::new()
      }
    }
  }

  /// As [`Self::list_jobs`], but a store failure is returned to the caller.
  pub async fn try_list_jobs(&self, include_expired: bool) -> Result<Vec<Job>, ApiError> {
    let since = (!include_expired).then(|| freshness_cutoff(Utc::now()));
    self.store.list_jobs(since).await.map_err(ApiError::backend)
  }

  pub async fn get_job(&self, id: Uuid) -> Result<Option<Job>, ApiError> {
    self.store.get_job(id).await.map_err(ApiError::backend)
  }

  /// Validate, derive skills, persist. An AI failure aborts before any write.
  pub async fn add_job(&self, draft: JobDraft, created_by: &str) -> Result<Job, ApiError> {
    let content = draft.validate()?;
    let skills = self.assistant.extract_skills(&content.description).await?;

    let job = self
      .store
      .insert_job(NewJob {
        content,
        skills,
        created_by: created_by.to_owned(),
      })
      .await
      .map_err(ApiError::backend)?;

    self.revision.bump();
    info!(job_id = %job.id, created_by, "job created");
    Ok(job)
  }

  /// Merge `patch` over the stored job and re-validate the result. Skills are
  /// re-derived only when the description changed. `Ok(None)` if no job has
  /// this id.
  pub async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<Option<Job>, ApiError> {
    let Some(existing) = self.get_job(id).await? else {
      return Ok(None);
    };

    let content = patch.apply_to(&existing.content).validate()?;
    let skills = if content.description == existing.content.description {
      existing.skills
    } else {
      self.assistant.extract_skills(&content.description).await?
    };

    let job = Job {
      id,
      content,
      skills,
      created_at: existing.created_at,
      created_by: existing.created_by,
    };

    // The job may have been deleted while skills were being derived.
    if !self.store.update_job(job.clone()).await.map_err(ApiError::backend)? {
      return Ok(None);
    }

    self.revision.bump();
    info!(job_id = %id, "job updated");
    Ok(Some(job))
  }

  /// Hard delete. `false` when nothing had this id.
  pub async fn delete_job(&self, id: Uuid) -> Result<bool, ApiError> {
    let deleted = self.store.delete_job(id).await.map_err(ApiError::backend)?;
    if deleted {
      self.revision.bump();
      info!(job_id = %id, "job deleted");
    }
    Ok(deleted)
  }

  /// Insert the sample postings when, and only when, there are no jobs yet.
  /// Returns the number of postings written.
  pub async fn seed_initial_jobs(&self) -> Result<usize, ApiError> {
    if self.store.count_jobs().await.map_err(ApiError::backend)? > 0 {
      info!("jobs table is not empty; skipping seed");
      return Ok(0);
    }

    let samples = seed::sample_jobs()?;
    let count = samples.len();
    for job in samples {
      self.store.insert_job(job).await.map_err(ApiError::backend)?;
    }

    self.revision.bump();
    info!(count, "seeded sample jobs");
    Ok(count)
  }
}
