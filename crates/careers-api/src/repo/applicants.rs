//! Applicant repository: public submissions and the admin's enriched view.

use careers_core::{
  applicant::{Applicant, ApplicationSubmission, EnrichedApplicant, enrich},
  job::Job,
  store::CareersStore,
};
use tracing::info;
use uuid::Uuid;

use crate::ApiError;

pub struct ApplicantRepository<'a, S> {
  store: &'a S,
}

impl<'a, S: CareersStore> ApplicantRepository<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Validate and store an application for `job_id`. The job has to exist at
  /// submission time; the applicant row survives its later deletion.
  pub async fn add_applicant(
    &self,
    job_id: Uuid,
    submission: ApplicationSubmission,
  ) -> Result<Applicant, ApiError> {
    let input = submission.validate(job_id)?;

    if self.store.get_job(job_id).await.map_err(ApiError::backend)?.is_none() {
      return Err(ApiError::NotFound(format!("job {job_id} not found")));
    }

    let applicant = self
      .store
      .insert_applicant(input)
      .await
      .map_err(ApiError::backend)?;
    info!(applicant_id = %applicant.id, %job_id, "application received");
    Ok(applicant)
  }

  /// Newest first.
  pub async fn list_applicants(&self) -> Result<Vec<Applicant>, ApiError> {
    self.store.list_applicants().await.map_err(ApiError::backend)
  }

  /// Applicants joined with their job titles. Pass the job list when the
  /// caller already has it; otherwise every job, expired ones included, is
  /// fetched alongside the applicants.
  pub async fn list_enriched_applicants(
    &self,
    jobs: Option<&[Job]>,
  ) -> Result<Vec<EnrichedApplicant>, ApiError> {
    match jobs {
      Some(jobs) => Ok(enrich(self.list_applicants().await?, jobs)),
      None => {
        let (applicants, jobs) = tokio::try_join!(self.list_applicants(), async {
          self.store.list_jobs(None).await.map_err(ApiError::backend)
        })?;
        Ok(enrich(applicants, &jobs))
      }
    }
  }
}
