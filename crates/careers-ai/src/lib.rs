//! AI helpers for job authoring and candidate tooling.
//!
//! [`Assistant`] is the seam the rest of the system depends on;
//! [`GenAiAssistant`] implements it against a hosted generation API.

pub mod client;
pub mod error;
pub mod flows;
pub mod prompts;

use std::future::Future;

pub use client::{GenAiClient, GenAiConfig};
pub use error::{AiError, Result};
pub use flows::{
  blogs::{BlogPost, find_relevant_blogs},
  resume::{EnhancedResume, ParsedResume, ResumeDraft},
};

/// The AI capabilities used by the careers backend.
pub trait Assistant: Send + Sync {
  /// Draft a description for a job title.
  fn suggest_job_description<'a>(
    &'a self,
    job_title: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a;

  /// Propose search tags for a job description.
  fn generate_tags<'a>(
    &'a self,
    job_description: &'a str,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + 'a;

  /// Derive the skills a job description asks for.
  fn extract_skills<'a>(
    &'a self,
    job_description: &'a str,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + 'a;

  /// Extract structured content from a `data:` URI holding a resume file.
  fn parse_resume<'a>(
    &'a self,
    resume_data_uri: &'a str,
  ) -> impl Future<Output = Result<ParsedResume>> + Send + 'a;

  fn enhance_resume<'a>(
    &'a self,
    draft: &'a ResumeDraft,
  ) -> impl Future<Output = Result<EnhancedResume>> + Send + 'a;

  /// Ids of the posts most relevant to a job, best first. Callers should go
  /// through [`find_relevant_blogs`], which filters and caps the result.
  fn rank_blogs<'a>(
    &'a self,
    job_title: &'a str,
    job_skills: &'a [String],
    blogs: &'a [BlogPost],
  ) -> impl Future<Output = Result<Vec<String>>> + Send + 'a;
}

/// [`Assistant`] backed by a [`GenAiClient`].
#[derive(Clone)]
pub struct GenAiAssistant {
  client: GenAiClient,
}

impl GenAiAssistant {
  pub fn new(config: GenAiConfig) -> Result<Self> {
    Ok(Self { client: GenAiClient::new(config)? })
  }
}

impl Assistant for GenAiAssistant {
  async fn suggest_job_description(&self, job_title: &str) -> Result<String> {
    flows::job::suggest_job_description(&self.client, job_title).await
  }

  async fn generate_tags(&self, job_description: &str) -> Result<Vec<String>> {
    flows::job::generate_tags(&self.client, job_description).await
  }

  async fn extract_skills(&self, job_description: &str) -> Result<Vec<String>> {
    flows::job::extract_skills(&self.client, job_description).await
  }

  async fn parse_resume(&self, resume_data_uri: &str) -> Result<ParsedResume> {
    flows::resume::parse_resume(&self.client, resume_data_uri).await
  }

  async fn enhance_resume(&self, draft: &ResumeDraft) -> Result<EnhancedResume> {
    flows::resume::enhance_resume(&self.client, draft).await
  }

  async fn rank_blogs(
    &self,
    job_title: &str,
    job_skills: &[String],
    blogs: &[BlogPost],
  ) -> Result<Vec<String>> {
    flows::blogs::rank_blogs(&self.client, job_title, job_skills, blogs).await
  }
}
