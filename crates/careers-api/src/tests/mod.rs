//! Service and router tests against an in-memory SQLite store and a scripted
//! assistant.

mod dashboard;
mod flaky;

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use careers_ai::{
  AiError, Assistant, BlogPost, EnhancedResume, ParsedResume, ResumeDraft, Result as AiResult,
};
use careers_core::job::{ApplicationType, JobDraft};
use careers_store_sqlite::SqliteStore;

use self::flaky::FlakyStore;
use crate::{ApiConfig, AppState};

/// Answers skill extraction from a fixed list and can be switched to fail.
#[derive(Default)]
pub(crate) struct ScriptedAssistant {
  pub skills:      Mutex<Vec<String>>,
  pub fail:        Mutex<bool>,
  pub calls:       AtomicUsize,
  pub ranked_blog: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
  pub fn with_skills(skills: &[&str]) -> Self {
    let assistant = Self::default();
    assistant.set_skills(skills);
    assistant
  }

  pub fn set_skills(&self, skills: &[&str]) {
    *self.skills.lock().unwrap() = skills.iter().map(|s| (*s).to_owned()).collect();
  }

  pub fn set_failing(&self, fail: bool) { *self.fail.lock().unwrap() = fail; }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

  fn check(&self) -> AiResult<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if *self.fail.lock().unwrap() {
      return Err(AiError::EmptyContent);
    }
    Ok(())
  }
}

impl Assistant for ScriptedAssistant {
  async fn suggest_job_description(&self, job_title: &str) -> AiResult<String> {
    self.check()?;
    Ok(format!("A great opening for a {job_title}."))
  }

  async fn generate_tags(&self, _job_description: &str) -> AiResult<Vec<String>> {
    self.check()?;
    Ok(vec!["remote".into(), "design".into()])
  }

  async fn extract_skills(&self, _job_description: &str) -> AiResult<Vec<String>> {
    self.check()?;
    Ok(self.skills.lock().unwrap().clone())
  }

  async fn parse_resume(&self, _resume_data_uri: &str) -> AiResult<ParsedResume> {
    self.check()?;
    Err(AiError::Invalid("not scripted".into()))
  }

  async fn enhance_resume(&self, _draft: &ResumeDraft) -> AiResult<EnhancedResume> {
    self.check()?;
    Err(AiError::Invalid("not scripted".into()))
  }

  async fn rank_blogs(
    &self,
    _job_title: &str,
    _job_skills: &[String],
    _blogs: &[BlogPost],
  ) -> AiResult<Vec<String>> {
    self.check()?;
    Ok(self.ranked_blog.lock().unwrap().clone())
  }
}

pub(crate) type TestState = AppState<SqliteStore, ScriptedAssistant>;

pub(crate) async fn state_with(config: ApiConfig) -> TestState {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  AppState::new(
    Arc::new(store),
    Arc::new(ScriptedAssistant::with_skills(&["Figma", "User Research"])),
    config,
  )
}

pub(crate) async fn state() -> TestState { state_with(ApiConfig::default()).await }

pub(crate) type FlakyState = AppState<FlakyStore, ScriptedAssistant>;

/// Like [`state_with`], over a store that can be made to fail or hang.
pub(crate) async fn flaky_state(config: ApiConfig) -> FlakyState {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  AppState::new(
    Arc::new(FlakyStore::new(store)),
    Arc::new(ScriptedAssistant::with_skills(&["Figma"])),
    config,
  )
}

pub(crate) fn draft(title: &str) -> JobDraft {
  JobDraft {
    title:            title.into(),
    company:          "Analyzed".into(),
    location:         "Remote".into(),
    description:      "Design delightful product experiences.".into(),
    responsibilities: vec!["Run user interviews".into()],
    must_have_skills: vec!["Figma".into()],
    industry_type:    "Software".into(),
    department:       "Design".into(),
    employment_type:  "Full-time".into(),
    role_category:    "Design".into(),
    education:        "Any graduate".into(),
    tags:             vec!["design".into()],
    application_type: Some(ApplicationType::Form),
    apply_link:       None,
  }
}
