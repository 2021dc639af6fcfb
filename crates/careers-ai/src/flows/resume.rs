//! Resume helpers for candidates: parsing an uploaded file and suggesting
//! improvements.

use serde::{Deserialize, Serialize};

use crate::{
  AiError, Result,
  client::{GenAiClient, InlineData, Part},
  prompts,
};

// ─── Parsing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
  pub title:       String,
  pub company:     String,
  #[serde(default)]
  pub start_date:  String,
  #[serde(default)]
  pub end_date:    String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
  pub degree:     String,
  pub school:     String,
  #[serde(default)]
  pub start_date: String,
  #[serde(default)]
  pub end_date:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub title:       String,
  #[serde(default)]
  pub description: String,
}

/// Structured content extracted from a resume file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
  pub full_name:  String,
  pub email:      String,
  #[serde(default)]
  pub phone:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub linkedin:   Option<String>,
  #[serde(default)]
  pub summary:    String,
  #[serde(default)]
  pub experience: Vec<Experience>,
  #[serde(default)]
  pub education:  Vec<Education>,
  #[serde(default)]
  pub projects:   Vec<Project>,
  /// Comma-separated.
  #[serde(default)]
  pub skills:     String,
}

/// Split a `data:<mime>;base64,<payload>` URI into an inline-data part.
pub fn parse_data_uri(uri: &str) -> Result<InlineData> {
  let invalid = || AiError::Input("resume must be a base64 data URI".to_owned());

  let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
  let (meta, data) = rest.split_once(',').ok_or_else(invalid)?;
  let mime_type = meta.strip_suffix(";base64").ok_or_else(invalid)?;

  if mime_type.is_empty() || !mime_type.contains('/') || data.is_empty() {
    return Err(invalid());
  }

  Ok(InlineData {
    mime_type: mime_type.to_owned(),
    data:      data.to_owned(),
  })
}

pub async fn parse_resume(client: &GenAiClient, resume_data_uri: &str) -> Result<ParsedResume> {
  let file = parse_data_uri(resume_data_uri)?;
  let parts = [
    Part::Text(prompts::build(prompts::PARSE_RESUME, &[])),
    Part::InlineData(file),
  ];
  client.generate_json(&parts).await
}

// ─── Enhancement ─────────────────────────────────────────────────────────────

/// A candidate's current resume sections, as submitted for review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDraft {
  pub summary:    String,
  pub experience: Vec<Experience>,
  /// Comma-separated.
  pub skills:     String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedExperience {
  pub title:                String,
  pub company:              String,
  pub enhanced_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedResume {
  pub enhanced_summary:    String,
  pub enhanced_experience: Vec<EnhancedExperience>,
  pub suggested_skills:    Vec<String>,
  pub feedback:            String,
  /// Overall quality score in `0..=100`.
  pub score:               u8,
}

#[derive(Debug, Deserialize)]
struct EnhancedOutput {
  enhanced_summary:    String,
  #[serde(default)]
  enhanced_experience: Vec<EnhancedExperience>,
  #[serde(default)]
  suggested_skills:    Vec<String>,
  #[serde(default)]
  feedback:            String,
  score:               f64,
}

impl EnhancedOutput {
  fn check(self) -> Result<EnhancedResume> {
    if !self.score.is_finite() || !(0.0..=100.0).contains(&self.score) {
      return Err(AiError::Invalid(format!("score {} outside 0..=100", self.score)));
    }
    Ok(EnhancedResume {
      enhanced_summary:    self.enhanced_summary,
      enhanced_experience: self.enhanced_experience,
      suggested_skills:    super::job::tidy(self.suggested_skills),
      feedback:            self.feedback,
      score:               self.score.round() as u8,
    })
  }
}

fn format_experience(experience: &[Experience]) -> String {
  if experience.is_empty() {
    return "  (none listed)".to_owned();
  }
  experience
    .iter()
    .map(|e| format!("  - {} at {}\n    Description: {}", e.title, e.company, e.description))
    .collect::<Vec<_>>()
    .join("\n")
}

pub async fn enhance_resume(client: &GenAiClient, draft: &ResumeDraft) -> Result<EnhancedResume> {
  if draft.summary.trim().is_empty() && draft.experience.is_empty() {
    return Err(AiError::Input("resume has no summary or experience".to_owned()));
  }

  let experience = format_experience(&draft.experience);
  let prompt = prompts::build(prompts::ENHANCE_RESUME, &[
    ("summary", draft.summary.trim()),
    ("experience", experience.as_str()),
    ("skills", draft.skills.trim()),
  ]);

  let out: EnhancedOutput = client.generate_json(&[Part::Text(prompt)]).await?;
  out.check()
}
