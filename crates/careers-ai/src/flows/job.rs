//! Job authoring flows: description drafting, tagging and skill extraction.

use serde::Deserialize;

use crate::{
  AiError, Result,
  client::{GenAiClient, Part},
  prompts,
};

#[derive(Debug, Deserialize)]
struct DescriptionOutput {
  job_description: String,
}

#[derive(Debug, Deserialize)]
struct TagsOutput {
  tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SkillsOutput {
  skills: Vec<String>,
}

fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
  let value = value.trim();
  if value.is_empty() {
    return Err(AiError::Input(format!("{field} must not be empty")));
  }
  Ok(value)
}

/// Trim, drop blanks, and drop case-insensitive duplicates, keeping the
/// first spelling.
pub(crate) fn tidy(values: Vec<String>) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  values
    .into_iter()
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
    .collect()
}

pub async fn suggest_job_description(client: &GenAiClient, job_title: &str) -> Result<String> {
  let job_title = require("job_title", job_title)?;
  let prompt = prompts::build(prompts::SUGGEST_JOB_DESCRIPTION, &[("job_title", job_title)]);

  let out: DescriptionOutput = client.generate_json(&[Part::Text(prompt)]).await?;
  let description = out.job_description.trim();
  if description.is_empty() {
    return Err(AiError::EmptyContent);
  }
  Ok(description.to_owned())
}

pub async fn generate_tags(client: &GenAiClient, job_description: &str) -> Result<Vec<String>> {
  let job_description = require("job_description", job_description)?;
  let prompt =
    prompts::build(prompts::GENERATE_TAGS, &[("job_description", job_description)]);

  let out: TagsOutput = client.generate_json(&[Part::Text(prompt)]).await?;
  Ok(tidy(out.tags.into_iter().map(|t| t.to_lowercase()).collect()))
}

pub async fn extract_skills(
  client: &GenAiClient,
  job_description: &str,
) -> Result<Vec<String>> {
  let job_description = require("job_description", job_description)?;
  let prompt =
    prompts::build(prompts::EXTRACT_SKILLS, &[("job_description", job_description)]);

  let out: SkillsOutput = client.generate_json(&[Part::Text(prompt)]).await?;
  Ok(tidy(out.skills))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tidy_dedupes_case_insensitively() {
    let out = tidy(vec![
      " Rust ".into(),
      "rust".into(),
      "".into(),
      "SQL".into(),
    ]);
    assert_eq!(out, vec!["Rust", "SQL"]);
  }

  #[test]
  fn blank_input_is_rejected_before_any_call() {
    assert!(matches!(require("job_title", "   "), Err(AiError::Input(_))));
    assert_eq!(require("job_title", " Chef ").unwrap(), "Chef");
  }
}
