//! Related-content matching between a job and the blog catalogue.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
  Assistant, Result,
  client::{GenAiClient, Part},
  prompts,
};

/// Upper bound on recommendations returned for one job.
pub const MAX_RELEVANT_BLOGS: usize = 3;

/// A blog post as supplied by the caller; this crate never stores posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
  pub id:         String,
  pub title:      String,
  pub content:    String,
  #[serde(default)]
  pub author:     String,
  #[serde(default)]
  pub slug:       String,
  #[serde(default)]
  pub image_url:  String,
  /// Epoch milliseconds.
  #[serde(default)]
  pub created_at: i64,
}

#[derive(Debug, Deserialize)]
struct RankingOutput {
  blogs: Vec<String>,
}

/// Ask the model which of `blogs` best match the job; returns post ids.
pub async fn rank_blogs(
  client: &GenAiClient,
  job_title: &str,
  job_skills: &[String],
  blogs: &[BlogPost],
) -> Result<Vec<String>> {
  let listing = blogs
    .iter()
    .map(|b| format!("- ID: {}, Title: {}, Content: {}", b.id, b.title, b.content))
    .collect::<Vec<_>>()
    .join("\n");
  let skills = job_skills.join(", ");

  let prompt = prompts::build(prompts::FIND_RELEVANT_BLOGS, &[
    ("job_title", job_title.trim()),
    ("job_skills", skills.as_str()),
    ("blogs", listing.as_str()),
  ]);

  let out: RankingOutput = client.generate_json(&[Part::Text(prompt)]).await?;
  Ok(out.blogs)
}

/// Keep the posts whose id was ranked, in catalogue order, capped at
/// [`MAX_RELEVANT_BLOGS`]. Ids that match nothing are dropped.
pub fn select_blogs(blogs: Vec<BlogPost>, ranked_ids: &[String]) -> Vec<BlogPost> {
  let wanted: HashSet<&str> = ranked_ids.iter().map(String::as_str).collect();
  blogs
    .into_iter()
    .filter(|b| wanted.contains(b.id.as_str()))
    .take(MAX_RELEVANT_BLOGS)
    .collect()
}

/// Recommend up to three posts for a job. An empty catalogue returns
/// immediately without consulting the assistant.
pub async fn find_relevant_blogs<A: Assistant>(
  assistant: &A,
  job_title: &str,
  job_skills: &[String],
  blogs: Vec<BlogPost>,
) -> Result<Vec<BlogPost>> {
  if blogs.is_empty() {
    return Ok(Vec::new());
  }
  let ranked = assistant.rank_blogs(job_title, job_skills, &blogs).await?;
  Ok(select_blogs(blogs, &ranked))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn post(id: &str) -> BlogPost {
    BlogPost {
      id:         id.into(),
      title:      format!("Post {id}"),
      content:    "…".into(),
      author:     "Team".into(),
      slug:       id.into(),
      image_url:  String::new(),
      created_at: 0,
    }
  }

  /// Answers every ranking with fixed ids and counts the calls.
  struct FixedRanking {
    ids:   Vec<String>,
    calls: std::sync::atomic::AtomicUsize,
  }

  impl Assistant for FixedRanking {
    async fn suggest_job_description(&self, _: &str) -> Result<String> {
      unreachable!()
    }

    async fn generate_tags(&self, _: &str) -> Result<Vec<String>> { unreachable!() }

    async fn extract_skills(&self, _: &str) -> Result<Vec<String>> { unreachable!() }

    async fn parse_resume(&self, _: &str) -> Result<crate::ParsedResume> {
      unreachable!()
    }

    async fn enhance_resume(
      &self,
      _: &crate::ResumeDraft,
    ) -> Result<crate::EnhancedResume> {
      unreachable!()
    }

    async fn rank_blogs(
      &self,
      _: &str,
      _: &[String],
      _: &[BlogPost],
    ) -> Result<Vec<String>> {
      self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
      Ok(self.ids.clone())
    }
  }

  fn ranking(ids: &[&str]) -> FixedRanking {
    FixedRanking {
      ids:   ids.iter().map(|s| s.to_string()).collect(),
      calls: Default::default(),
    }
  }

  #[tokio::test]
  async fn empty_catalogue_skips_the_assistant() {
    let assistant = ranking(&["a"]);
    let found = find_relevant_blogs(&assistant, "Chef", &[], vec![]).await.unwrap();
    assert!(found.is_empty());
    assert_eq!(assistant.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn ranked_posts_are_returned() {
    let assistant = ranking(&["c", "a", "missing"]);
    let found = find_relevant_blogs(
      &assistant,
      "Rust Engineer",
      &["Rust".into()],
      vec![post("a"), post("b"), post("c")],
    )
    .await
    .unwrap();
    let ids: Vec<_> = found.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
  }

  #[test]
  fn unknown_ids_are_dropped() {
    let picked = select_blogs(vec![post("a"), post("b")], &["b".into(), "zzz".into()]);
    let ids: Vec<_> = picked.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
  }

  #[test]
  fn at_most_three_are_returned() {
    let blogs = ["a", "b", "c", "d", "e"].map(post).to_vec();
    let ranked: Vec<String> = ["e", "d", "c", "b", "a"].map(String::from).to_vec();
    assert_eq!(select_blogs(blogs, &ranked).len(), MAX_RELEVANT_BLOGS);
  }
}
