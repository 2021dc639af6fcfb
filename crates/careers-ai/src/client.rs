//! Thin client for a Gemini-style `generateContent` endpoint.
//!
//! Every call asks for `application/json` output and deserializes the first
//! candidate's text into the caller's type. There are no retries; a failed
//! call surfaces as an [`AiError`] and the caller decides what to do.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{AiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the generation API.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
  pub api_key:  String,
  pub model:    String,
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for GenAiConfig {
  fn default() -> Self {
    Self {
      api_key:  String::new(),
      model:    DEFAULT_MODEL.to_owned(),
      base_url: DEFAULT_BASE_URL.to_owned(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// One piece of prompt content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
  Text(String),
  InlineData(InlineData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
  pub mime_type: String,
  /// Base64 payload, passed through untouched.
  pub data:      String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
  contents:          [Content<'a>; 1],
  generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  role:  &'static str,
  parts: &'a [Part],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
  error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  message: String,
}

impl GenerateResponse {
  /// Concatenated text of the first candidate.
  fn into_text(self) -> Option<String> {
    let content = self.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GenAiClient {
  client: Client,
  config: GenAiConfig,
}

impl GenAiClient {
  pub fn new(config: GenAiConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  pub fn model(&self) -> &str { &self.config.model }

  fn endpoint(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Send `parts` as a single user turn and parse the reply as `T`.
  pub async fn generate_json<T: DeserializeOwned>(&self, parts: &[Part]) -> Result<T> {
    let body = GenerateRequest {
      contents:          [Content { role: "user", parts }],
      generation_config: GenerationConfig {
        response_mime_type: "application/json",
      },
    };

    let resp = self
      .client
      .post(self.endpoint())
      .header("x-goog-api-key", &self.config.api_key)
      .json(&body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
      return Err(AiError::Api { status: status.as_u16(), message });
    }

    let text = resp
      .json::<GenerateResponse>()
      .await?
      .into_text()
      .ok_or(AiError::EmptyContent)?;

    debug!(model = %self.config.model, bytes = text.len(), "generation succeeded");
    parse_json_output(&text)
  }
}

/// Parse model output, tolerating a markdown code fence around the JSON.
pub fn parse_json_output<T: DeserializeOwned>(text: &str) -> Result<T> {
  Ok(serde_json::from_str(strip_json_fences(text))?)
}

fn strip_json_fences(text: &str) -> &str {
  let text = text.trim();
  let Some(rest) = text
    .strip_prefix("```json")
    .or_else(|| text.strip_prefix("```"))
  else {
    return text;
  };
  let rest = rest.trim_start();
  rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}
