//! Error type for `careers-ai`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("generation API error (status {status}): {message}")]
  Api { status: u16, message: String },

  #[error("model returned no content")]
  EmptyContent,

  #[error("model output did not match the expected shape: {0}")]
  Parse(#[from] serde_json::Error),

  /// The output parsed but violates a constraint, e.g. a score above 100.
  #[error("model output rejected: {0}")]
  Invalid(String),

  #[error("invalid input: {0}")]
  Input(String),
}

pub type Result<T, E = AiError> = std::result::Result<T, E>;
