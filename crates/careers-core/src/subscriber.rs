//! Newsletter subscribers: an append-only list of unique emails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, validate::FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
  pub id:            Uuid,
  pub email:         String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub subscribed_at: DateTime<Utc>,
}

/// Validate and canonicalise a subscription email (trimmed, lowercase).
pub fn normalize_email(raw: &str) -> Result<String> {
  let mut errors = FieldErrors::new();
  errors.email("email", raw, "Invalid email address provided.");
  errors.finish(raw.trim().to_lowercase())
}

/// Result of a subscription attempt that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubscribeOutcome {
  Subscribed { subscriber: Subscriber },
  AlreadySubscribed,
}

impl SubscribeOutcome {
  pub fn message(&self) -> &'static str {
    match self {
      Self::Subscribed { .. } => "Successfully subscribed!",
      Self::AlreadySubscribed => "This email is already subscribed.",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_case_and_whitespace() {
    assert_eq!(normalize_email("  Jane@Example.COM ").unwrap(), "jane@example.com");
  }

  #[test]
  fn rejects_malformed_email() {
    assert!(matches!(normalize_email("jane@"), Err(crate::Error::Validation(_))));
  }
}
