//! Field-level input validation shared by every write path.
//!
//! Errors are collected per field rather than failing on the first problem, so
//! a form can show every message next to the offending input at once.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Messages keyed by the name of the field they refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.entry(field).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.0.keys().copied()
  }

  /// `Ok(value)` when no errors were recorded, otherwise
  /// [`Error::Validation`].
  pub fn finish<T>(self, value: T) -> Result<T> {
    if self.is_empty() {
      Ok(value)
    } else {
      Err(Error::Validation(self))
    }
  }

  // ── Field checks ─────────────────────────────────────────────────────────

  /// Require at least `min` characters after trimming.
  pub fn min_chars(
    &mut self,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
  ) {
    if value.trim().chars().count() < min {
      self.add(field, message);
    }
  }

  /// Require at least one entry.
  pub fn non_empty_list(
    &mut self,
    field: &'static str,
    values: &[String],
    message: &str,
  ) {
    if values.is_empty() {
      self.add(field, message);
    }
  }

  pub fn email(&mut self, field: &'static str, value: &str, message: &str) {
    if !is_valid_email(value) {
      self.add(field, message);
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      for message in messages {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {message}")?;
        first = false;
      }
    }
    Ok(())
  }
}

pub fn is_valid_email(value: &str) -> bool { EMAIL_RE.is_match(value.trim()) }

/// Parse an absolute `http`/`https` URL.
pub fn parse_http_url(value: &str) -> Option<Url> {
  Url::parse(value.trim())
    .ok()
    .filter(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Trim every entry, drop blanks, and drop later duplicates while keeping
/// first-seen order.
pub fn normalize_list(values: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(values.len());
  for value in values {
    let value = value.trim();
    if !value.is_empty() && !out.iter().any(|v| v == value) {
      out.push(value.to_owned());
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("jane@example.com"));
    assert!(is_valid_email("  jane.doe+jobs@mail.example.org "));
    assert!(!is_valid_email("jane@"));
    assert!(!is_valid_email("jane example.com"));
    assert!(!is_valid_email("jane@example"));
  }

  #[test]
  fn http_urls_only() {
    assert!(parse_http_url("https://example.com/apply").is_some());
    assert!(parse_http_url("http://jobs.example.com").is_some());
    assert!(parse_http_url("#").is_none());
    assert!(parse_http_url("mailto:hr@example.com").is_none());
    assert!(parse_http_url("not a url").is_none());
  }

  #[test]
  fn normalize_list_keeps_order_and_drops_duplicates() {
    let tags = normalize_list(vec![
      " Rust ".into(),
      "".into(),
      "Axum".into(),
      "Rust".into(),
      "SQL".into(),
    ]);
    assert_eq!(tags, ["Rust", "Axum", "SQL"]);
  }

  #[test]
  fn errors_collect_per_field() {
    let mut errors = FieldErrors::new();
    errors.min_chars("title", "a", 2, "too short");
    errors.email("email", "nope", "bad email");
    errors.min_chars("company", "Acme", 2, "too short");

    assert_eq!(errors.fields().collect::<Vec<_>>(), ["email", "title"]);
    assert_eq!(errors.to_string(), "email: bad email; title: too short");
    assert!(matches!(errors.finish(()), Err(Error::Validation(_))));
  }
}
