//! Runtime configuration, deserialised from `config.toml` and `CAREERS_*`
//! environment variables.

use std::{path::PathBuf, time::Duration};

use careers_ai::{
  GenAiConfig,
  client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT},
};
use careers_api::ApiConfig;
use careers_core::user::DEFAULT_SUPER_ADMIN_EMAIL;
use chrono::TimeDelta;
use serde::Deserialize;

/// Environment variables consulted, in order, when `ai.api_key` is unset.
pub const API_KEY_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  pub store_path:            PathBuf,
  pub super_admin_email:     String,
  pub auto_provision_admins: bool,
  pub session_ttl_hours:     i64,
  pub backend_timeout_secs:  u64,
  pub ai:                    AiSettings,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  "127.0.0.1".to_owned(),
      port:                  8080,
      store_path:            PathBuf::from("~/.local/share/careers/careers.db"),
      super_admin_email:     DEFAULT_SUPER_ADMIN_EMAIL.to_owned(),
      auto_provision_admins: true,
      session_ttl_hours:     12,
      backend_timeout_secs:  10,
      ai:                    AiSettings::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiSettings {
  pub api_key:      String,
  pub model:        String,
  pub base_url:     String,
  pub timeout_secs: u64,
}

impl Default for AiSettings {
  fn default() -> Self {
    Self {
      api_key:      String::new(),
      model:        DEFAULT_MODEL.to_owned(),
      base_url:     DEFAULT_BASE_URL.to_owned(),
      timeout_secs: DEFAULT_TIMEOUT.as_secs(),
    }
  }
}

impl ServerConfig {
  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      super_admin_email:     self.super_admin_email.trim().to_lowercase(),
      auto_provision_admins: self.auto_provision_admins,
      session_ttl:           TimeDelta::hours(self.session_ttl_hours.max(1)),
      backend_timeout:       Duration::from_secs(self.backend_timeout_secs.max(1)),
    }
  }

  /// The AI client settings. `lookup` resolves fallback environment
  /// variables for the API key.
  pub fn genai_config(&self, lookup: impl Fn(&str) -> Option<String>) -> GenAiConfig {
    let api_key = Some(self.ai.api_key.trim().to_owned())
      .filter(|k| !k.is_empty())
      .or_else(|| {
        API_KEY_FALLBACKS
          .iter()
          .filter_map(|name| lookup(name))
          .find(|k| !k.trim().is_empty())
      })
      .unwrap_or_default();

    GenAiConfig {
      api_key,
      model: self.ai.model.clone(),
      base_url: self.ai.base_url.trim_end_matches('/').to_owned(),
      timeout: Duration::from_secs(self.ai.timeout_secs.max(1)),
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.super_admin_email, "super@admin.com");
    assert!(cfg.auto_provision_admins);
    assert_eq!(cfg.ai.model, DEFAULT_MODEL);
  }

  #[test]
  fn overrides_and_nested_ai_table() {
    let cfg = parse(
      r#"
      port = 9000
      super_admin_email = " Root@Agency.example "
      auto_provision_admins = false
      session_ttl_hours = 2

      [ai]
      api_key = "k-123"
      base_url = "http://localhost:1234/v1/"
      timeout_secs = 5
      "#,
    );

    let api = cfg.api_config();
    assert_eq!(api.super_admin_email, "root@agency.example");
    assert!(!api.auto_provision_admins);
    assert_eq!(api.session_ttl, TimeDelta::hours(2));

    let ai = cfg.genai_config(|_| None);
    assert_eq!(ai.api_key, "k-123");
    assert_eq!(ai.base_url, "http://localhost:1234/v1");
    assert_eq!(ai.timeout, Duration::from_secs(5));
  }

  #[test]
  fn api_key_falls_back_to_environment() {
    let cfg = parse("");
    let ai = cfg.genai_config(|name| (name == "GOOGLE_API_KEY").then(|| "from-env".to_owned()));
    assert_eq!(ai.api_key, "from-env");
  }
}
