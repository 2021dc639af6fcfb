//! careers-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the careers JSON API under `/api`.
//!
//! # Staff credentials
//!
//! ```text
//! careers-server add-identity editor@agency.example
//! ```
//!
//! prompts for a password on stdin and stores its argon2 hash. The first
//! successful login decides the account's role.

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use careers_ai::GenAiAssistant;
use careers_api::{AppState, api_router, identity::hash_password};
use careers_core::validate::is_valid_email;
use careers_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Agency careers API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the API (the default).
  Serve {
    /// Insert the sample postings if the jobs table is empty.
    #[arg(long)]
    seed: bool,
  },
  /// Print the argon2 hash for a password entered on stdin and exit.
  HashPassword,
  /// Register a staff login with a password entered on stdin.
  AddIdentity { email: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if let Some(Command::HashPassword) = cli.command {
    let password = read_password()?;
    println!("{}", hash_password(&password)?);
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("CAREERS")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );

  let genai = server_cfg.genai_config(|name| std::env::var(name).ok());
  if genai.api_key.is_empty() {
    warn!("no AI API key configured; AI-assisted features will fail");
  }
  let assistant = Arc::new(GenAiAssistant::new(genai).context("failed to build AI client")?);

  let state = AppState::new(store, assistant, server_cfg.api_config());

  let seed = match cli.command {
    Some(Command::AddIdentity { email }) => return add_identity(&state, &email).await,
    Some(Command::Serve { seed }) => seed,
    Some(Command::HashPassword) | None => false,
  };

  if seed {
    let written = state.jobs().seed_initial_jobs().await?;
    info!(written, "seed complete");
  }
  state.gate().ensure_super_admin_exists().await;

  let app = Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn add_identity(
  state: &AppState<SqliteStore, GenAiAssistant>,
  email: &str,
) -> anyhow::Result<()> {
  anyhow::ensure!(is_valid_email(email), "{email:?} is not a valid email address");
  let password = read_password()?;
  anyhow::ensure!(
    password.chars().count() >= careers_api::gate::MIN_PASSWORD_CHARS,
    "password must be at least {} characters",
    careers_api::gate::MIN_PASSWORD_CHARS
  );

  match state.identity.register(email, &password).await? {
    Some(record) => println!("registered {} ({})", record.email, record.uid),
    None => anyhow::bail!("{email} is already registered"),
  }
  Ok(())
}

/// Read a password line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_owned())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
