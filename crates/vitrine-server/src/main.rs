//! vitrine server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite store, and serves the JSON API under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::{
  Router,
  extract::DefaultBodyLimit,
  http::{HeaderValue, Method, header},
};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vitrine_api::AppState;
use vitrine_core::mailer::Mailer;
use vitrine_store_sqlite::SqliteStore;

mod mailer;
mod settings;

use mailer::{HttpMailer, LogMailer};
use settings::ServerConfig;

/// Request bodies above this size are rejected before any handler runs.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Parser)]
#[command(author, version, about = "vitrine portfolio backend")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let sources = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("VITRINE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = sources
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Pick the mail transport.
  let mailer: Arc<dyn Mailer> = match server_cfg.mail.clone() {
    Some(mail_cfg) => Arc::new(HttpMailer::new(mail_cfg)?),
    None => {
      tracing::warn!("no [mail] section configured; outbound email will only be logged");
      Arc::new(LogMailer)
    }
  };

  // Build application state.
  let state = AppState {
    store: Arc::new(store),
    mailer,
    owner_email: server_cfg.owner_email.clone(),
    expose_errors: server_cfg.expose_errors,
  };

  let cors = cors_layer(&server_cfg.allowed_origins)?;

  let app = Router::new()
    .nest("/api", vitrine_api::api_router(state))
    .fallback(vitrine_api::not_found)
    .layer(TraceLayer::new_for_http())
    .layer(cors)
    .layer(DefaultBodyLimit::max(BODY_LIMIT));

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Listening on http://{address}");
  tracing::info!("Health check: http://{address}/api/health");
  tracing::info!("Contact API: http://{address}/api/contacts");
  tracing::info!("Portfolio API: http://{address}/api/portfolio");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// The CORS policy: configured origins only, with credentials, over the
/// API's method set.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
  let origins = origins
    .iter()
    .map(|o| {
      o.parse::<HeaderValue>()
        .with_context(|| format!("invalid allowed origin {o:?}"))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(origins)
      .allow_credentials(true)
      .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
      ])
      .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
      .max_age(Duration::from_secs(60 * 60)),
  )
}

async fn shutdown_signal() {
  let ctrl_c = async {
    tokio::signal::ctrl_c()
      .await
      .expect("failed to install Ctrl+C handler");
    tracing::info!("received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
      .expect("failed to install signal handler")
      .recv()
      .await;
    tracing::info!("received terminate signal, shutting down");
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
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
