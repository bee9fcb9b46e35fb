//! Runtime configuration for the vitrine server.

use std::path::PathBuf;

use serde::Deserialize;

/// Mail-provider transport settings. When the section is absent,
/// outbound email is logged instead of delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
  pub api_url:      String,
  pub api_token:    String,
  pub from_address: String,
}

/// Runtime server configuration, deserialised from `config.toml`
/// layered under the `VITRINE_*` environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,

  #[serde(default = "default_port")]
  pub port: u16,

  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Origins allowed by the CORS layer.
  #[serde(default = "default_allowed_origins")]
  pub allowed_origins: Vec<String>,

  /// Recipient of the owner-alert email.
  #[serde(default = "default_owner_email")]
  pub owner_email: String,

  /// Attach raw error strings to 500 responses. Keep off in
  /// production.
  #[serde(default)]
  pub expose_errors: bool,

  #[serde(default)]
  pub mail: Option<MailConfig>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("vitrine.db") }

fn default_allowed_origins() -> Vec<String> {
  vec![
    "http://localhost:3000".to_owned(),
    "http://localhost:5000".to_owned(),
    "http://127.0.0.1:3000".to_owned(),
  ]
}

fn default_owner_email() -> String { "ali@example.com".to_owned() }
