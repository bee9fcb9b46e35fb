//! Mail transports: an HTTP mail-provider client and a logging
//! fallback for unconfigured deployments.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use vitrine_core::mailer::{MailError, Mailer, OutboundEmail};

use crate::settings::MailConfig;

/// Delivers mail through a JSON HTTP mail-provider API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpMailer {
  client: Client,
  config: MailConfig,
}

impl HttpMailer {
  pub fn new(config: MailConfig) -> Result<Self, MailError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(|e| MailError::Transport(e.to_string()))?;
    Ok(Self { client, config })
  }
}

#[async_trait]
impl Mailer for HttpMailer {
  async fn send(&self, mail: &OutboundEmail) -> Result<(), MailError> {
    let resp = self
      .client
      .post(&self.config.api_url)
      .bearer_auth(&self.config.api_token)
      .json(&json!({
        "from": self.config.from_address,
        "to": mail.to,
        "subject": mail.subject,
        "html": mail.html_body,
      }))
      .send()
      .await
      .map_err(|e| MailError::Transport(e.to_string()))?;

    if !resp.status().is_success() {
      return Err(MailError::Rejected(format!(
        "mail API returned {}",
        resp.status()
      )));
    }
    Ok(())
  }
}

/// Used when no `[mail]` section is configured: logs the would-be
/// delivery and reports success.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
  async fn send(&self, mail: &OutboundEmail) -> Result<(), MailError> {
    tracing::info!(
      to = %mail.to,
      subject = %mail.subject,
      "mail transport not configured; skipping delivery",
    );
    Ok(())
  }
}
