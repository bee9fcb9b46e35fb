//! Contact — a single inquiry submitted through the public contact form.
//!
//! Inquiries are created by the public submit endpoint, mutated only via
//! an explicit status update, and deleted only via an explicit admin
//! delete. They never expire on their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
  #[default]
  New,
  Read,
  Replied,
}

impl ContactStatus {
  /// Parse the wire form (`"new"` | `"read"` | `"replied"`).
  /// Returns `None` for anything else.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "new" => Some(Self::New),
      "read" => Some(Self::Read),
      "replied" => Some(Self::Replied),
      _ => None,
    }
  }
}

/// A persisted inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  #[serde(rename = "id")]
  pub contact_id: Uuid,
  pub full_name:  String,
  pub email:      String,
  pub phone:      String,
  pub subject:    String,
  pub message:    String,
  pub status:     ContactStatus,
  pub created_at: DateTime<Utc>,
}

/// A validated submission, ready to persist. The store assigns the id,
/// the creation timestamp, and the initial [`ContactStatus::New`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub full_name: String,
  pub email:     String,
  pub phone:     String,
  pub subject:   String,
  pub message:   String,
}

/// The raw contact-form body as posted by the browser.
///
/// Every field is optional so that a missing field surfaces as a
/// field-level validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
  pub full_name: Option<String>,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub subject:   Option<String>,
  pub message:   Option<String>,
}
