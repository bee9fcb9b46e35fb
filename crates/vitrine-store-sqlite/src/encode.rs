//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. The portfolio's
//! ordered lists and social links are stored as compact JSON. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vitrine_core::{
  contact::{Contact, ContactStatus},
  portfolio::Portfolio,
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ContactStatus ───────────────────────────────────────────────────────────

pub fn encode_status(status: ContactStatus) -> &'static str {
  match status {
    ContactStatus::New => "new",
    ContactStatus::Read => "read",
    ContactStatus::Replied => "replied",
  }
}

pub fn decode_status(s: &str) -> Result<ContactStatus> {
  ContactStatus::parse(s).ok_or_else(|| Error::UnknownStatus(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
  pub full_name:  String,
  pub email:      String,
  pub phone:      String,
  pub subject:    String,
  pub message:    String,
  pub status:     String,
  pub created_at: String,
}

impl RawContact {
  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      contact_id: decode_uuid(&self.contact_id)?,
      full_name:  self.full_name,
      email:      self.email,
      phone:      self.phone,
      subject:    self.subject,
      message:    self.message,
      status:     decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from the `portfolio` row.
pub struct RawPortfolio {
  pub name:          String,
  pub title:         String,
  pub bio:           String,
  pub email:         String,
  pub phone:         Option<String>,
  pub location:      Option<String>,
  pub profile_image: Option<String>,
  pub skills:        String,
  pub experience:    String,
  pub education:     String,
  pub social_links:  String,
  pub updated_at:    String,
}

impl RawPortfolio {
  pub fn into_portfolio(self) -> Result<Portfolio> {
    Ok(Portfolio {
      name:          self.name,
      title:         self.title,
      bio:           self.bio,
      email:         self.email,
      phone:         self.phone,
      location:      self.location,
      profile_image: self.profile_image,
      skills:        serde_json::from_str(&self.skills)?,
      experience:    serde_json::from_str(&self.experience)?,
      education:     serde_json::from_str(&self.education)?,
      social_links:  serde_json::from_str(&self.social_links)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// The column values for writing `portfolio` (everything except the
/// fixed row id), JSON-encoded where the column stores JSON.
pub struct PortfolioColumns {
  pub name:          String,
  pub title:         String,
  pub bio:           String,
  pub email:         String,
  pub phone:         Option<String>,
  pub location:      Option<String>,
  pub profile_image: Option<String>,
  pub skills:        String,
  pub experience:    String,
  pub education:     String,
  pub social_links:  String,
  pub updated_at:    String,
}

pub fn portfolio_columns(p: &Portfolio) -> Result<PortfolioColumns> {
  Ok(PortfolioColumns {
    name:          p.name.clone(),
    title:         p.title.clone(),
    bio:           p.bio.clone(),
    email:         p.email.clone(),
    phone:         p.phone.clone(),
    location:      p.location.clone(),
    profile_image: p.profile_image.clone(),
    skills:        serde_json::to_string(&p.skills)?,
    experience:    serde_json::to_string(&p.experience)?,
    education:     serde_json::to_string(&p.education)?,
    social_links:  serde_json::to_string(&p.social_links)?,
    updated_at:    encode_dt(p.updated_at),
  })
}
