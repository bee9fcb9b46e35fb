//! Contact-form validation.
//!
//! Given the raw submitted fields, produce either a validated
//! [`NewContact`] or the list of every failing field. Validation never
//! panics on malformed input, and it does not short-circuit — the caller
//! can report all problems at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contact::{ContactSubmission, NewContact};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,})+$").expect("email pattern")
});

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  fn new(field: &str, message: &str) -> Self {
    Self {
      field:   field.to_owned(),
      message: message.to_owned(),
    }
  }
}

/// The digits of `raw`, with all formatting characters (spaces, dashes,
/// dots, parentheses, a leading `+`) stripped.
pub fn phone_digits(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validate a raw submission against the contact-form rules.
///
/// | Field | Rule |
/// |-------|------|
/// | fullName | 2–50 chars after trimming |
/// | email    | `local@domain.tld` pattern |
/// | phone    | ≥ 10 digits after stripping formatting |
/// | subject  | 5–100 chars after trimming |
/// | message  | 10–1000 chars |
pub fn validate_submission(
  sub: &ContactSubmission,
) -> Result<NewContact, Vec<FieldError>> {
  let mut errors = Vec::new();

  let full_name = sub.full_name.as_deref().unwrap_or("").trim();
  if full_name.is_empty() {
    errors.push(FieldError::new("fullName", "Please provide your full name"));
  } else if !(2..=50).contains(&full_name.chars().count()) {
    errors.push(FieldError::new(
      "fullName",
      "Name must be between 2 and 50 characters",
    ));
  }

  let email = sub.email.as_deref().unwrap_or("").trim();
  if email.is_empty() {
    errors.push(FieldError::new("email", "Please provide your email"));
  } else if !EMAIL_RE.is_match(email) {
    errors.push(FieldError::new("email", "Please provide a valid email"));
  }

  let phone = sub.phone.as_deref().unwrap_or("").trim();
  if phone.is_empty() {
    errors.push(FieldError::new("phone", "Please provide your phone number"));
  } else if phone_digits(phone).len() < 10 {
    errors.push(FieldError::new(
      "phone",
      "Phone number must have at least 10 digits",
    ));
  }

  let subject = sub.subject.as_deref().unwrap_or("").trim();
  if subject.is_empty() {
    errors.push(FieldError::new("subject", "Please provide a subject"));
  } else if !(5..=100).contains(&subject.chars().count()) {
    errors.push(FieldError::new(
      "subject",
      "Subject must be between 5 and 100 characters",
    ));
  }

  let message = sub.message.as_deref().unwrap_or("");
  if message.trim().is_empty() {
    errors.push(FieldError::new("message", "Please provide a message"));
  } else if !(10..=1000).contains(&message.chars().count()) {
    errors.push(FieldError::new(
      "message",
      "Message must be between 10 and 1000 characters",
    ));
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(NewContact {
    full_name: full_name.to_owned(),
    email:     email.to_owned(),
    phone:     phone.to_owned(),
    subject:   subject.to_owned(),
    message:   message.to_owned(),
  })
}
