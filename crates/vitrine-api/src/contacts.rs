//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST`   | `/contacts` | Public: submit the contact form |
//! | `GET`    | `/contacts` | List all inquiries, newest first |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PUT`    | `/contacts/:id` | Body: `{"status":"read"}` |
//! | `DELETE` | `/contacts/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use vitrine_core::{
  contact::{Contact, ContactStatus, ContactSubmission},
  mailer::{self, Mailer},
  store::SiteStore,
  validate::validate_submission,
};

use crate::{AppState, error::ApiError};

/// Contact ids are UUIDs on the wire; anything else cannot name a
/// stored record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw)
    .map_err(|_| ApiError::NotFound("Contact not found".to_owned()))
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /contacts` — validate, persist, then notify in the background.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ContactSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let input = validate_submission(&body).map_err(ApiError::Validation)?;

  let contact = state.store.add_contact(input).await.map_err(|e| {
    state.internal("Failed to send message. Please try again later.", e)
  })?;

  // The inquiry is durable at this point; email delivery is best-effort
  // and must not change the response.
  spawn_notifications(
    state.mailer.clone(),
    state.owner_email.clone(),
    contact.clone(),
  );

  Ok((
    StatusCode::CREATED,
    Json(json!({
      "success": true,
      "message": "Message sent successfully! I will get back to you soon.",
      "data": {
        "id": contact.contact_id,
        "fullName": contact.full_name,
        "email": contact.email,
      },
    })),
  ))
}

/// Send the acknowledgment and owner-alert emails on a detached task.
/// Failures are logged and swallowed.
fn spawn_notifications(
  mailer: Arc<dyn Mailer>,
  owner_email: String,
  contact: Contact,
) {
  tokio::spawn(async move {
    let ack = mailer::acknowledgment(&contact);
    if let Err(e) = mailer.send(&ack).await {
      tracing::warn!(
        contact_id = %contact.contact_id,
        error = %e,
        "failed to send acknowledgment email",
      );
    }

    let alert = mailer::owner_alert(&contact, &owner_email);
    if let Err(e) = mailer.send(&alert).await {
      tracing::warn!(
        contact_id = %contact.contact_id,
        error = %e,
        "failed to send owner alert email",
      );
    }
  });
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /contacts` — newest first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let contacts = state
    .store
    .list_contacts()
    .await
    .map_err(|e| state.internal("Failed to fetch contacts", e))?;

  Ok(Json(json!({
    "success": true,
    "count": contacts.len(),
    "data": contacts,
  })))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let id = parse_id(&id)?;

  let contact = state
    .store
    .get_contact(id)
    .await
    .map_err(|e| state.internal("Failed to fetch contact", e))?
    .ok_or_else(|| ApiError::NotFound("Contact not found".to_owned()))?;

  Ok(Json(json!({ "success": true, "data": contact })))
}

// ─── Update status ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
  pub status: Option<String>,
}

/// `PUT /contacts/:id` — body: `{"status":"new"|"read"|"replied"}`
pub async fn update_status<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateStatusBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let id = parse_id(&id)?;

  let status = body
    .status
    .as_deref()
    .and_then(ContactStatus::parse)
    .ok_or_else(|| ApiError::BadRequest("Invalid status".to_owned()))?;

  let contact = state
    .store
    .set_contact_status(id, status)
    .await
    .map_err(|e| state.internal("Failed to update contact", e))?
    .ok_or_else(|| ApiError::NotFound("Contact not found".to_owned()))?;

  Ok(Json(json!({
    "success": true,
    "message": "Contact status updated",
    "data": contact,
  })))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let id = parse_id(&id)?;

  let deleted = state
    .store
    .delete_contact(id)
    .await
    .map_err(|e| state.internal("Failed to delete contact", e))?;
  if !deleted {
    return Err(ApiError::NotFound("Contact not found".to_owned()));
  }

  Ok(Json(json!({
    "success": true,
    "message": "Contact deleted successfully",
  })))
}
