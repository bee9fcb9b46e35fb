//! JSON REST API for the vitrine portfolio backend.
//!
//! Exposes an axum [`Router`] backed by any [`vitrine_core::store::SiteStore`]
//! and a [`Mailer`]. Transport concerns (CORS, TLS, body limits) are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vitrine_api::api_router(state))
//! ```

pub mod contacts;
pub mod error;
pub mod portfolio;

use std::sync::Arc;

use axum::{
  Json, Router,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use vitrine_core::{mailer::Mailer, store::SiteStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub mailer: Arc<dyn Mailer>,
  /// Recipient of the owner-alert email.
  pub owner_email: String,
  /// Attach underlying error strings to 500 bodies. Keep off in
  /// production.
  pub expose_errors: bool,
}

impl<S> AppState<S> {
  /// Shape a storage failure into the 500 envelope, attaching the
  /// underlying error only when configured to expose it.
  pub(crate) fn internal(
    &self,
    message: &str,
    e: impl std::fmt::Display,
  ) -> ApiError {
    ApiError::Internal {
      message: message.to_owned(),
      detail:  self.expose_errors.then(|| e.to_string()),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SiteStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Contacts
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::submit::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update_status::<S>)
        .delete(contacts::delete_one::<S>),
    )
    // Portfolio
    .route(
      "/portfolio",
      get(portfolio::get_one::<S>).put(portfolio::update::<S>),
    )
    .route("/portfolio/skills", post(portfolio::add_skill::<S>))
    .route("/portfolio/experience", post(portfolio::add_experience::<S>))
    .route("/portfolio/education", post(portfolio::add_education::<S>))
    // Health
    .route("/health", get(health))
    .fallback(not_found)
    .with_state(state)
}

/// `GET /health`
async fn health() -> impl IntoResponse {
  Json(json!({
    "success": true,
    "message": "Server is running",
    "timestamp": Utc::now().to_rfc3339(),
  }))
}

/// Envelope-shaped 404 for unmatched routes. Public so the server can
/// install the same fallback outside the `/api` nest.
pub async fn not_found() -> impl IntoResponse {
  (
    StatusCode::NOT_FOUND,
    Json(json!({ "success": false, "message": "Route not found" })),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{
    sync::{Arc, Mutex},
    time::Duration,
  };

  use async_trait::async_trait;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;
  use vitrine_core::mailer::{MailError, Mailer, OutboundEmail};
  use vitrine_store_sqlite::SqliteStore;

  use super::*;

  // ── Mailer doubles ──────────────────────────────────────────────────────────

  #[derive(Default)]
  struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
  }

  #[async_trait]
  impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutboundEmail) -> Result<(), MailError> {
      self.sent.lock().unwrap().push(mail.clone());
      Ok(())
    }
  }

  struct FailingMailer;

  #[async_trait]
  impl Mailer for FailingMailer {
    async fn send(&self, _mail: &OutboundEmail) -> Result<(), MailError> {
      Err(MailError::Transport("connection refused".to_owned()))
    }
  }

  // ── Helpers ─────────────────────────────────────────────────────────────────

  async fn make_state(mailer: Arc<dyn Mailer>) -> AppState<SqliteStore> {
    AppState {
      store: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      mailer,
      owner_email: "owner@example.com".to_owned(),
      expose_errors: false,
    }
  }

  async fn request(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };

    let resp = api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  fn submission() -> Value {
    json!({
      "fullName": "Ada Lovelace",
      "email": "ada@example.com",
      "phone": "+1 (555) 123-4567",
      "subject": "Contract work",
      "message": "I would like to discuss a project with you.",
    })
  }

  /// Give the detached notification task a moment to run.
  async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
  }

  // ── Health and fallback ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_reports_running() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) = request(state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Server is running"));
    assert!(body["timestamp"].is_string());
  }

  #[tokio::test]
  async fn unknown_route_returns_envelope_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) = request(state, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Route not found"));
  }

  // ── Contact submission ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_returns_201_with_identity_fields() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) =
      request(state, "POST", "/contacts", Some(submission())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(
      body["message"],
      json!("Message sent successfully! I will get back to you soon.")
    );
    assert_eq!(body["data"]["fullName"], json!("Ada Lovelace"));
    assert_eq!(body["data"]["email"], json!("ada@example.com"));
    assert!(
      Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok(),
      "id is a uuid"
    );
  }

  #[tokio::test]
  async fn submit_empty_body_names_every_field() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) =
      request(state, "POST", "/contacts", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));
    let fields: Vec<&str> = body["errors"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["field"].as_str().unwrap())
      .collect();
    assert_eq!(fields, ["fullName", "email", "phone", "subject", "message"]);
  }

  #[tokio::test]
  async fn submit_short_phone_rejected_despite_formatting() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let mut body = submission();
    body["phone"] = json!("(123) 456-78");

    let (status, body) = request(state, "POST", "/contacts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], json!("phone"));
  }

  #[tokio::test]
  async fn submitted_contact_is_retrievable_with_status_new() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (_, created) =
      request(state.clone(), "POST", "/contacts", Some(submission())).await;
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) =
      request(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], json!("Ada Lovelace"));
    assert_eq!(body["data"]["email"], json!("ada@example.com"));
    assert_eq!(body["data"]["phone"], json!("+1 (555) 123-4567"));
    assert_eq!(body["data"]["subject"], json!("Contract work"));
    assert_eq!(
      body["data"]["message"],
      json!("I would like to discuss a project with you.")
    );
    assert_eq!(body["data"]["status"], json!("new"));
  }

  #[tokio::test]
  async fn submit_sends_acknowledgment_then_owner_alert() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = make_state(mailer.clone()).await;

    let (status, _) =
      request(state, "POST", "/contacts", Some(submission())).await;
    assert_eq!(status, StatusCode::CREATED);
    settle().await;

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, "Thank you for reaching out!");
    assert_eq!(sent[1].to, "owner@example.com");
    assert_eq!(sent[1].subject, "New Contact: Contract work");
    assert!(sent[1].html_body.contains("Ada Lovelace"));
  }

  #[tokio::test]
  async fn mailer_failure_still_returns_201() {
    let state = make_state(Arc::new(FailingMailer)).await;
    let (status, body) =
      request(state.clone(), "POST", "/contacts", Some(submission())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    settle().await;

    // The inquiry was persisted despite the delivery failure.
    let (_, listed) = request(state, "GET", "/contacts", None).await;
    assert_eq!(listed["count"], json!(1));
  }

  // ── Contact admin operations ────────────────────────────────────────────────

  #[tokio::test]
  async fn list_contacts_newest_first_with_count() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;

    let mut first = submission();
    first["fullName"] = json!("First Caller");
    request(state.clone(), "POST", "/contacts", Some(first)).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let mut second = submission();
    second["fullName"] = json!("Second Caller");
    request(state.clone(), "POST", "/contacts", Some(second)).await;

    let (status, body) = request(state, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["fullName"], json!("Second Caller"));
    assert_eq!(data[1]["fullName"], json!("First Caller"));
  }

  #[tokio::test]
  async fn get_missing_contact_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) = request(
      state,
      "GET",
      &format!("/contacts/{}", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Contact not found"));
  }

  #[tokio::test]
  async fn get_malformed_contact_id_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, _) =
      request(state, "GET", "/contacts/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_status_to_read() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (_, created) =
      request(state.clone(), "POST", "/contacts", Some(submission())).await;
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = request(
      state,
      "PUT",
      &format!("/contacts/{id}"),
      Some(json!({ "status": "read" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Contact status updated"));
    assert_eq!(body["data"]["status"], json!("read"));
  }

  #[tokio::test]
  async fn update_status_rejects_unknown_value_and_leaves_record() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (_, created) =
      request(state.clone(), "POST", "/contacts", Some(submission())).await;
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = request(
      state.clone(),
      "PUT",
      &format!("/contacts/{id}"),
      Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid status"));

    let (_, fetched) =
      request(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(fetched["data"]["status"], json!("new"));
  }

  #[tokio::test]
  async fn update_status_missing_contact_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, _) = request(
      state,
      "PUT",
      &format!("/contacts/{}", Uuid::new_v4()),
      Some(json!({ "status": "read" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_contact_then_fetch_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (_, created) =
      request(state.clone(), "POST", "/contacts", Some(submission())).await;
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) =
      request(state.clone(), "DELETE", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Contact deleted successfully"));

    let (status, _) =
      request(state, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_missing_contact_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, _) = request(
      state,
      "DELETE",
      &format!("/contacts/{}", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Portfolio ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn portfolio_fetch_lazily_creates_defaults_once() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;

    let (status, first) =
      request(state.clone(), "GET", "/portfolio", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["name"], json!("Mohammad Ali Khan"));
    let skills = first["data"]["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 5);
    assert_eq!(skills[0]["name"], json!("HTML"));
    assert_eq!(skills[0]["proficiency"], json!(90));

    // Idempotent after creation: the second fetch returns the same
    // document, including its timestamp.
    let (_, second) = request(state, "GET", "/portfolio", None).await;
    assert_eq!(second["data"], first["data"]);
  }

  #[tokio::test]
  async fn portfolio_update_merges_shallowly() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    request(state.clone(), "GET", "/portfolio", None).await;

    let (status, body) = request(
      state,
      "PUT",
      "/portfolio",
      Some(json!({
        "title": "Backend Developer",
        "socialLinks": { "github": "https://github.com/ada" },
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Portfolio updated successfully"));
    // Untouched fields survive; socialLinks is replaced wholesale.
    assert_eq!(body["data"]["name"], json!("Mohammad Ali Khan"));
    assert_eq!(body["data"]["title"], json!("Backend Developer"));
    assert_eq!(
      body["data"]["socialLinks"],
      json!({ "github": "https://github.com/ada" })
    );
  }

  #[tokio::test]
  async fn portfolio_update_without_existing_document_starts_from_defaults() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;

    let (status, body) = request(
      state,
      "PUT",
      "/portfolio",
      Some(json!({ "name": "Ada Lovelace" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Ada Lovelace"));
    assert_eq!(body["data"]["title"], json!("Frontend Developer"));
  }

  #[tokio::test]
  async fn add_skill_appends_and_returns_only_the_list() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    request(state.clone(), "GET", "/portfolio", None).await;

    let (status, body) = request(
      state,
      "POST",
      "/portfolio/skills",
      Some(json!({ "name": "Rust", "proficiency": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Skill added successfully"));
    let skills = body["data"].as_array().unwrap();
    assert_eq!(skills.len(), 6);
    assert_eq!(skills[0]["name"], json!("HTML"));
    assert_eq!(skills[5]["name"], json!("Rust"));
  }

  #[tokio::test]
  async fn add_skill_requires_name_and_proficiency() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    request(state.clone(), "GET", "/portfolio", None).await;

    let (status, body) = request(
      state,
      "POST",
      "/portfolio/skills",
      Some(json!({ "name": "Rust" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Name and proficiency are required"));
  }

  #[tokio::test]
  async fn add_skill_rejects_out_of_range_proficiency() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    request(state.clone(), "GET", "/portfolio", None).await;

    let (status, body) = request(
      state,
      "POST",
      "/portfolio/skills",
      Some(json!({ "name": "Rust", "proficiency": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      body["message"],
      json!("Proficiency must be between 0 and 100")
    );
  }

  #[tokio::test]
  async fn add_skill_without_portfolio_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) = request(
      state,
      "POST",
      "/portfolio/skills",
      Some(json!({ "name": "Rust", "proficiency": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Portfolio not found"));
  }

  #[tokio::test]
  async fn add_experience_appends_entry() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    request(state.clone(), "GET", "/portfolio", None).await;

    let (status, body) = request(
      state,
      "POST",
      "/portfolio/experience",
      Some(json!({
        "title": "Engineer",
        "company": "Acme",
        "period": "2020–2024",
        "description": "Built things.",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Experience added successfully"));
    assert_eq!(body["data"][0]["company"], json!("Acme"));
  }

  #[tokio::test]
  async fn add_education_without_portfolio_returns_404() {
    let state = make_state(Arc::new(RecordingMailer::default())).await;
    let (status, body) = request(
      state,
      "POST",
      "/portfolio/education",
      Some(json!({ "degree": "BSc", "institution": "Example", "year": "2019" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Portfolio not found"));
  }

  // ── Error detail gating ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn internal_detail_follows_expose_errors_flag() {
    let mut state = make_state(Arc::new(RecordingMailer::default())).await;

    let hidden = state.internal("Failed to fetch contacts", "disk on fire");
    let ApiError::Internal { detail, .. } = hidden else {
      panic!("expected internal error");
    };
    assert!(detail.is_none());

    state.expose_errors = true;
    let shown = state.internal("Failed to fetch contacts", "disk on fire");
    let ApiError::Internal { detail, .. } = shown else {
      panic!("expected internal error");
    };
    assert_eq!(detail.as_deref(), Some("disk on fire"));
  }
}
