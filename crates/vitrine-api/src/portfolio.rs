//! Handlers for `/portfolio` endpoints.
//!
//! The portfolio is a singleton document. `GET` lazily creates it with
//! default values; the append endpoints require it to already exist and
//! return only the list they appended to.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/portfolio` | Lazy-creates the singleton |
//! | `PUT`  | `/portfolio` | Shallow field merge |
//! | `POST` | `/portfolio/skills` | 404 if no portfolio exists |
//! | `POST` | `/portfolio/experience` | 404 if no portfolio exists |
//! | `POST` | `/portfolio/education` | 404 if no portfolio exists |

use std::collections::BTreeMap;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use vitrine_core::{
  portfolio::{Education, Experience, Portfolio, Skill},
  store::SiteStore,
};

use crate::{AppState, error::ApiError};

// ─── Fetch ───────────────────────────────────────────────────────────────────

/// `GET /portfolio` — returns the singleton, creating it with default
/// values on first fetch.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let portfolio = state
    .store
    .get_or_create_portfolio(Portfolio::default_profile())
    .await
    .map_err(|e| state.internal("Failed to fetch portfolio", e))?;

  Ok(Json(json!({ "success": true, "data": portfolio })))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// The `PUT /portfolio` payload. Merging is shallow: a present field
/// replaces the stored one wholesale, including the nested lists and
/// `socialLinks`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioUpdate {
  pub name:          Option<String>,
  pub title:         Option<String>,
  pub bio:           Option<String>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub location:      Option<String>,
  pub profile_image: Option<String>,
  pub skills:        Option<Vec<Skill>>,
  pub experience:    Option<Vec<Experience>>,
  pub education:     Option<Vec<Education>>,
  pub social_links:  Option<BTreeMap<String, String>>,
}

impl PortfolioUpdate {
  fn apply(self, target: &mut Portfolio) {
    if let Some(v) = self.name {
      target.name = v;
    }
    if let Some(v) = self.title {
      target.title = v;
    }
    if let Some(v) = self.bio {
      target.bio = v;
    }
    if let Some(v) = self.email {
      target.email = v;
    }
    if let Some(v) = self.phone {
      target.phone = Some(v);
    }
    if let Some(v) = self.location {
      target.location = Some(v);
    }
    if let Some(v) = self.profile_image {
      target.profile_image = Some(v);
    }
    if let Some(v) = self.skills {
      target.skills = v;
    }
    if let Some(v) = self.experience {
      target.experience = v;
    }
    if let Some(v) = self.education {
      target.education = v;
    }
    if let Some(v) = self.social_links {
      target.social_links = v;
    }
  }
}

/// `PUT /portfolio` — merge the submitted fields over the stored
/// document (or over the defaults if none exists yet) and persist.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PortfolioUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let mut portfolio = state
    .store
    .get_portfolio()
    .await
    .map_err(|e| state.internal("Failed to update portfolio", e))?
    .unwrap_or_else(Portfolio::default_profile);

  body.apply(&mut portfolio);

  let saved = state
    .store
    .save_portfolio(portfolio)
    .await
    .map_err(|e| state.internal("Failed to update portfolio", e))?;

  Ok(Json(json!({
    "success": true,
    "message": "Portfolio updated successfully",
    "data": saved,
  })))
}

// ─── Append: skills ──────────────────────────────────────────────────────────

/// Raw skill payload. Proficiency is taken as a plain integer so an
/// out-of-range value surfaces as a 400, not a deserialisation error.
#[derive(Debug, Deserialize)]
pub struct SkillBody {
  pub name:        Option<String>,
  pub proficiency: Option<i64>,
}

/// `POST /portfolio/skills` — body: `{"name":"Rust","proficiency":70}`
pub async fn add_skill<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SkillBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let (Some(name), Some(proficiency)) = (body.name, body.proficiency) else {
    return Err(ApiError::BadRequest(
      "Name and proficiency are required".to_owned(),
    ));
  };
  if !(0..=100).contains(&proficiency) {
    return Err(ApiError::BadRequest(
      "Proficiency must be between 0 and 100".to_owned(),
    ));
  }

  let skill = Skill {
    name,
    proficiency: proficiency as u8,
  };

  let skills = state
    .store
    .append_skill(skill)
    .await
    .map_err(|e| state.internal("Failed to add skill", e))?
    .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_owned()))?;

  Ok(Json(json!({
    "success": true,
    "message": "Skill added successfully",
    "data": skills,
  })))
}

// ─── Append: experience ──────────────────────────────────────────────────────

/// `POST /portfolio/experience` — missing fields default to empty
/// strings; only the skill endpoint enforces required sub-fields.
pub async fn add_experience<S>(
  State(state): State<AppState<S>>,
  Json(entry): Json<Experience>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let experience = state
    .store
    .append_experience(entry)
    .await
    .map_err(|e| state.internal("Failed to add experience", e))?
    .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_owned()))?;

  Ok(Json(json!({
    "success": true,
    "message": "Experience added successfully",
    "data": experience,
  })))
}

// ─── Append: education ───────────────────────────────────────────────────────

/// `POST /portfolio/education`
pub async fn add_education<S>(
  State(state): State<AppState<S>>,
  Json(entry): Json<Education>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SiteStore,
{
  let education = state
    .store
    .append_education(entry)
    .await
    .map_err(|e| state.internal("Failed to add education", e))?
    .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_owned()))?;

  Ok(Json(json!({
    "success": true,
    "message": "Education added successfully",
    "data": education,
  })))
}
