//! Portfolio — the singleton profile document describing the site owner.
//!
//! Exactly one portfolio document exists in the store at any time. It is
//! created lazily with [`Portfolio::default_profile`] on first fetch and
//! never deleted; updates replace fields wholesale or append to one of
//! the ordered lists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named skill with a 0–100 proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
  pub name:        String,
  pub proficiency: u8,
}

/// One entry in the work-experience list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
  pub title:       String,
  pub company:     String,
  pub period:      String,
  pub description: String,
}

/// One entry in the education list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
  pub degree:      String,
  pub institution: String,
  pub year:        String,
  pub details:     String,
}

/// The singleton profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
  pub name:  String,
  pub title: String,
  pub bio:   String,
  pub email: String,
  #[serde(default)]
  pub phone:         Option<String>,
  #[serde(default)]
  pub location:      Option<String>,
  #[serde(default)]
  pub profile_image: Option<String>,
  #[serde(default)]
  pub skills:        Vec<Skill>,
  #[serde(default)]
  pub experience:    Vec<Experience>,
  #[serde(default)]
  pub education:     Vec<Education>,
  /// Platform name → URL.
  #[serde(default)]
  pub social_links:  BTreeMap<String, String>,
  pub updated_at:    DateTime<Utc>,
}

impl Portfolio {
  /// The document created when the singleton is first fetched and
  /// nothing exists yet.
  pub fn default_profile() -> Self {
    let skills = [
      ("HTML", 90),
      ("CSS", 85),
      ("JavaScript", 80),
      ("Python", 90),
      ("Django", 80),
    ]
    .into_iter()
    .map(|(name, proficiency)| Skill {
      name: name.to_owned(),
      proficiency,
    })
    .collect();

    Self {
      name:          "Mohammad Ali Khan".to_owned(),
      title:         "Frontend Developer".to_owned(),
      bio:           "Passionate frontend developer with expertise in HTML, CSS, and JavaScript"
        .to_owned(),
      email:         "ali@example.com".to_owned(),
      phone:         None,
      location:      None,
      profile_image: None,
      skills,
      experience:    Vec::new(),
      education:     Vec::new(),
      social_links:  BTreeMap::new(),
      updated_at:    Utc::now(),
    }
  }
}
