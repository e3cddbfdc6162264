use crate::error::{Result, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CharacterId = i64;

/// Where a character came from. Remote payloads never carry the tag, so it defaults to `Remote`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
  #[default]
  Remote,
  Local,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum Gender {
  Male,
  Female,
  #[default]
  Unknown,
}

impl From<String> for Gender {
  fn from(value: String) -> Self {
    match value.trim().to_ascii_lowercase().as_str() {
      "male" => Gender::Male,
      "female" => Gender::Female,
      _ => Gender::Unknown,
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Gender::Male => "Male",
      Gender::Female => "Female",
      Gender::Unknown => "Unknown",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_destroyed: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
}

/// Remote characters embed a planet object; local edits only ever store a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginPlanet {
  Planet(Planet),
  Named(String),
}

impl OriginPlanet {
  pub fn name(&self) -> &str {
    match self {
      OriginPlanet::Planet(planet) => &planet.name,
      OriginPlanet::Named(name) => name,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
  pub id: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub ki: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
  pub id: CharacterId,
  pub name: String,
  #[serde(default)]
  pub ki: String,
  #[serde(default)]
  pub max_ki: String,
  #[serde(default)]
  pub race: String,
  #[serde(default)]
  pub gender: Gender,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub affiliation: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub origin_planet: Option<OriginPlanet>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub transformations: Option<Vec<Transformation>>,
  #[serde(default)]
  pub origin: Origin,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

impl Character {
  /// Build a locally created character from a validated draft
  pub fn local(id: CharacterId, draft: CharacterDraft) -> Self {
    Self {
      id,
      name: draft.name.trim().to_string(),
      ki: draft.ki.trim().to_string(),
      max_ki: draft.max_ki.trim().to_string(),
      race: draft.race.trim().to_string(),
      gender: draft.gender.unwrap_or_default(),
      description: draft.description.trim().to_string(),
      image: draft.image.trim().to_string(),
      affiliation: draft.affiliation.trim().to_string(),
      origin_planet: draft
        .origin_planet
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .map(OriginPlanet::Named),
      transformations: None,
      origin: Origin::Local,
      created_at: Some(Utc::now()),
    }
  }

  pub fn is_local(&self) -> bool {
    self.origin == Origin::Local
  }

  pub fn planet_name(&self) -> Option<&str> {
    self.origin_planet.as_ref().map(OriginPlanet::name)
  }
}

/// Form data for a new character. Every text field except `max_ki` and `origin_planet` is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterDraft {
  pub name: String,
  pub race: String,
  pub ki: String,
  pub max_ki: String,
  pub gender: Option<Gender>,
  pub image: String,
  pub description: String,
  pub affiliation: String,
  pub origin_planet: Option<String>,
}

impl CharacterDraft {
  /// Presence check only; no format validation is performed.
  pub fn validate(&self) -> Result<()> {
    let mut missing: Vec<&'static str> = Vec::new();

    for (field, value) in [("name", &self.name), ("race", &self.race), ("ki", &self.ki)] {
      if value.trim().is_empty() {
        missing.push(field);
      }
    }

    if self.gender.is_none() {
      missing.push("gender");
    }

    let rest = [
      ("image", &self.image),
      ("description", &self.description),
      ("affiliation", &self.affiliation),
    ];
    for (field, value) in rest {
      if value.trim().is_empty() {
        missing.push(field);
      }
    }

    if missing.is_empty() {
      Ok(())
    } else {
      Err(RosterError::Validation { missing })
    }
  }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterPatch {
  pub name: Option<String>,
  pub ki: Option<String>,
  pub max_ki: Option<String>,
  pub race: Option<String>,
  pub gender: Option<Gender>,
  pub description: Option<String>,
  pub affiliation: Option<String>,
  pub image: Option<String>,
  pub origin_planet: Option<String>,
}

impl CharacterPatch {
  pub fn is_empty(&self) -> bool {
    *self == CharacterPatch::default()
  }

  pub fn apply(&self, character: &mut Character) {
    let text_updates = [
      (&self.name, &mut character.name),
      (&self.ki, &mut character.ki),
      (&self.max_ki, &mut character.max_ki),
      (&self.race, &mut character.race),
      (&self.description, &mut character.description),
      (&self.affiliation, &mut character.affiliation),
      (&self.image, &mut character.image),
    ];
    for (update, field) in text_updates {
      if let Some(value) = update {
        *field = value.clone();
      }
    }

    if let Some(gender) = self.gender {
      character.gender = gender;
    }
    if let Some(planet) = &self.origin_planet {
      character.origin_planet = Some(OriginPlanet::Named(planet.clone()));
    }
  }
}

/// Pagination metadata returned alongside every page of results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
  #[serde(default)]
  pub total_items: u64,
  #[serde(default)]
  pub item_count: u64,
  #[serde(default)]
  pub items_per_page: u64,
  pub total_pages: u32,
  pub current_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub meta: PageMeta,
}

pub type CharacterPage = Page<Character>;
