//! Configuration management for Roster
//!
//! Settings come from a JSON file (explicit path, or `.roster.json` / `roster.json`
//! in the working directory) and fall back to defaults. Command line flags are
//! layered on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Result, RosterError};

pub const DEFAULT_API_URL: &str = "https://dragonball-api.com/api";
pub const DEFAULT_PAGE_LIMIT: u32 = 25;
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable that relocates the overlay data directory
pub const DATA_DIR_ENV: &str = "ROSTER_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
  /// Base URL of the character API, without a trailing slash
  #[serde(default = "default_api_url")]
  pub api_url: String,
  /// Characters requested per page
  #[serde(default = "default_page_limit")]
  pub page_limit: u32,
  /// Request timeout in milliseconds
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  /// Where the local overlay is stored
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}
fn default_page_limit() -> u32 {
  DEFAULT_PAGE_LIMIT
}
fn default_timeout_ms() -> u64 {
  DEFAULT_TIMEOUT_MS
}

impl Default for RosterConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      page_limit: default_page_limit(),
      timeout_ms: default_timeout_ms(),
      data_dir: None,
    }
  }
}

impl RosterConfig {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::storage(path, e))?;
    serde_json::from_str(&content)
      .map_err(|e| RosterError::config(format!("{}: {e}", path.display())))
  }

  /// Load an explicit file, or the first config file found in the current directory, or defaults
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    for candidate in [".roster.json", "roster.json"] {
      if Path::new(candidate).exists() {
        return Self::load_from_file(candidate);
      }
    }

    Ok(Self::default())
  }

  pub fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.api_url)
      .map_err(|e| RosterError::config(format!("api_url '{}': {e}", self.api_url)))?;
    if !matches!(url.scheme(), "http" | "https") {
      return Err(RosterError::config(format!("api_url must be http(s), got '{}'", url.scheme())));
    }
    if self.timeout_ms == 0 {
      return Err(RosterError::config("timeout_ms must be greater than zero"));
    }
    Ok(())
  }

  /// Page size clamped to what the API accepts
  pub fn effective_page_limit(&self) -> u32 {
    self.page_limit.clamp(1, MAX_PAGE_LIMIT)
  }

  pub fn api_base(&self) -> &str {
    self.api_url.trim_end_matches('/')
  }

  pub fn data_dir(&self) -> PathBuf {
    if let Some(dir) = &self.data_dir {
      return dir.clone();
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
      if !dir.is_empty() {
        return PathBuf::from(dir);
      }
    }
    dirs::data_dir().map(|dir| dir.join("roster")).unwrap_or_else(|| PathBuf::from(".roster"))
  }
}
