use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
  #[error("Request failed: {message}")]
  Http { message: String },

  #[error("Request to {url} failed with status: {status}")]
  Status { status: u16, url: String },

  #[error("Failed to decode response: {message}")]
  Decode { message: String },

  #[error("Character '{id}' not found")]
  NotFound { id: String },

  #[error("All fields are required (missing: {})", missing.join(", "))]
  Validation { missing: Vec<&'static str> },

  #[error("Failed to access {}: {message}", path.display())]
  Storage { path: PathBuf, message: String },

  #[error("Invalid configuration: {message}")]
  Config { message: String },
}

impl RosterError {
  pub fn http(message: impl Into<String>) -> Self {
    Self::Http { message: message.into() }
  }

  pub fn decode(message: impl Into<String>) -> Self {
    Self::Decode { message: message.into() }
  }

  pub fn not_found(id: impl ToString) -> Self {
    Self::NotFound { id: id.to_string() }
  }

  pub fn storage(path: impl Into<PathBuf>, message: impl ToString) -> Self {
    Self::Storage { path: path.into(), message: message.to_string() }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }

  /// True for failures of the remote source itself, as opposed to local problems
  pub fn is_remote(&self) -> bool {
    matches!(self, Self::Http { .. } | Self::Status { .. } | Self::Decode { .. })
  }
}

pub type Result<T> = std::result::Result<T, RosterError>;
