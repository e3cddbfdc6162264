pub mod catalog;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod merge;
pub mod model;
pub mod output;
pub mod overlay;
pub mod source;

// Re-export commonly used types for easier testing
pub use catalog::{Catalog, LoadState, LoadTicket, UpdateOutcome};
pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use model::{Character, CharacterDraft, CharacterPatch, Gender, Origin};
pub use overlay::{DeletionSet, LocalOverlay, OverlayStore};
pub use source::CharacterSource;
