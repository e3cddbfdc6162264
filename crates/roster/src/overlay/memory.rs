use crate::error::Result;
use crate::model::{Character, CharacterId};
use crate::overlay::{DeletionSet, OverlayStore};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
  deleted: DeletionSet,
  created: Vec<Character>,
  next_local_id: Option<CharacterId>,
}

/// Overlay kept in process memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryOverlayStore {
  state: Mutex<MemoryState>,
}

impl MemoryOverlayStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_state(deleted: DeletionSet, created: Vec<Character>) -> Self {
    Self { state: Mutex::new(MemoryState { deleted, created, next_local_id: None }) }
  }

  fn state(&self) -> MutexGuard<'_, MemoryState> {
    // State is plain data, so a panic mid-update cannot leave it inconsistent
    self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl OverlayStore for MemoryOverlayStore {
  fn load_deleted(&self) -> Result<DeletionSet> {
    Ok(self.state().deleted.clone())
  }

  fn save_deleted(&self, deleted: &DeletionSet) -> Result<()> {
    self.state().deleted = deleted.clone();
    Ok(())
  }

  fn load_created(&self) -> Result<Vec<Character>> {
    Ok(self.state().created.clone())
  }

  fn save_created(&self, created: &[Character]) -> Result<()> {
    self.state().created = created.to_vec();
    Ok(())
  }

  fn load_next_local_id(&self) -> Result<Option<CharacterId>> {
    Ok(self.state().next_local_id)
  }

  fn save_next_local_id(&self, next: CharacterId) -> Result<()> {
    self.state().next_local_id = Some(next);
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    *self.state() = MemoryState::default();
    Ok(())
  }

  fn location(&self) -> String {
    "in-memory".to_string()
  }
}
