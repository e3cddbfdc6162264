use crate::error::{Result, RosterError};
use crate::model::{Character, CharacterId};
use crate::overlay::{DeletionSet, OverlayStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DELETED_FILE: &str = "deleted.json";
const CREATED_FILE: &str = "created.json";
const COUNTER_FILE: &str = "counter.json";

#[derive(Debug, Serialize, Deserialize)]
struct Counter {
  next_local_id: CharacterId,
}

/// Overlay persisted as pretty-printed JSON files in a single directory
pub struct FileOverlayStore {
  dir: PathBuf,
}

impl FileOverlayStore {
  pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).map_err(|e| RosterError::storage(&dir, e))?;
    Ok(Self { dir })
  }

  fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
    let path = self.dir.join(name);
    if !path.exists() {
      return Ok(None);
    }

    let json = std::fs::read_to_string(&path).map_err(|e| RosterError::storage(&path, e))?;
    if json.trim().is_empty() {
      return Ok(None);
    }
    let value = serde_json::from_str(&json).map_err(|e| RosterError::storage(&path, e))?;
    Ok(Some(value))
  }

  fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
    let path = self.dir.join(name);
    let json = serde_json::to_string_pretty(value).map_err(|e| RosterError::storage(&path, e))?;

    // Write beside the target and rename so a crash never leaves half a file behind
    let staging = self.dir.join(format!(".{name}.tmp"));
    std::fs::write(&staging, json).map_err(|e| RosterError::storage(&staging, e))?;
    std::fs::rename(&staging, &path).map_err(|e| RosterError::storage(&path, e))?;

    tracing::debug!(path = %path.display(), "saved overlay state");
    Ok(())
  }

  fn remove(&self, name: &str) -> Result<()> {
    let path = self.dir.join(name);
    if path.exists() {
      std::fs::remove_file(&path).map_err(|e| RosterError::storage(&path, e))?;
    }
    Ok(())
  }
}

impl OverlayStore for FileOverlayStore {
  fn load_deleted(&self) -> Result<DeletionSet> {
    Ok(self.read(DELETED_FILE)?.unwrap_or_default())
  }

  fn save_deleted(&self, deleted: &DeletionSet) -> Result<()> {
    self.write(DELETED_FILE, deleted)
  }

  fn load_created(&self) -> Result<Vec<Character>> {
    Ok(self.read(CREATED_FILE)?.unwrap_or_default())
  }

  fn save_created(&self, created: &[Character]) -> Result<()> {
    self.write(CREATED_FILE, created)
  }

  fn load_next_local_id(&self) -> Result<Option<CharacterId>> {
    Ok(self.read::<Counter>(COUNTER_FILE)?.map(|counter| counter.next_local_id))
  }

  fn save_next_local_id(&self, next: CharacterId) -> Result<()> {
    self.write(COUNTER_FILE, &Counter { next_local_id: next })
  }

  fn clear(&self) -> Result<()> {
    for name in [DELETED_FILE, CREATED_FILE, COUNTER_FILE] {
      self.remove(name)?;
    }
    Ok(())
  }

  fn location(&self) -> String {
    self.dir.display().to_string()
  }
}
