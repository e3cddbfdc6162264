use crate::error::{Result, RosterError};
use crate::model::{Character, CharacterId, Origin};
use serde::{Deserialize, Serialize};

pub mod file;
pub mod memory;

pub use file::FileOverlayStore;
pub use memory::MemoryOverlayStore;

/// First id handed out to a locally created character. Local ids count downwards from here.
pub const FIRST_LOCAL_ID: CharacterId = -1;

/// Identifiers hidden from every view, in the order they were deleted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeletionSet(Vec<CharacterId>);

impl DeletionSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns false if the id was already present
  pub fn insert(&mut self, id: CharacterId) -> bool {
    if self.contains(id) {
      return false;
    }
    self.0.push(id);
    true
  }

  pub fn contains(&self, id: CharacterId) -> bool {
    self.0.contains(&id)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = CharacterId> + '_ {
    self.0.iter().copied()
  }
}

impl FromIterator<CharacterId> for DeletionSet {
  fn from_iter<I: IntoIterator<Item = CharacterId>>(iter: I) -> Self {
    let mut set = DeletionSet::new();
    for id in iter {
      set.insert(id);
    }
    set
  }
}

/// Typed persistence for the local overlay
pub trait OverlayStore: Send + Sync {
  fn load_deleted(&self) -> Result<DeletionSet>;
  fn save_deleted(&self, deleted: &DeletionSet) -> Result<()>;

  /// Locally created characters, newest first
  fn load_created(&self) -> Result<Vec<Character>>;
  fn save_created(&self, created: &[Character]) -> Result<()>;

  /// Next id to hand out, if one has ever been persisted
  fn load_next_local_id(&self) -> Result<Option<CharacterId>>;
  fn save_next_local_id(&self, next: CharacterId) -> Result<()>;

  /// Remove every piece of overlay state
  fn clear(&self) -> Result<()>;

  /// Human readable description of where the state lives
  fn location(&self) -> String;
}

/// Overlay operations shared by every view, on top of a store
pub struct LocalOverlay {
  store: Box<dyn OverlayStore>,
}

impl LocalOverlay {
  pub fn new(store: Box<dyn OverlayStore>) -> Self {
    Self { store }
  }

  pub fn in_memory() -> Self {
    Self::new(Box::new(MemoryOverlayStore::new()))
  }

  pub fn location(&self) -> String {
    self.store.location()
  }

  pub fn deleted(&self) -> Result<DeletionSet> {
    self.store.load_deleted()
  }

  pub fn created(&self) -> Result<Vec<Character>> {
    let mut created = self.store.load_created()?;
    for character in &mut created {
      character.origin = Origin::Local;
    }
    Ok(created)
  }

  pub fn is_deleted(&self, id: CharacterId) -> Result<bool> {
    Ok(self.deleted()?.contains(id))
  }

  /// Look up a created character by id, comparing the textual form of the id
  pub fn find_created(&self, id: &str) -> Result<Option<Character>> {
    let id = id.trim();
    Ok(self.created()?.into_iter().find(|character| character.id.to_string() == id))
  }

  /// Reserve the next local id. Ids never repeat, even after the character is deleted.
  pub fn allocate_id(&self) -> Result<CharacterId> {
    let stored = self.store.load_next_local_id()?.unwrap_or(FIRST_LOCAL_ID);
    let lowest_known = self
      .created()?
      .iter()
      .map(|character| character.id)
      .chain(self.deleted()?.iter())
      .filter(|id| *id <= 0)
      .min();

    let exhausted = || RosterError::storage(self.location(), "local id counter is exhausted");
    let id = match lowest_known {
      Some(lowest) => stored.min(lowest.checked_sub(1).ok_or_else(exhausted)?),
      None => stored,
    };
    let next = id.checked_sub(1).ok_or_else(exhausted)?;
    self.store.save_next_local_id(next)?;
    Ok(id)
  }

  /// Prepend a freshly created character
  pub fn add_created(&self, character: Character) -> Result<()> {
    let mut created = self.created()?;
    created.insert(0, character);
    self.store.save_created(&created)
  }

  /// Replace a created character by id. Returns false if no created character has that id.
  pub fn replace_created(&self, character: &Character) -> Result<bool> {
    let mut created = self.created()?;
    match created.iter_mut().find(|existing| existing.id == character.id) {
      Some(existing) => {
        *existing = Character { origin: Origin::Local, ..character.clone() };
        self.store.save_created(&created)?;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  /// Hide an id everywhere and drop it from the creation list.
  /// Returns whether the id was newly added to the deletion set.
  pub fn delete(&self, id: CharacterId) -> Result<bool> {
    let mut deleted = self.deleted()?;
    let newly_deleted = deleted.insert(id);
    if newly_deleted {
      self.store.save_deleted(&deleted)?;
    }

    let mut created = self.created()?;
    let before = created.len();
    created.retain(|character| character.id != id);
    if created.len() != before {
      self.store.save_created(&created)?;
    }

    let removed_local = before != created.len();
    tracing::debug!(id, newly_deleted, removed_local, "deleted character");
    Ok(newly_deleted)
  }

  pub fn reset(&self) -> Result<()> {
    self.store.clear()
  }
}
