//! The list/detail controller: owns the displayed set and dispatches intents to the overlay.

use crate::error::{Result, RosterError};
use crate::merge::{filter_by_name, merge_page};
use crate::model::{Character, CharacterDraft, CharacterId, CharacterPage, CharacterPatch};
use crate::overlay::LocalOverlay;
use crate::source::CharacterSource;

/// Identifies one page load. Only the most recently issued ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
  generation: u64,
  page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
  Idle,
  Loaded,
  Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
  pub character: Character,
  /// False for remote characters, whose edits only live in memory
  pub persisted: bool,
}

pub struct Catalog {
  source: Box<dyn CharacterSource>,
  overlay: LocalOverlay,
  limit: u32,
  page: u32,
  total_pages: u32,
  displayed: Vec<Character>,
  filter: String,
  generation: u64,
  state: LoadState,
}

impl Catalog {
  pub fn new(source: Box<dyn CharacterSource>, overlay: LocalOverlay, limit: u32) -> Self {
    Self {
      source,
      overlay,
      limit: limit.max(1),
      page: 1,
      total_pages: 1,
      displayed: Vec::new(),
      filter: String::new(),
      generation: 0,
      state: LoadState::Idle,
    }
  }

  pub fn source(&self) -> &dyn CharacterSource {
    self.source.as_ref()
  }

  pub fn overlay(&self) -> &LocalOverlay {
    &self.overlay
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn total_pages(&self) -> u32 {
    self.total_pages
  }

  pub fn state(&self) -> &LoadState {
    &self.state
  }

  /// The merged set before filtering
  pub fn displayed(&self) -> &[Character] {
    &self.displayed
  }

  /// The merged set after the name filter
  pub fn visible(&self) -> Vec<&Character> {
    filter_by_name(&self.displayed, &self.filter)
  }

  pub fn filter(&self) -> &str {
    &self.filter
  }

  pub fn set_filter(&mut self, filter: impl Into<String>) {
    self.filter = filter.into();
  }

  /// Start a page load, invalidating any load still in flight
  pub fn begin_load(&mut self, page: u32) -> LoadTicket {
    self.generation += 1;
    LoadTicket { generation: self.generation, page: page.max(1) }
  }

  pub async fn fetch(&self, ticket: LoadTicket) -> Result<CharacterPage> {
    self.source.fetch_page(ticket.page, self.limit).await
  }

  /// Apply a finished load. Returns `Ok(false)` when a newer load has superseded this one.
  pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<CharacterPage>) -> Result<bool> {
    if ticket.generation != self.generation {
      tracing::debug!(
        page = ticket.page,
        generation = ticket.generation,
        latest = self.generation,
        "discarding stale page load"
      );
      return Ok(false);
    }

    let merged = result.and_then(|remote| {
      let deleted = self.overlay.deleted()?;
      let created = self.overlay.created()?;
      Ok((merge_page(remote.items, ticket.page, &deleted, &created), remote.meta))
    });

    let (displayed, meta) = match merged {
      Ok(merged) => merged,
      Err(e) => {
        self.displayed.clear();
        self.state = LoadState::Failed(e.to_string());
        return Err(e);
      }
    };

    self.displayed = displayed;
    self.page = ticket.page;
    self.total_pages = meta.total_pages.max(1);
    self.state = LoadState::Loaded;

    tracing::debug!(page = self.page, shown = self.displayed.len(), "page merged");
    Ok(true)
  }

  pub async fn load_page(&mut self, page: u32) -> Result<()> {
    let ticket = self.begin_load(page);
    let result = self.fetch(ticket).await;
    self.finish_load(ticket, result).map(|_| ())
  }

  pub async fn reload(&mut self) -> Result<()> {
    self.load_page(self.page).await
  }

  /// Move forward one page. Returns false when already on the last page.
  pub async fn next_page(&mut self) -> Result<bool> {
    if self.page >= self.total_pages {
      return Ok(false);
    }
    self.load_page(self.page + 1).await?;
    Ok(true)
  }

  /// Move back one page. Returns false when already on the first page.
  pub async fn prev_page(&mut self) -> Result<bool> {
    if self.page <= 1 {
      return Ok(false);
    }
    self.load_page(self.page - 1).await?;
    Ok(true)
  }

  /// Validate, persist and display a new local character
  pub fn create(&mut self, draft: CharacterDraft) -> Result<Character> {
    draft.validate()?;

    let id = self.overlay.allocate_id()?;
    let character = Character::local(id, draft);
    self.overlay.add_created(character.clone())?;
    self.displayed.insert(0, character.clone());

    tracing::debug!(id, name = %character.name, "created local character");
    Ok(character)
  }

  /// Hide a character everywhere. Confirmation is the caller's job.
  pub fn delete(&mut self, id: CharacterId) -> Result<bool> {
    let newly_deleted = self.overlay.delete(id)?;
    self.displayed.retain(|character| character.id != id);
    Ok(newly_deleted)
  }

  /// Edit a character in the displayed set
  pub fn update(&mut self, id: CharacterId, patch: &CharacterPatch) -> Result<UpdateOutcome> {
    let character = self
      .displayed
      .iter_mut()
      .find(|character| character.id == id)
      .ok_or_else(|| RosterError::not_found(id))?;

    let persisted = apply_update(&self.overlay, character, patch)?;
    Ok(UpdateOutcome { character: character.clone(), persisted })
  }

  /// Resolve a character for the detail view: remote first, then the local creation list
  pub async fn resolve_detail(&self, id: &str) -> Result<Character> {
    resolve_detail(self.source.as_ref(), &self.overlay, id).await
  }
}

/// Apply a patch to a character. Local characters are written back to the overlay;
/// remote ones are only changed in memory. Returns whether the change was persisted.
pub fn apply_update(
  overlay: &LocalOverlay,
  character: &mut Character,
  patch: &CharacterPatch,
) -> Result<bool> {
  patch.apply(character);
  if !character.is_local() {
    return Ok(false);
  }
  overlay.replace_created(character)
}

/// Remote lookup with a single fallback to the local creation list
pub async fn resolve_detail(
  source: &dyn CharacterSource,
  overlay: &LocalOverlay,
  id: &str,
) -> Result<Character> {
  match source.fetch_character(id).await {
    Ok(character) => Ok(character),
    Err(remote_error) => {
      tracing::debug!(id, error = %remote_error, "remote lookup failed, checking local characters");
      overlay.find_created(id)?.ok_or_else(|| RosterError::not_found(id))
    }
  }
}
