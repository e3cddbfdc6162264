use crate::catalog::Catalog;
use crate::config::RosterConfig;
use crate::model::{CharacterDraft, CharacterPatch, Gender};
use crate::overlay::{FileOverlayStore, LocalOverlay};
use crate::source::create_source;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use console::Term;
use std::path::Path;

pub mod browse;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod planets;
pub mod reset;
pub mod show;
pub mod status;
pub mod transformations;

/// Everything a command needs to build its catalog
pub struct AppContext {
  pub config: RosterConfig,
}

impl AppContext {
  pub fn new(config: RosterConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn overlay(&self) -> Result<LocalOverlay> {
    let store = FileOverlayStore::new(self.config.data_dir())?;
    Ok(LocalOverlay::new(Box::new(store)))
  }

  pub fn catalog(&self) -> Result<Catalog> {
    self.catalog_with_limit(None)
  }

  pub fn catalog_with_limit(&self, limit: Option<u32>) -> Result<Catalog> {
    let source = create_source(&self.config)?;
    let limit = limit.map(|limit| limit.clamp(1, crate::config::MAX_PAGE_LIMIT));
    Ok(Catalog::new(source, self.overlay()?, limit.unwrap_or(self.config.effective_page_limit())))
  }
}

/// Ask a yes/no question on the terminal. Anything but an explicit yes is a no.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
  if assume_yes {
    return Ok(true);
  }
  let term = Term::stderr();
  term.write_str(&format!("{prompt} [y/N] "))?;
  let answer = term.read_line()?;
  Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

/// Read a local image and embed it as a base64 data URI
pub fn image_data_uri(path: &Path) -> Result<String> {
  let bytes = std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
  let extension =
    path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).unwrap_or_default();
  let mime = match extension.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "webp" => "image/webp",
    "gif" => "image/gif",
    "svg" => "image/svg+xml",
    other => {
      return Err(anyhow!("Unsupported image type '{other}': use png, jpg, webp, gif or svg"))
    }
  };
  Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Field values shared by `create` and `edit`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CharacterFields {
  /// Character name
  #[arg(long)]
  pub name: Option<String>,
  /// Race (e.g. Saiyan, Namekian)
  #[arg(long)]
  pub race: Option<String>,
  /// Ki level, free-form
  #[arg(long)]
  pub ki: Option<String>,
  /// Maximum ki level, free-form
  #[arg(long)]
  pub max_ki: Option<String>,
  /// Gender
  #[arg(long, value_enum)]
  pub gender: Option<Gender>,
  /// Image URL
  #[arg(long, conflicts_with = "image_file")]
  pub image: Option<String>,
  /// Local image file, embedded as a data URI
  #[arg(long)]
  pub image_file: Option<std::path::PathBuf>,
  /// Description
  #[arg(long)]
  pub description: Option<String>,
  /// Affiliation (e.g. Z Fighter)
  #[arg(long)]
  pub affiliation: Option<String>,
  /// Origin planet name
  #[arg(long)]
  pub origin_planet: Option<String>,
}

impl CharacterFields {
  fn resolved_image(&self) -> Result<Option<String>> {
    match &self.image_file {
      Some(path) => image_data_uri(path).map(Some),
      None => Ok(self.image.clone()),
    }
  }

  pub fn into_draft(self) -> Result<CharacterDraft> {
    let image = self.resolved_image()?.unwrap_or_default();
    Ok(CharacterDraft {
      name: self.name.unwrap_or_default(),
      race: self.race.unwrap_or_default(),
      ki: self.ki.unwrap_or_default(),
      max_ki: self.max_ki.unwrap_or_default(),
      gender: self.gender,
      image,
      description: self.description.unwrap_or_default(),
      affiliation: self.affiliation.unwrap_or_default(),
      origin_planet: self.origin_planet,
    })
  }

  pub fn into_patch(self) -> Result<CharacterPatch> {
    let image = self.resolved_image()?;
    Ok(CharacterPatch {
      name: self.name,
      ki: self.ki,
      max_ki: self.max_ki,
      race: self.race,
      gender: self.gender,
      description: self.description,
      affiliation: self.affiliation,
      image,
      origin_planet: self.origin_planet,
    })
  }
}
