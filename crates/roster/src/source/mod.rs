use crate::config::RosterConfig;
use crate::error::Result;
use crate::model::{Character, CharacterPage, Page, Planet, Transformation};

pub mod http;

pub use http::DragonBallApi;

pub type PlanetPage = Page<Planet>;

/// Read-only provider of character data
#[async_trait::async_trait]
pub trait CharacterSource: Send + Sync {
  /// Fetch one page of characters (pages start at 1)
  async fn fetch_page(&self, page: u32, limit: u32) -> Result<CharacterPage>;

  /// Fetch a single character with its transformations and origin planet
  async fn fetch_character(&self, id: &str) -> Result<Character>;

  /// Fetch every known transformation
  async fn fetch_transformations(&self) -> Result<Vec<Transformation>>;

  /// Fetch one page of planets
  async fn fetch_planets(&self, page: u32, limit: u32) -> Result<PlanetPage>;
}

#[async_trait::async_trait]
impl<T: CharacterSource + ?Sized> CharacterSource for std::sync::Arc<T> {
  async fn fetch_page(&self, page: u32, limit: u32) -> Result<CharacterPage> {
    (**self).fetch_page(page, limit).await
  }

  async fn fetch_character(&self, id: &str) -> Result<Character> {
    (**self).fetch_character(id).await
  }

  async fn fetch_transformations(&self) -> Result<Vec<Transformation>> {
    (**self).fetch_transformations().await
  }

  async fn fetch_planets(&self, page: u32, limit: u32) -> Result<PlanetPage> {
    (**self).fetch_planets(page, limit).await
  }
}

/// Build the HTTP source described by the configuration
pub fn create_source(config: &RosterConfig) -> Result<Box<dyn CharacterSource>> {
  config.validate()?;
  Ok(Box::new(DragonBallApi::from_config(config)?))
}
