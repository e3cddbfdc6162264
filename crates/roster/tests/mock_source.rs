use async_trait::async_trait;
use roster::model::{Character, CharacterPage, Gender, Origin, Page, PageMeta, Transformation};
use roster::source::{CharacterSource, PlanetPage};
use roster::{Result, RosterError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// In-memory character source for testing
pub struct MockSource {
  pub pages: HashMap<u32, Vec<Character>>,
  pub total_pages: u32,
  should_fail: AtomicBool,
  page_calls: AtomicU32,
}

impl Default for MockSource {
  fn default() -> Self {
    Self::new()
  }
}

#[allow(dead_code)]
pub fn remote_character(id: i64, name: &str) -> Character {
  Character {
    id,
    name: name.to_string(),
    ki: "1.000".to_string(),
    max_ki: "2.000".to_string(),
    race: "Saiyan".to_string(),
    gender: Gender::Male,
    description: format!("{name} from the API"),
    image: format!("https://dragonball-api.com/characters/{id}.webp"),
    affiliation: "Z Fighter".to_string(),
    origin_planet: None,
    transformations: None,
    origin: Origin::Remote,
    created_at: None,
  }
}

#[allow(dead_code)]
impl MockSource {
  pub fn new() -> Self {
    Self {
      pages: HashMap::new(),
      total_pages: 1,
      should_fail: AtomicBool::new(false),
      page_calls: AtomicU32::new(0),
    }
  }

  /// Two pages: Goku, Vegeta, Piccolo, Bulma, Freezer on page 1; Zarbon, Dodoria on page 2
  pub fn with_test_data() -> Self {
    let mut mock = Self::new();
    mock.pages.insert(
      1,
      vec![
        remote_character(1, "Goku"),
        remote_character(2, "Vegeta"),
        remote_character(3, "Piccolo"),
        remote_character(4, "Bulma"),
        remote_character(5, "Freezer"),
      ],
    );
    mock.pages.insert(2, vec![remote_character(6, "Zarbon"), remote_character(7, "Dodoria")]);
    mock.total_pages = 2;
    mock
  }

  pub fn with_page(page: u32, characters: Vec<Character>) -> Self {
    let mut mock = Self::new();
    mock.pages.insert(page, characters);
    mock.total_pages = page;
    mock
  }

  pub fn set_should_fail(&self, should_fail: bool) {
    self.should_fail.store(should_fail, Ordering::SeqCst);
  }

  pub fn page_calls(&self) -> u32 {
    self.page_calls.load(Ordering::SeqCst)
  }

  fn fail_if_requested(&self) -> Result<()> {
    if self.should_fail.load(Ordering::SeqCst) {
      return Err(RosterError::http("Mock failure"));
    }
    Ok(())
  }
}

#[async_trait]
impl CharacterSource for MockSource {
  async fn fetch_page(&self, page: u32, limit: u32) -> Result<CharacterPage> {
    self.page_calls.fetch_add(1, Ordering::SeqCst);
    self.fail_if_requested()?;

    let items = self.pages.get(&page).cloned().unwrap_or_default();
    Ok(Page {
      meta: PageMeta {
        total_items: self.pages.values().map(|p| p.len() as u64).sum(),
        item_count: items.len() as u64,
        items_per_page: limit as u64,
        total_pages: self.total_pages,
        current_page: page,
      },
      items,
    })
  }

  async fn fetch_character(&self, id: &str) -> Result<Character> {
    self.fail_if_requested()?;

    self
      .pages
      .values()
      .flatten()
      .find(|character| character.id.to_string() == id)
      .cloned()
      .ok_or_else(|| RosterError::Status { status: 404, url: format!("/characters/{id}") })
  }

  async fn fetch_transformations(&self) -> Result<Vec<Transformation>> {
    self.fail_if_requested()?;
    Ok(vec![Transformation {
      id: 1,
      name: "Goku SSJ".to_string(),
      image: String::new(),
      ki: "3 Billion".to_string(),
    }])
  }

  async fn fetch_planets(&self, page: u32, limit: u32) -> Result<PlanetPage> {
    self.fail_if_requested()?;
    Ok(Page {
      items: vec![],
      meta: PageMeta {
        total_items: 0,
        item_count: 0,
        items_per_page: limit as u64,
        total_pages: 1,
        current_page: page,
      },
    })
  }
}
