use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::{Character, CharacterPage, Transformation};
use crate::source::{CharacterSource, PlanetPage};
use reqwest::{
  header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
  Client,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Client for the public Dragon Ball REST API
pub struct DragonBallApi {
  client: Client,
  base_url: String,
}

impl DragonBallApi {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = Client::builder()
      .default_headers(headers)
      .timeout(timeout)
      .build()
      .map_err(|e| RosterError::http(format!("failed to build HTTP client: {e}")))?;

    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }

  pub fn from_config(config: &RosterConfig) -> Result<Self> {
    Self::new(config.api_base(), Duration::from_millis(config.timeout_ms))
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| RosterError::config(format!("{raw}: {e}")))?;
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
  }

  /// `characters/{id}` with the id percent-encoded as a single path segment
  fn character_url(&self, id: &str) -> Result<Url> {
    let mut url = self.endpoint("characters", &[])?;
    url
      .path_segments_mut()
      .map_err(|_| RosterError::config(format!("{} cannot hold a path", self.base_url)))?
      .push(id);
    Ok(url)
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
    tracing::debug!(%url, "GET");

    let response = self.client.get(url.clone()).send().await.map_err(|e| {
      if e.is_timeout() {
        RosterError::http(format!("request to {url} timed out"))
      } else {
        RosterError::http(format!("{url}: {e}"))
      }
    })?;

    let status = response.status();
    if !status.is_success() {
      tracing::debug!(%url, status = status.as_u16(), "non-success response");
      return Err(RosterError::Status { status: status.as_u16(), url: url.to_string() });
    }

    response.json::<T>().await.map_err(|e| RosterError::decode(format!("{url}: {e}")))
  }
}

#[async_trait::async_trait]
impl CharacterSource for DragonBallApi {
  async fn fetch_page(&self, page: u32, limit: u32) -> Result<CharacterPage> {
    let url =
      self.endpoint("characters", &[("page", page.to_string()), ("limit", limit.to_string())])?;
    self.get_json(url).await
  }

  async fn fetch_character(&self, id: &str) -> Result<Character> {
    let id = id.trim();
    if matches!(id, "" | "." | "..") {
      return Err(RosterError::not_found(id));
    }
    let url = self.character_url(id)?;
    self.get_json(url).await
  }

  async fn fetch_transformations(&self) -> Result<Vec<Transformation>> {
    let url = self.endpoint("transformations", &[])?;
    self.get_json(url).await
  }

  async fn fetch_planets(&self, page: u32, limit: u32) -> Result<PlanetPage> {
    let url =
      self.endpoint("planets", &[("page", page.to_string()), ("limit", limit.to_string())])?;
    self.get_json(url).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_builds_query() {
    let api = DragonBallApi::new("https://dragonball-api.com/api/", Duration::from_secs(1)).unwrap();
    let url = api
      .endpoint("characters", &[("page", "2".to_string()), ("limit", "25".to_string())])
      .unwrap();
    assert_eq!(url.as_str(), "https://dragonball-api.com/api/characters?page=2&limit=25");
  }

  #[test]
  fn test_endpoint_without_query() {
    let api = DragonBallApi::new("http://localhost:8080/api", Duration::from_secs(1)).unwrap();
    let url = api.endpoint("characters/7", &[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/characters/7");
    assert_eq!(api.base_url(), "http://localhost:8080/api");
  }

  #[test]
  fn test_character_url_encodes_reserved_characters() {
    let api = DragonBallApi::new("http://localhost:8080/api", Duration::from_secs(1)).unwrap();
    let url = |id| api.character_url(id).unwrap().to_string();

    assert_eq!(url("-3"), "http://localhost:8080/api/characters/-3");
    assert_eq!(url("1?junk=2"), "http://localhost:8080/api/characters/1%3Fjunk=2");
    assert_eq!(url("1#x"), "http://localhost:8080/api/characters/1%23x");
    assert_eq!(url("1/../2"), "http://localhost:8080/api/characters/1%2F..%2F2");
  }
}
