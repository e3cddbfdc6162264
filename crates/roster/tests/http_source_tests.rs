use anyhow::Result;
use roster::catalog::resolve_detail;
use roster::model::{Gender, OriginPlanet};
use roster::overlay::LocalOverlay;
use roster::source::{CharacterSource, DragonBallApi};
use roster::{Catalog, RosterError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod api_mock_data {
  use serde_json::{json, Value};

  pub fn character(id: i64, name: &str) -> Value {
    json!({
      "id": id,
      "name": name,
      "ki": "60.000.000",
      "maxKi": "90 Septillion",
      "race": "Saiyan",
      "gender": "Male",
      "description": format!("{name} description"),
      "image": format!("https://dragonball-api.com/characters/{id}.webp"),
      "affiliation": "Z Fighter",
      "deletedAt": null
    })
  }

  pub fn page(items: Vec<Value>, current_page: u32, total_pages: u32) -> Value {
    let item_count = items.len();
    json!({
      "items": items,
      "meta": {
        "totalItems": 58,
        "itemCount": item_count,
        "itemsPerPage": 10,
        "totalPages": total_pages,
        "currentPage": current_page
      },
      "links": {
        "first": "https://dragonball-api.com/api/characters?limit=10",
        "previous": "",
        "next": "https://dragonball-api.com/api/characters?page=2&limit=10",
        "last": "https://dragonball-api.com/api/characters?page=6&limit=10"
      }
    })
  }
}

fn api_for(mock_server: &MockServer) -> Result<DragonBallApi> {
  Ok(DragonBallApi::new(&format!("{}/api", mock_server.uri()), Duration::from_secs(5))?)
}

#[tokio::test]
async fn test_fetch_page_sends_page_and_limit() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters"))
    .and(query_param("page", "2"))
    .and(query_param("limit", "10"))
    .respond_with(ResponseTemplate::new(200).set_body_json(api_mock_data::page(
      vec![api_mock_data::character(11, "Gohan"), api_mock_data::character(12, "Trunks")],
      2,
      6,
    )))
    .expect(1)
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  let page = api.fetch_page(2, 10).await?;

  assert_eq!(page.items.len(), 2);
  assert_eq!(page.items[0].name, "Gohan");
  assert_eq!(page.items[0].max_ki, "90 Septillion");
  assert_eq!(page.items[0].gender, Gender::Male);
  assert!(!page.items[0].is_local());
  assert_eq!(page.meta.total_pages, 6);
  assert_eq!(page.meta.current_page, 2);
  Ok(())
}

#[tokio::test]
async fn test_fetch_character_decodes_planet_and_transformations() -> Result<()> {
  let mock_server = MockServer::start().await;

  let mut body = api_mock_data::character(1, "Goku");
  body["originPlanet"] = json!({
    "id": 3,
    "name": "Vegeta",
    "isDestroyed": true,
    "description": "Home world of the Saiyans",
    "image": "https://dragonball-api.com/planetas/vegeta.webp",
    "deletedAt": null
  });
  body["transformations"] = json!([
    { "id": 1, "name": "Goku SSJ", "image": "https://x/ssj.webp", "ki": "3 Billion", "deletedAt": null }
  ]);

  Mock::given(method("GET"))
    .and(path("/api/characters/1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  let goku = api.fetch_character("1").await?;

  assert_eq!(goku.planet_name(), Some("Vegeta"));
  match &goku.origin_planet {
    Some(OriginPlanet::Planet(planet)) => assert_eq!(planet.is_destroyed, Some(true)),
    other => panic!("Expected a planet object, got: {other:?}"),
  }
  let transformations = goku.transformations.unwrap_or_default();
  assert_eq!(transformations.len(), 1);
  assert_eq!(transformations[0].ki, "3 Billion");
  Ok(())
}

#[tokio::test]
async fn test_fetch_character_not_found_is_status_error() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters/999"))
    .respond_with(ResponseTemplate::new(404).set_body_json(json!({
      "message": "Character not found",
      "error": "Not Found",
      "statusCode": 404
    })))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  match api.fetch_character("999").await {
    Err(RosterError::Status { status, url }) => {
      assert_eq!(status, 404);
      assert!(url.ends_with("/api/characters/999"));
    }
    other => panic!("Expected status error, got: {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_fetch_character_rejects_empty_ids_without_a_request() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  assert!(matches!(api.fetch_character("").await, Err(RosterError::NotFound { .. })));
  assert!(matches!(api.fetch_character("  ").await, Err(RosterError::NotFound { .. })));
  assert!(matches!(api.fetch_character("..").await, Err(RosterError::NotFound { .. })));
  Ok(())
}

#[tokio::test]
async fn test_fetch_character_keeps_reserved_characters_inside_the_id() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters/1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(api_mock_data::character(1, "Goku")))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  assert_eq!(api.fetch_character("1").await?.name, "Goku");

  for id in ["1?junk=2", "1#x", "1/../1"] {
    match api.fetch_character(id).await {
      Err(RosterError::Status { status: 404, .. }) => {}
      other => panic!("Expected 404 for '{id}', got: {other:?}"),
    }
  }

  let overlay = LocalOverlay::in_memory();
  match resolve_detail(&api, &overlay, "1?junk=2").await {
    Err(RosterError::NotFound { id }) => assert_eq!(id, "1?junk=2"),
    other => panic!("Expected NotFound, got: {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_invalid_body_is_decode_error() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  assert!(matches!(api.fetch_page(1, 25).await, Err(RosterError::Decode { .. })));
  Ok(())
}

#[tokio::test]
async fn test_server_error_is_status_error() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;
  let error = api.fetch_page(1, 25).await.unwrap_err();
  assert!(matches!(error, RosterError::Status { status: 503, .. }));
  assert!(error.is_remote());
  Ok(())
}

#[tokio::test]
async fn test_slow_server_times_out() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/transformations"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_secs(2)))
    .mount(&mock_server)
    .await;

  let api = DragonBallApi::new(&format!("{}/api", mock_server.uri()), Duration::from_millis(100))?;
  match api.fetch_transformations().await {
    Err(RosterError::Http { message }) => assert!(message.contains("timed out")),
    other => panic!("Expected timeout, got: {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_fetch_transformations_and_planets() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/transformations"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "id": 1, "name": "Goku SSJ", "image": "https://x/1.webp", "ki": "3 Billion" },
      { "id": 2, "name": "Goku SSJ2", "image": "https://x/2.webp", "ki": "6 Billion" }
    ])))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/api/planets"))
    .and(query_param("page", "1"))
    .and(query_param("limit", "5"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "items": [
        { "id": 1, "name": "Namek", "isDestroyed": true, "description": "Home of the Namekians", "image": "https://x/namek.webp" },
        { "id": 2, "name": "Earth", "isDestroyed": false, "description": "Home of Goku", "image": "https://x/earth.webp" }
      ],
      "meta": { "totalItems": 20, "itemCount": 2, "itemsPerPage": 5, "totalPages": 4, "currentPage": 1 }
    })))
    .mount(&mock_server)
    .await;

  let api = api_for(&mock_server)?;

  let transformations = api.fetch_transformations().await?;
  assert_eq!(transformations.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec![
    "Goku SSJ",
    "Goku SSJ2"
  ]);

  let planets = api.fetch_planets(1, 5).await?;
  assert_eq!(planets.items[0].name, "Namek");
  assert_eq!(planets.items[1].is_destroyed, Some(false));
  assert_eq!(planets.meta.total_pages, 4);
  Ok(())
}

#[tokio::test]
async fn test_catalog_over_http_falls_back_to_local_character() -> Result<()> {
  let mock_server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/api/characters/-1"))
    .respond_with(ResponseTemplate::new(400).set_body_json(json!({
      "message": "Validation failed (numeric string is expected)",
      "statusCode": 400
    })))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/api/characters"))
    .respond_with(ResponseTemplate::new(200).set_body_json(api_mock_data::page(
      vec![api_mock_data::character(1, "Goku")],
      1,
      1,
    )))
    .mount(&mock_server)
    .await;

  let mut catalog = Catalog::new(Box::new(api_for(&mock_server)?), LocalOverlay::in_memory(), 10);
  let videl = catalog.create(roster::CharacterDraft {
    name: "Videl".to_string(),
    race: "Human".to_string(),
    ki: "500".to_string(),
    gender: Some(Gender::Female),
    image: "https://x/videl.webp".to_string(),
    description: "Hercule's daughter".to_string(),
    affiliation: "Z Fighter".to_string(),
    ..Default::default()
  })?;

  catalog.load_page(1).await?;
  assert_eq!(catalog.displayed().iter().map(|c| c.id).collect::<Vec<_>>(), vec![videl.id, 1]);

  let resolved = resolve_detail(catalog.source(), catalog.overlay(), "-1").await?;
  assert_eq!(resolved, videl);
  Ok(())
}
