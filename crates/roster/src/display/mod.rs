use crate::model::{Character, Planet, Transformation};
use colored::*;
use console::{pad_str, Alignment};

const ID_WIDTH: usize = 6;
const NAME_WIDTH: usize = 22;
const RACE_WIDTH: usize = 14;
const GENDER_WIDTH: usize = 8;
const KI_WIDTH: usize = 18;
const AFFILIATION_WIDTH: usize = 18;

fn cell(text: &str, width: usize) -> String {
  pad_str(text, width, Alignment::Left, Some("…")).into_owned()
}

/// Shorten embedded images so a data URI does not flood the terminal
pub fn describe_image(image: &str) -> String {
  match image.strip_prefix("data:") {
    Some(rest) => {
      let mime = rest.split([';', ',']).next().unwrap_or("unknown");
      format!("embedded {mime} ({} bytes)", image.len())
    }
    None => image.to_string(),
  }
}

pub fn table_header() -> String {
  format!(
    "{} {} {} {} {} {}",
    cell("ID", ID_WIDTH),
    cell("NAME", NAME_WIDTH),
    cell("RACE", RACE_WIDTH),
    cell("GENDER", GENDER_WIDTH),
    cell("KI", KI_WIDTH),
    cell("AFFILIATION", AFFILIATION_WIDTH),
  )
}

pub fn table_row(character: &Character) -> String {
  let row = format!(
    "{} {} {} {} {} {}",
    cell(&character.id.to_string(), ID_WIDTH),
    cell(&character.name, NAME_WIDTH),
    cell(&character.race, RACE_WIDTH),
    cell(&character.gender.to_string(), GENDER_WIDTH),
    cell(&character.ki, KI_WIDTH),
    cell(&character.affiliation, AFFILIATION_WIDTH),
  );
  if character.is_local() {
    format!("{} {}", row, "(local)".cyan())
  } else {
    row
  }
}

/// Render the list view: table, pagination footer and an empty-state message
pub fn render_list(characters: &[&Character], page: u32, total_pages: u32, filter: &str) -> String {
  let mut lines = vec![table_header().bold().to_string()];

  if characters.is_empty() {
    if filter.is_empty() {
      lines.push("No characters available".to_string());
    } else {
      lines.push(format!("No characters match '{filter}'"));
    }
  } else {
    lines.extend(characters.iter().map(|character| table_row(character)));
  }

  lines.push(String::new());
  let mut footer = format!("Page {page} of {total_pages}");
  if !filter.is_empty() {
    footer.push_str(&format!(" | filter: '{filter}'"));
  }
  lines.push(footer.dimmed().to_string());
  lines.join("\n")
}

fn field(label: &str, value: &str) -> String {
  let value = if value.is_empty() { "-" } else { value };
  format!("{:<14} {}", format!("{label}:").bold(), value)
}

pub fn render_transformation(transformation: &Transformation) -> String {
  format!(
    "  - {} (ki: {}) {}",
    transformation.name,
    if transformation.ki.is_empty() { "-" } else { transformation.ki.as_str() },
    describe_image(&transformation.image).dimmed()
  )
}

/// Render the detail view of one character
pub fn render_detail(character: &Character) -> String {
  let origin = if character.is_local() { "local" } else { "remote" };
  let mut lines = vec![
    format!("{} #{} ({origin})", character.name.bold(), character.id),
    field("Race", &character.race),
    field("Gender", &character.gender.to_string()),
    field("Ki", &character.ki),
    field("Max ki", &character.max_ki),
    field("Affiliation", &character.affiliation),
    field("Origin planet", character.planet_name().unwrap_or_default()),
    field("Image", &describe_image(&character.image)),
  ];

  if let Some(created_at) = character.created_at {
    lines.push(field("Created", &created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()));
  }

  lines.push(String::new());
  lines.push(if character.description.is_empty() {
    "No description".dimmed().to_string()
  } else {
    character.description.clone()
  });

  if let Some(transformations) = character.transformations.as_ref().filter(|t| !t.is_empty()) {
    lines.push(String::new());
    lines.push("Transformations:".bold().to_string());
    lines.extend(transformations.iter().map(render_transformation));
  }

  lines.join("\n")
}

pub fn render_planet(planet: &Planet) -> String {
  let status = match planet.is_destroyed {
    Some(true) => "destroyed",
    Some(false) => "intact",
    None => "unknown",
  };
  let id = planet.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
  format!("{} {} {}", cell(&id, ID_WIDTH), cell(&planet.name, NAME_WIDTH), status)
}
