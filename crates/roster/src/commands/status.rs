use crate::commands::AppContext;
use crate::output;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySummary {
  pub api_base: String,
  pub page_limit: u32,
  pub location: String,
  pub local_characters: usize,
  pub deleted_characters: usize,
  /// Name and id of the most recently created local character
  pub newest: Option<(String, i64)>,
}

pub fn summarize(ctx: &AppContext) -> Result<OverlaySummary> {
  let overlay = ctx.overlay()?;
  let created = overlay.created()?;

  Ok(OverlaySummary {
    api_base: ctx.config.api_base().to_string(),
    page_limit: ctx.config.effective_page_limit(),
    location: overlay.location(),
    local_characters: created.len(),
    deleted_characters: overlay.deleted()?.len(),
    newest: created.first().map(|character| (character.name.clone(), character.id)),
  })
}

pub async fn handle(ctx: &AppContext) -> Result<()> {
  let summary = summarize(ctx)?;

  output::announce("Roster Status");
  println!("API: {}", summary.api_base);
  println!("Page size: {}", summary.page_limit);
  println!("Data directory: {}", summary.location);
  println!("Local characters: {}", summary.local_characters);
  println!("Deleted characters: {}", summary.deleted_characters);

  if let Some((name, id)) = &summary.newest {
    output::info(&format!("Newest local character: {name} ({id})"));
  }
  Ok(())
}
