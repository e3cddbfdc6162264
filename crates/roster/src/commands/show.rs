use crate::commands::AppContext;
use crate::display::render_detail;
use crate::error::RosterError;
use crate::output;
use anyhow::{anyhow, Result};

pub async fn handle(ctx: &AppContext, id: String) -> Result<()> {
  let catalog = ctx.catalog()?;

  let character = match catalog.resolve_detail(&id).await {
    Ok(character) => character,
    Err(RosterError::NotFound { .. }) => {
      output::error(&format!("Character {id} not found"));
      return Err(anyhow!("character not found"));
    }
    Err(e) => return Err(e.into()),
  };

  if catalog.overlay().is_deleted(character.id)? {
    output::warn("This character is deleted and hidden from the list");
  }

  println!("{}", render_detail(&character));
  Ok(())
}
