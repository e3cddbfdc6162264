use crate::commands::{AppContext, CharacterFields};
use crate::display::render_detail;
use crate::error::RosterError;
use crate::output;
use anyhow::{anyhow, Result};

pub async fn handle(ctx: &AppContext, fields: CharacterFields) -> Result<()> {
  let draft = fields.into_draft()?;
  let mut catalog = ctx.catalog()?;

  let character = match catalog.create(draft) {
    Ok(character) => character,
    Err(e @ RosterError::Validation { .. }) => {
      output::error(&e.to_string());
      return Err(anyhow!("character was not created"));
    }
    Err(e) => return Err(e.into()),
  };

  output::success(&format!("Created {} with id {}", character.name, character.id));
  println!("{}", render_detail(&character));
  Ok(())
}
