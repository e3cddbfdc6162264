use crate::commands::{confirm, AppContext};
use crate::model::CharacterId;
use crate::output;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, id: CharacterId, yes: bool) -> Result<()> {
  if !confirm(&format!("Delete character {id}? (simulated)"), yes)? {
    output::info("Cancelled");
    return Ok(());
  }

  let overlay = ctx.overlay()?;
  if overlay.delete(id)? {
    output::success(&format!("Character {id} deleted (simulated)"));
  } else {
    output::info(&format!("Character {id} was already deleted"));
  }
  Ok(())
}
