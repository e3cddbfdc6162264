use crate::catalog::apply_update;
use crate::commands::{AppContext, CharacterFields};
use crate::display::render_detail;
use crate::output;
use anyhow::{bail, Result};

pub async fn handle(ctx: &AppContext, id: String, fields: CharacterFields) -> Result<()> {
  let patch = fields.into_patch()?;
  if patch.is_empty() {
    bail!("Nothing to update. Pass at least one field, e.g. --name or --ki");
  }

  let catalog = ctx.catalog()?;
  let mut character = catalog.resolve_detail(&id).await?;

  if apply_update(catalog.overlay(), &mut character, &patch)? {
    output::success(&format!("Updated {} ({})", character.name, character.id));
  } else {
    output::warn("Remote characters are read-only: this edit is simulated and will be lost");
  }

  println!("{}", render_detail(&character));
  Ok(())
}
