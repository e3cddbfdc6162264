use crate::commands::{confirm, AppContext};
use crate::output;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, yes: bool) -> Result<()> {
  let overlay = ctx.overlay()?;
  let created = overlay.created()?.len();
  let deleted = overlay.deleted()?.len();

  let prompt = format!(
    "Forget {created} local character(s) and restore {deleted} deleted character(s)?"
  );
  if !confirm(&prompt, yes)? {
    output::info("Cancelled");
    return Ok(());
  }

  overlay.reset()?;
  output::success(&format!("Local overlay cleared ({})", overlay.location()));
  Ok(())
}
