use crate::commands::AppContext;
use crate::display::render_transformation;
use crate::output;
use anyhow::Result;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  let catalog = ctx.catalog()?;
  let transformations = catalog.source().fetch_transformations().await?;

  output::announce(&format!("{} transformations", transformations.len()));
  for transformation in &transformations {
    println!("{}", render_transformation(transformation));
  }
  Ok(())
}
