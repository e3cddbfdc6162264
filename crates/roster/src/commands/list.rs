use crate::commands::AppContext;
use crate::display::render_list;
use crate::output;
use anyhow::{anyhow, Result};

pub async fn handle(
  ctx: &AppContext,
  page: u32,
  limit: Option<u32>,
  filter: Option<String>,
) -> Result<()> {
  let mut catalog = ctx.catalog_with_limit(limit)?;
  if let Some(filter) = filter {
    catalog.set_filter(filter);
  }

  if let Err(e) = catalog.load_page(page).await {
    let headline =
      if e.is_remote() { "Failed to load characters" } else { "Failed to read local characters" };
    output::error(headline);
    return Err(anyhow!(e).context(headline));
  }

  let visible = catalog.visible();
  println!("{}", render_list(&visible, catalog.page(), catalog.total_pages(), catalog.filter()));
  Ok(())
}
