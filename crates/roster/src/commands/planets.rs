use crate::commands::AppContext;
use crate::config::MAX_PAGE_LIMIT;
use crate::display::render_planet;
use crate::output;
use anyhow::Result;

pub async fn handle(ctx: &AppContext, page: u32, limit: Option<u32>) -> Result<()> {
  let catalog = ctx.catalog()?;
  let limit = limit.unwrap_or(ctx.config.effective_page_limit()).clamp(1, MAX_PAGE_LIMIT);
  let planets = catalog.source().fetch_planets(page.max(1), limit).await?;

  output::announce(&format!(
    "Planets - page {} of {}",
    planets.meta.current_page, planets.meta.total_pages
  ));
  for planet in &planets.items {
    println!("{}", render_planet(planet));
  }
  Ok(())
}
