use crate::catalog::{apply_update, Catalog};
use crate::commands::{confirm, AppContext};
use crate::display::{render_detail, render_list};
use crate::model::{CharacterDraft, CharacterId, CharacterPatch, Gender};
use crate::output;
use anyhow::Result;
use console::Term;

const HELP: &str = "\
n / p          next / previous page
g <page>       go to a page
/<text>        filter by name (a bare / clears the filter)
s <id>         show a character
c              create a character
e <id>         edit a character
d <id>         delete a character
r              reload the current page
q              quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
  Next,
  Prev,
  Goto(u32),
  Filter(String),
  Show(String),
  Create,
  Edit(String),
  Delete(CharacterId),
  Reload,
  Help,
  Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<BrowseCommand, String> {
  let line = line.trim();
  if let Some(filter) = line.strip_prefix('/') {
    return Ok(BrowseCommand::Filter(filter.trim().to_string()));
  }

  let (verb, arg) = match line.split_once(char::is_whitespace) {
    Some((verb, arg)) => (verb, arg.trim()),
    None => (line, ""),
  };

  let require_arg = |what: &str| {
    if arg.is_empty() {
      Err(format!("'{verb}' needs {what}"))
    } else {
      Ok(arg.to_string())
    }
  };

  match verb {
    "n" | "next" => Ok(BrowseCommand::Next),
    "p" | "prev" => Ok(BrowseCommand::Prev),
    "g" | "goto" => {
      let page = require_arg("a page number")?;
      page.parse().map(BrowseCommand::Goto).map_err(|_| format!("'{page}' is not a page number"))
    }
    "s" | "show" => require_arg("an id").map(BrowseCommand::Show),
    "c" | "create" => Ok(BrowseCommand::Create),
    "e" | "edit" => require_arg("an id").map(BrowseCommand::Edit),
    "d" | "delete" => {
      let id = require_arg("an id")?;
      id.parse().map(BrowseCommand::Delete).map_err(|_| format!("'{id}' is not an id"))
    }
    "r" | "reload" => Ok(BrowseCommand::Reload),
    "h" | "help" | "?" => Ok(BrowseCommand::Help),
    "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
    "" => Err("type h for help".to_string()),
    other => Err(format!("unknown command '{other}', type h for help")),
  }
}

fn print_page(catalog: &Catalog) {
  let visible = catalog.visible();
  println!("{}", render_list(&visible, catalog.page(), catalog.total_pages(), catalog.filter()));
}

fn report_load(result: crate::error::Result<()>) {
  if let Err(e) = result {
    output::error("Failed to load characters");
    tracing::debug!(error = %e, "page load failed");
  }
}

fn ask(term: &Term, label: &str, current: Option<&str>) -> Result<String> {
  match current {
    Some(current) if !current.is_empty() => term.write_str(&format!("{label} [{current}]: "))?,
    _ => term.write_str(&format!("{label}: "))?,
  }
  Ok(term.read_line()?.trim().to_string())
}

fn parse_gender(answer: &str) -> Option<Gender> {
  match answer.to_lowercase().as_str() {
    "" => None,
    other => Some(Gender::from(other.to_string())),
  }
}

fn prompt_draft(term: &Term) -> Result<CharacterDraft> {
  Ok(CharacterDraft {
    name: ask(term, "Name", None)?,
    race: ask(term, "Race", None)?,
    ki: ask(term, "Ki", None)?,
    max_ki: ask(term, "Max ki", None)?,
    gender: parse_gender(&ask(term, "Gender (male/female/unknown)", None)?),
    image: ask(term, "Image URL", None)?,
    description: ask(term, "Description", None)?,
    affiliation: ask(term, "Affiliation", None)?,
    origin_planet: Some(ask(term, "Origin planet", None)?),
  })
}

fn prompt_patch(term: &Term, current: &crate::model::Character) -> Result<CharacterPatch> {
  let keep_or = |answer: String| if answer.is_empty() { None } else { Some(answer) };
  Ok(CharacterPatch {
    name: keep_or(ask(term, "Name", Some(current.name.as_str()))?),
    ki: keep_or(ask(term, "Ki", Some(current.ki.as_str()))?),
    max_ki: keep_or(ask(term, "Max ki", Some(current.max_ki.as_str()))?),
    race: keep_or(ask(term, "Race", Some(current.race.as_str()))?),
    gender: parse_gender(&ask(term, "Gender", Some(current.gender.to_string().as_str()))?),
    description: keep_or(ask(term, "Description", Some(current.description.as_str()))?),
    affiliation: keep_or(ask(term, "Affiliation", Some(current.affiliation.as_str()))?),
    image: keep_or(ask(term, "Image URL", None)?),
    origin_planet: keep_or(ask(term, "Origin planet", current.planet_name())?),
  })
}

async fn edit(catalog: &mut Catalog, term: &Term, id: &str) -> Result<()> {
  let displayed = id
    .parse::<CharacterId>()
    .ok()
    .and_then(|id| catalog.displayed().iter().find(|character| character.id == id).cloned());

  match displayed {
    Some(current) => {
      let patch = prompt_patch(term, &current)?;
      let outcome = catalog.update(current.id, &patch)?;
      report_update(outcome.persisted);
      println!("{}", render_detail(&outcome.character));
    }
    None => {
      let mut character = catalog.resolve_detail(id).await?;
      let patch = prompt_patch(term, &character)?;
      let persisted = apply_update(catalog.overlay(), &mut character, &patch)?;
      report_update(persisted);
      println!("{}", render_detail(&character));
    }
  }
  Ok(())
}

/// Storage failures are reported and the session keeps going
fn delete(catalog: &mut Catalog, id: CharacterId) -> bool {
  match catalog.delete(id) {
    Ok(_) => {
      output::success(&format!("Character {id} deleted (simulated)"));
      true
    }
    Err(e) => {
      output::error(&format!("Could not delete character {id}: {e}"));
      false
    }
  }
}

fn report_update(persisted: bool) {
  if persisted {
    output::success("Character updated");
  } else {
    output::warn("Remote characters are read-only: this edit is simulated and will be lost");
  }
}

async fn run_command(catalog: &mut Catalog, term: &Term, command: BrowseCommand) -> Result<()> {
  match command {
    BrowseCommand::Next => match catalog.next_page().await {
      Ok(true) => {}
      Ok(false) => output::info("Already on the last page"),
      Err(e) => report_load(Err(e)),
    },
    BrowseCommand::Prev => match catalog.prev_page().await {
      Ok(true) => {}
      Ok(false) => output::info("Already on the first page"),
      Err(e) => report_load(Err(e)),
    },
    BrowseCommand::Goto(page) => report_load(catalog.load_page(page).await),
    BrowseCommand::Reload => report_load(catalog.reload().await),
    BrowseCommand::Filter(filter) => catalog.set_filter(filter),
    BrowseCommand::Show(id) => match catalog.resolve_detail(&id).await {
      Ok(character) => println!("{}", render_detail(&character)),
      Err(e) => output::error(&e.to_string()),
    },
    BrowseCommand::Create => match catalog.create(prompt_draft(term)?) {
      Ok(character) => output::success(&format!("Created {} ({})", character.name, character.id)),
      Err(e) => output::error(&e.to_string()),
    },
    BrowseCommand::Edit(id) => {
      if let Err(e) = edit(catalog, term, &id).await {
        output::error(&e.to_string());
      }
    }
    BrowseCommand::Delete(id) => {
      if confirm(&format!("Delete character {id}? (simulated)"), false)? {
        delete(catalog, id);
      }
    }
    BrowseCommand::Help => println!("{HELP}"),
    BrowseCommand::Quit => {}
  }
  Ok(())
}

pub async fn handle(ctx: &AppContext, page: u32, limit: Option<u32>) -> Result<()> {
  let mut catalog = ctx.catalog_with_limit(limit)?;
  let term = Term::stderr();

  output::announce("Roster - type h for help, q to quit");
  report_load(catalog.load_page(page).await);
  print_page(&catalog);

  loop {
    term.write_str("> ")?;
    let line = term.read_line()?;
    let command = match parse_command(&line) {
      Ok(command) => command,
      Err(message) => {
        output::warn(&message);
        continue;
      }
    };

    if command == BrowseCommand::Quit {
      return Ok(());
    }

    let redraw = !matches!(command, BrowseCommand::Show(_) | BrowseCommand::Help);
    run_command(&mut catalog, &term, command).await?;
    if redraw {
      print_page(&catalog);
    }
  }
}
