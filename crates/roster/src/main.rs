use anyhow::Result;
use clap::{Parser, Subcommand};
use roster::commands::{self, AppContext, CharacterFields};
use roster::config::RosterConfig;
use roster::model::CharacterId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Browse the Dragon Ball character catalog with local create, edit and delete")]
#[command(version)]
struct Cli {
  /// Base URL of the character API
  #[arg(long, env = "ROSTER_API_URL", global = true)]
  api_url: Option<String>,

  /// Directory holding local characters and deletions
  #[arg(long, env = "ROSTER_DIR", global = true)]
  data_dir: Option<PathBuf>,

  /// Request timeout in milliseconds
  #[arg(long, global = true)]
  timeout_ms: Option<u64>,

  /// Configuration file (defaults to .roster.json or roster.json if present)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Print diagnostic logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List one page of characters, local creations first on page 1
  List {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: u32,
    /// Characters per page (1-100)
    #[arg(short, long)]
    limit: Option<u32>,
    /// Only show characters whose name contains this text
    #[arg(short, long)]
    filter: Option<String>,
  },
  /// Show one character, falling back to local characters when the API has no match
  Show {
    /// Character id
    #[arg(allow_hyphen_values = true)]
    id: String,
  },
  /// Create a local character (every field except max ki and origin planet is required)
  Create {
    #[command(flatten)]
    fields: CharacterFields,
  },
  /// Edit a character. Only local characters keep their changes.
  Edit {
    /// Character id
    #[arg(allow_hyphen_values = true)]
    id: String,
    #[command(flatten)]
    fields: CharacterFields,
  },
  /// Hide a character from every view (simulated delete)
  Delete {
    /// Character id
    #[arg(allow_hyphen_values = true)]
    id: CharacterId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },
  /// Interactive browser with paging, filtering and editing
  Browse {
    /// Page to start on
    #[arg(short, long, default_value_t = 1)]
    page: u32,
    /// Characters per page (1-100)
    #[arg(short, long)]
    limit: Option<u32>,
  },
  /// List every transformation known to the API
  Transformations,
  /// List planets
  Planets {
    #[arg(short, long, default_value_t = 1)]
    page: u32,
    #[arg(short, long)]
    limit: Option<u32>,
  },
  /// Show configuration and local overlay statistics
  Status,
  /// Forget all local characters and deletions
  Reset {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },
}

fn load_config(cli: &Cli) -> Result<RosterConfig> {
  let mut config = RosterConfig::load(cli.config.as_deref())?;
  if let Some(api_url) = &cli.api_url {
    config.api_url = api_url.clone();
  }
  if let Some(data_dir) = &cli.data_dir {
    config.data_dir = Some(data_dir.clone());
  }
  if let Some(timeout_ms) = cli.timeout_ms {
    config.timeout_ms = timeout_ms;
  }
  Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  roster::output::init(cli.verbose);

  let ctx = AppContext::new(load_config(&cli)?)?;

  match cli.command {
    Commands::List { page, limit, filter } => {
      commands::list::handle(&ctx, page, limit, filter).await
    }
    Commands::Show { id } => commands::show::handle(&ctx, id).await,
    Commands::Create { fields } => commands::create::handle(&ctx, fields).await,
    Commands::Edit { id, fields } => commands::edit::handle(&ctx, id, fields).await,
    Commands::Delete { id, yes } => commands::delete::handle(&ctx, id, yes).await,
    Commands::Browse { page, limit } => commands::browse::handle(&ctx, page, limit).await,
    Commands::Transformations => commands::transformations::handle(&ctx).await,
    Commands::Planets { page, limit } => commands::planets::handle(&ctx, page, limit).await,
    Commands::Status => commands::status::handle(&ctx).await,
    Commands::Reset { yes } => commands::reset::handle(&ctx, yes).await,
  }
}
