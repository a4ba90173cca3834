use std::path::PathBuf;

use clap::Parser;
use itemdesk_core::{Config, ItemId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "itemdesk")]
#[command(version, about = "Manage categorized items on a REST backend", long_about = None)]
struct Cli {
    /// Items endpoint, e.g. http://127.0.0.1:8000/api/items/
    #[arg(long, global = true, env = "ITEMDESK_API_URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List items grouped by category
    List {
        /// Only show items whose name or category contains this (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Let the server narrow the list down before filtering
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add a new item
    Add { name: String, category: String },
    /// Replace an item's name and category
    Update {
        #[arg(allow_negative_numbers = true)]
        id: ItemId,
        name: String,
        category: String,
    },
    /// Delete an item
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: ItemId,
    },
    /// Interactive terminal UI (default)
    Tui,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so stay quiet there unless RUST_LOG asks otherwise
    let default_filter = match cli.command {
        None | Some(Commands::Tui) => "off",
        _ => "itemdesk=info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = commands::load_config(&config_path, cli.api_url)?;

    match cli.command {
        Some(Commands::List {
            filter,
            search,
            json,
        }) => commands::list(&config, filter, search, json).await,
        Some(Commands::Add { name, category }) => commands::add(&config, &name, &category).await,
        Some(Commands::Update { id, name, category }) => {
            commands::update(&config, id, &name, &category).await
        }
        Some(Commands::Delete { id }) => commands::delete(&config, id).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::show_config(&config),
            ConfigAction::Init { force } => commands::init_config(&config, &config_path, force),
        },
        Some(Commands::Tui) | None => commands::tui(&config).await,
    }
}
