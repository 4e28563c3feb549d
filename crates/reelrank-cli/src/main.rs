use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, list, movie};
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelrank")]
#[command(about = "ReelRank - A local movie catalog and ranked watch lists")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up movies, fetching them from the metadata provider when missing
    Movie {
        #[command(subcommand)]
        cmd: MovieCommands,
    },
    /// Manage a user's ranked watch list
    List {
        #[command(subcommand)]
        cmd: ListCommands,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum MovieCommands {
    /// Show one movie and its team, fetching it on first use
    Get {
        /// Provider id (e.g. tt0133093)
        #[arg(required_unless_present = "title")]
        id: Option<String>,

        /// Exact title, resolved to an id by the provider
        #[arg(long, conflicts_with = "id")]
        title: Option<String>,
    },
    /// Search the local catalog, seeding it from the provider when nothing matches
    #[command(long_about = "Search the local catalog by id, title, genre and type. When nothing matches locally and a title is given, the provider's search results are stored first and the local search is repeated.")]
    Search {
        #[arg(long)]
        id: Option<String>,

        /// Case-insensitive substring of the title
        #[arg(long)]
        title: Option<String>,

        /// Case-insensitive substring of the genre list
        #[arg(long)]
        genre: Option<String>,

        /// movie or series (synonyms such as "film" or "tv" are accepted)
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Show the list in rank order
    Show {
        #[arg(long)]
        user: i64,
    },
    /// Add a movie, appending unless a position is given
    Add {
        #[arg(long)]
        user: i64,

        movie_id: String,

        /// 1-based rank; out-of-range values are clamped
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i64>,
    },
    /// Remove a movie and close the gap
    Remove {
        #[arg(long)]
        user: i64,

        movie_id: String,
    },
    /// Move a movie to a new rank
    Move {
        #[arg(long)]
        user: i64,

        movie_id: String,

        /// 1-based rank; out-of-range values are clamped
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a template config file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movie { cmd } => {
            let app = commands::App::open(config, &paths).await?;
            movie::run_movie(cmd, &app, &output).await
        }
        Commands::List { cmd } => {
            let app = commands::App::open(config, &paths).await?;
            list::run_list(cmd, &app, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &config, &config_path, &output),
    }
}
