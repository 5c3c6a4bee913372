//! vocaquiz CLI: practise vocabulary in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vocaquiz_core::model::Direction;

mod commands;

#[derive(Parser)]
#[command(name = "vocaquiz", version, about = "Vocabulary quiz for your word lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practise words until you know every one
    Quiz {
        /// Configured source name (see vocaquiz.toml)
        #[arg(long)]
        source: Option<String>,

        /// Practise from a deck file instead of a configured source
        #[arg(long, conflicts_with = "source")]
        deck: Option<PathBuf>,

        /// Only practise words with this tag (id or name)
        #[arg(long)]
        tag: Option<String>,

        /// Translation direction: en-pl or pl-en
        #[arg(long)]
        direction: Option<Direction>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List tags available for --tag
    Tags {
        /// Configured source name
        #[arg(long)]
        source: Option<String>,

        /// Read tags from a deck file
        #[arg(long, conflicts_with = "source")]
        deck: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a deck file
    Validate {
        /// Path to the deck file
        #[arg(long)]
        deck: PathBuf,
    },

    /// Create starter config and example deck
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocaquiz=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            source,
            deck,
            tag,
            direction,
            seed,
            config,
        } => commands::quiz::execute(source, deck, tag, direction, seed, config).await,
        Commands::Tags {
            source,
            deck,
            config,
        } => commands::tags::execute(source, deck, config).await,
        Commands::Validate { deck } => commands::validate::execute(deck),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
