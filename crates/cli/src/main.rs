//! Kioku CLI — the main entry point.
//!
//! Commands:
//! - `analyze`  — Classify the emotion of a message
//! - `feedback` — Detect recall feedback in a message
//! - `search`   — Search a memory snapshot with a query vector
//! - `replay`   — Drive working memory through a scripted conversation
//! - `config`   — Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "kioku",
    about = "Kioku — two-tier conversational memory",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the emotion of a message
    Analyze {
        /// The message text
        text: String,

        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect accuracy feedback in a message
    Feedback {
        /// The message text
        text: String,
    },

    /// Search a JSON memory snapshot
    Search(commands::search::SearchArgs),

    /// Replay a scripted conversation through working memory
    Replay {
        /// JSON script with initial items and turns
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Show the effective configuration as TOML
    Config {
        /// Print built-in defaults instead of the loaded configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze { text, json } => commands::affect::analyze(&text, json).await?,
        Commands::Feedback { text } => commands::affect::feedback(&text).await?,
        Commands::Search(args) => commands::search::run(args).await?,
        Commands::Replay { script } => commands::replay::run(&script).await?,
        Commands::Config { default } => commands::config_cmd::show(default).await?,
    }

    Ok(())
}
