//! MedTriage CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive triage session
//! - `ask`      — Triage a single query
//! - `doctor`   — Check config and provider reachability
//! - `onboard`  — Write the default config file
//! - `sources`  — List the trusted sources

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "medtriage",
    about = "MedTriage — AI healthcare triage assistant",
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
    /// Describe your symptoms in an interactive session
    Chat,

    /// Triage a single query and exit
    Ask {
        /// Symptoms or health question
        query: String,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and provider health
    Doctor,

    /// Initialize the configuration file
    Onboard,

    /// List the trusted medical sources
    Sources,
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
        Commands::Chat => commands::chat::run().await?,
        Commands::Ask { query, json } => commands::ask::run(&query, json).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Sources => commands::sources::run().await?,
    }

    Ok(())
}
