//! Wayfinder CLI — the main entry point.
//!
//! Commands:
//! - `ask`    — Run the agent on a single travel request
//! - `models` — List known models and aliases
//! - `tools`  — List the built-in tools

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wayfinder",
    about = "Wayfinder — a ReAct travel-assistant agent",
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
    /// Ask the travel assistant a question
    Ask {
        /// The request, e.g. "I'm visiting Beijing tomorrow, what should I see?"
        query: String,

        /// Stream model output fragments as they arrive
        #[arg(short, long)]
        stream: bool,

        /// Override the reasoning iteration budget
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// List available models (remote listing plus local aliases)
    Models,

    /// List the built-in tools
    Tools,
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
        .init();

    match cli.command {
        Commands::Ask {
            query,
            stream,
            max_iterations,
        } => commands::ask::run(query, stream, max_iterations).await?,
        Commands::Models => commands::models::run().await?,
        Commands::Tools => commands::tools_cmd::run().await?,
    }

    Ok(())
}
