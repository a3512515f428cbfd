//! Main entry point for the LinguaFlow CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod server;

use cli::commands::Commands;

/// LinguaFlow - Text translator with language auto-detection
#[derive(Parser, Debug)]
#[command(name = "linguaflow", version, about, long_about = None)]
struct Args {
    /// Translation endpoint override (defaults to TRANSLATE_ENDPOINT env var)
    #[arg(long)]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Override config with CLI args if provided
    if let Some(endpoint) = args.endpoint {
        std::env::set_var("TRANSLATE_ENDPOINT", endpoint);
    }

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            source,
            target,
            yes,
        }) => {
            cli::commands::handle_translate(text, source, target, yes).await?;
        }
        Some(Commands::Languages) => {
            cli::commands::handle_languages().await?;
        }
        Some(Commands::Server { host, port }) => {
            cli::commands::handle_server(host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
