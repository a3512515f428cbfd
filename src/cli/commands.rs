//! CLI command definitions and handlers

use clap::Subcommand;
use std::sync::Arc;
use tracing::info;

use crate::core::catalog::LanguageCatalog;
use crate::core::config::AppConfig;
use crate::core::confirm::{AutoConfirm, Confirmer, StdinConfirmer};
use crate::core::models::{TranslationOutcome, TranslationRequest};
use crate::core::orchestrator::Orchestrator;

/// Commands for LinguaFlow
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// Source language display name
        #[arg(short, long, default_value = "Auto Detect")]
        source: String,

        /// Target language display name
        #[arg(long, default_value = "English")]
        target: String,

        /// Accept a detected source language without asking
        #[arg(long)]
        yes: bool,
    },

    /// List supported languages
    Languages,

    /// Start the HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Handle the translate command
pub async fn handle_translate(
    text: String,
    source: String,
    target: String,
    yes: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let confirmer: Arc<dyn Confirmer> = if yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(StdinConfirmer)
    };

    let orchestrator = Orchestrator::from_config(&config, confirmer)?;
    let request = TranslationRequest::new(text, source, target.clone());

    match orchestrator.translate(&request).await {
        Ok(TranslationOutcome::Translated(translated)) => {
            println!("Translation in {}:", target);
            println!("{}", translated);
        }
        Ok(TranslationOutcome::Cancelled) => {
            println!("Translation cancelled.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Handle the languages command
pub async fn handle_languages() -> anyhow::Result<()> {
    let catalog = LanguageCatalog::new();

    for entry in catalog.entries() {
        println!("{} ({})", entry.display_name, entry.code);
    }

    info!("{} languages supported", catalog.len());

    Ok(())
}

/// Handle the server command
pub async fn handle_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    crate::server::api::run_server(host, port, config).await
}
