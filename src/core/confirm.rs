//! User confirmation capability

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// A yes/no gate presented to the user.
///
/// The orchestrator asks exactly once per auto-detected request, before any
/// translation cost is incurred. Injected so surfaces decide how (and
/// whether) to ask.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask the user a yes/no question; `true` means proceed
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Approves every prompt without asking.
///
/// Used by non-interactive surfaces (the HTTP server, `--yes` runs).
#[derive(Debug, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Reads a y/n answer from standard input
#[derive(Debug, Default)]
pub struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = io::stdout();
        let question = format!("{} [y/N]: ", prompt);
        if stdout.write_all(question.as_bytes()).await.is_err() {
            return false;
        }
        if stdout.flush().await.is_err() {
            return false;
        }

        let mut answer = String::new();
        let mut reader = BufReader::new(io::stdin());
        if reader.read_line(&mut answer).await.is_err() {
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
