//! Configuration management

use serde::{Deserialize, Serialize};

/// Configuration for the translation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Translation service endpoint
    pub api_endpoint: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum number of history records to keep; unbounded when unset
    pub max_history: Option<usize>,
}

/// Default translation endpoint (web Google Translate)
const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 30000,
            max_history: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_endpoint = std::env::var("TRANSLATE_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let max_history = match std::env::var("MAX_HISTORY") {
            Ok(value) => Some(value.parse::<usize>()?),
            Err(_) => None,
        };

        Ok(Self {
            api_endpoint,
            timeout_ms,
            max_history,
        })
    }

    /// Load and validate configuration
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("translation endpoint is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.max_history == Some(0) {
            return Err(anyhow::anyhow!("max_history must be greater than 0 when set"));
        }

        Ok(())
    }
}
