//! Translation provider capability and its HTTP implementation

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::config::AppConfig;
use crate::core::errors::{Result, TranslateError};

/// External translation capability.
///
/// All failures surface as a single provider-error class; retries, if any,
/// belong to the implementation, never to the orchestrator.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate text from `source_code` to `target_code`
    async fn translate(&self, text: &str, source_code: &str, target_code: &str)
        -> Result<String>;
}

/// Translation client for the web Google Translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleWebTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleWebTranslator {
    /// Create a new translator from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
        })
    }
}

/// Extract the translated text from the endpoint's nested-array response:
/// `[[["Translated segment", "Original segment", ...], ...], ...]`
fn parse_translation(json: &serde_json::Value) -> Result<String> {
    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::Provider {
            message: "unexpected response format".to_string(),
        })?;

    let mut translated = String::new();
    for sentence in sentences {
        if let Some(segment) = sentence.get(0).and_then(|v| v.as_str()) {
            translated.push_str(segment);
        }
    }

    if translated.is_empty() {
        return Err(TranslateError::Provider {
            message: "no translation in response".to_string(),
        });
    }

    Ok(translated)
}

#[async_trait]
impl TranslationProvider for GoogleWebTranslator {
    async fn translate(
        &self,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> Result<String> {
        let url = format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            source_code,
            target_code,
            urlencoding::encode(text)
        );

        debug!("requesting translation {} -> {}", source_code, target_code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranslateError::Provider {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Provider {
                message: format!("service returned {}", status),
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| TranslateError::Provider {
                    message: format!("failed to parse response: {}", e),
                })?;

        parse_translation(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_sentence() {
        let json = json!([[["Hello world", "Bonjour le monde", null, null]]]);

        assert_eq!(parse_translation(&json).unwrap(), "Hello world");
    }

    #[test]
    fn test_parse_joins_multiple_segments() {
        let json = json!([[
            ["Hello. ", "Bonjour. ", null],
            ["How are you?", "Comment ça va ?", null]
        ]]);

        assert_eq!(parse_translation(&json).unwrap(), "Hello. How are you?");
    }

    #[test]
    fn test_parse_rejects_malformed_response() {
        let json = json!({"error": "bad request"});

        assert!(parse_translation(&json).is_err());
    }

    #[test]
    fn test_translator_creation() {
        let config = AppConfig::default();
        let translator = GoogleWebTranslator::new(&config);

        assert!(translator.is_ok());
    }
}
