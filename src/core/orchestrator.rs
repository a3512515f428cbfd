//! Translation request orchestration

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::catalog::LanguageCatalog;
use crate::core::config::AppConfig;
use crate::core::confirm::Confirmer;
use crate::core::detect::{LanguageDetector, WhatlangDetector};
use crate::core::errors::{LanguageRole, Result, TranslateError};
use crate::core::history::HistoryLog;
use crate::core::models::{
    HistoryRecord, ResolvedLanguages, TranslationOutcome, TranslationRequest,
};
use crate::core::provider::{GoogleWebTranslator, TranslationProvider};

/// Coordinates catalog lookups, language detection, the confirmation gate,
/// the translation call, and the history log for one user-initiated request
/// at a time.
///
/// Owns the session's history log; display surfaces observe it through
/// [`Orchestrator::history`] and hand requests in as plain values.
pub struct Orchestrator {
    catalog: LanguageCatalog,
    detector: Arc<dyn LanguageDetector>,
    provider: Arc<dyn TranslationProvider>,
    confirmer: Arc<dyn Confirmer>,
    history: HistoryLog,
    in_flight: Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        catalog: LanguageCatalog,
        detector: Arc<dyn LanguageDetector>,
        provider: Arc<dyn TranslationProvider>,
        confirmer: Arc<dyn Confirmer>,
        history: HistoryLog,
    ) -> Self {
        Self {
            catalog,
            detector,
            provider,
            confirmer,
            history,
            in_flight: Mutex::new(()),
        }
    }

    /// Build an orchestrator with the shipped detector and provider
    pub fn from_config(config: &AppConfig, confirmer: Arc<dyn Confirmer>) -> Result<Self> {
        let provider = GoogleWebTranslator::new(config)?;

        Ok(Self::new(
            LanguageCatalog::new(),
            Arc::new(WhatlangDetector::new()),
            Arc::new(provider),
            confirmer,
            HistoryLog::new(config.max_history),
        ))
    }

    /// The language catalog in use
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// The session history log
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Empty the history log
    pub async fn clear_history(&self) {
        self.history.clear().await;
    }

    /// Drive a single translation request to a terminal outcome.
    ///
    /// Errors are part of the outcome contract; nothing here panics or
    /// propagates past this call. The history log is only touched on
    /// success.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationOutcome> {
        // One request at a time; a second call waits rather than interleave.
        let _guard = self.in_flight.lock().await;

        let source_code =
            self.catalog
                .lookup(&request.source_selection)
                .ok_or_else(|| TranslateError::UnsupportedLanguage {
                    role: LanguageRole::Source,
                    name: request.source_selection.clone(),
                })?;

        let text = request.raw_text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let effective_source = if self.catalog.is_auto(source_code) {
            let detected = self.detector.detect(text).await?;
            debug!("auto-detect guessed '{}'", detected);

            // Detection is advisory, never silently authoritative: ask the
            // user before any translation cost is incurred.
            let prompt = match self.catalog.display_name_for(&detected) {
                Some(name) => format!("Detected language: {} ({}). Continue?", name, detected),
                None => format!("Detected language: {}. Continue?", detected.to_uppercase()),
            };

            if !self.confirmer.confirm(&prompt).await {
                info!("user declined detected language '{}'", detected);
                return Ok(TranslationOutcome::Cancelled);
            }

            detected
        } else {
            source_code.to_string()
        };

        let target_code =
            self.catalog
                .lookup(&request.target_selection)
                .ok_or_else(|| TranslateError::UnsupportedLanguage {
                    role: LanguageRole::Target,
                    name: request.target_selection.clone(),
                })?;

        let resolved = ResolvedLanguages {
            source_code: effective_source,
            target_code: target_code.to_string(),
        };

        let translated = match self
            .provider
            .translate(text, &resolved.source_code, &resolved.target_code)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!("provider call failed: {}", e);
                return Err(e);
            }
        };

        // Record under display names. A detected code outside the catalog
        // falls back to the code itself.
        let source_display = self
            .catalog
            .display_name_for(&resolved.source_code)
            .map(str::to_string)
            .unwrap_or_else(|| resolved.source_code.clone());

        let record = HistoryRecord::new(
            source_display,
            request.target_selection.clone(),
            translated.clone(),
        );
        self.history.append(record).await;

        info!(
            "translated {} -> {} ({} chars)",
            resolved.source_code,
            resolved.target_code,
            translated.len()
        );

        Ok(TranslationOutcome::Translated(translated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Detector stub returning a fixed guess, or failing when `None`
    struct StaticDetector(Option<&'static str>);

    #[async_trait]
    impl LanguageDetector for StaticDetector {
        async fn detect(&self, _text: &str) -> Result<String> {
            match self.0 {
                Some(code) => Ok(code.to_string()),
                None => Err(TranslateError::Detection {
                    message: "please enter more text".to_string(),
                }),
            }
        }
    }

    /// Provider stub returning a fixed translation
    struct StaticProvider(&'static str);

    #[async_trait]
    impl TranslationProvider for StaticProvider {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Provider stub that always fails
    struct FailingProvider;

    #[async_trait]
    impl TranslationProvider for FailingProvider {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            Err(TranslateError::Provider {
                message: "service unavailable".to_string(),
            })
        }
    }

    /// Confirmer stub answering with a fixed decision
    struct ScriptedConfirmer(bool);

    #[async_trait]
    impl Confirmer for ScriptedConfirmer {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    /// Confirmer stub that must never be consulted
    struct UnreachableConfirmer;

    #[async_trait]
    impl Confirmer for UnreachableConfirmer {
        async fn confirm(&self, prompt: &str) -> bool {
            panic!("confirmation gate must not fire: {}", prompt);
        }
    }

    fn orchestrator(
        detector: impl LanguageDetector + 'static,
        provider: impl TranslationProvider + 'static,
        confirmer: impl Confirmer + 'static,
    ) -> Orchestrator {
        Orchestrator::new(
            LanguageCatalog::new(),
            Arc::new(detector),
            Arc::new(provider),
            Arc::new(confirmer),
            HistoryLog::unbounded(),
        )
    }

    #[tokio::test]
    async fn test_explicit_languages_succeed_and_append_once() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hallo Welt"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("Hello world", "English", "German");

        let outcome = orch.translate(&request).await.unwrap();

        assert_eq!(outcome, TranslationOutcome::Translated("Hallo Welt".to_string()));
        let snapshot = orch.history().snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].source_display_name, "English");
        assert_eq!(snapshot[0].target_display_name, "German");
        assert_eq!(snapshot[0].translated_text, "Hallo Welt");
    }

    #[tokio::test]
    async fn test_auto_detect_confirmed_records_detected_display_name() {
        let orch = orchestrator(
            StaticDetector(Some("fr")),
            StaticProvider("Hello world"),
            ScriptedConfirmer(true),
        );
        let request = TranslationRequest::new("Bonjour le monde", "Auto Detect", "English");

        let outcome = orch.translate(&request).await.unwrap();

        assert_eq!(outcome.text(), Some("Hello world"));
        let snapshot = orch.history().snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].source_display_name, "French");
        assert_eq!(snapshot[0].target_display_name, "English");
    }

    #[tokio::test]
    async fn test_auto_detect_declined_cancels_without_side_effects() {
        let orch = orchestrator(
            StaticDetector(Some("fr")),
            StaticProvider("Hello world"),
            ScriptedConfirmer(false),
        );
        let request = TranslationRequest::new("Bonjour le monde", "Auto Detect", "English");

        let outcome = orch.translate(&request).await.unwrap();

        assert_eq!(outcome, TranslationOutcome::Cancelled);
        assert!(orch.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_detected_code_outside_catalog_recorded_as_code() {
        let orch = orchestrator(
            StaticDetector(Some("tlh")),
            StaticProvider("Hello"),
            ScriptedConfirmer(true),
        );
        let request = TranslationRequest::new("nuqneH", "Auto Detect", "English");

        orch.translate(&request).await.unwrap();

        let snapshot = orch.history().snapshot().await;
        assert_eq!(snapshot[0].source_display_name, "tlh");
    }

    #[tokio::test]
    async fn test_empty_text_is_an_input_error() {
        let orch = orchestrator(
            StaticDetector(Some("fr")),
            StaticProvider("Hello"),
            UnreachableConfirmer,
        );

        for raw_text in ["", "   ", "\n\t "] {
            let request = TranslationRequest::new(raw_text, "English", "French");
            let err = orch.translate(&request).await.unwrap_err();

            assert!(matches!(err, TranslateError::EmptyInput));
            assert!(err.is_input_error());
        }

        assert!(orch.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_text_short_circuits_before_detection() {
        // Auto-detect source, but the empty-input check fires first, so the
        // confirmation gate must never be reached.
        let orch = orchestrator(
            StaticDetector(Some("fr")),
            StaticProvider("Hello"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("  ", "Auto Detect", "English");

        let err = orch.translate(&request).await.unwrap_err();

        assert!(matches!(err, TranslateError::EmptyInput));
    }

    #[tokio::test]
    async fn test_unknown_source_selection_names_offender() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hello"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("hi", "Klingon", "English");

        let err = orch.translate(&request).await.unwrap_err();

        match err {
            TranslateError::UnsupportedLanguage { role, name } => {
                assert_eq!(role, LanguageRole::Source);
                assert_eq!(name, "Klingon");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(orch.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_target_selection_names_offender() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hello"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("hi", "English", "Klingon");

        let err = orch.translate(&request).await.unwrap_err();

        match err {
            TranslateError::UnsupportedLanguage { role, name } => {
                assert_eq!(role, LanguageRole::Target);
                assert_eq!(name, "Klingon");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_detection_failure_is_recoverable() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hello"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("hm", "Auto Detect", "English");

        let err = orch.translate(&request).await.unwrap_err();

        assert!(matches!(err, TranslateError::Detection { .. }));
        assert!(orch.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_history_unchanged() {
        let orch = orchestrator(StaticDetector(None), FailingProvider, UnreachableConfirmer);
        let request = TranslationRequest::new("Hello", "English", "French");

        let err = orch.translate(&request).await.unwrap_err();

        assert!(matches!(err, TranslateError::Provider { .. }));
        assert!(orch.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_explicit_source_skips_confirmation() {
        // UnreachableConfirmer panics if consulted; an explicit source must
        // not consult it.
        let orch = orchestrator(
            StaticDetector(Some("de")),
            StaticProvider("Bonjour"),
            UnreachableConfirmer,
        );
        let request = TranslationRequest::new("Hello", "English", "French");

        let outcome = orch.translate(&request).await.unwrap();

        assert_eq!(outcome.text(), Some("Bonjour"));
    }

    #[tokio::test]
    async fn test_clear_history_empties_log() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hallo"),
            UnreachableConfirmer,
        );

        for _ in 0..3 {
            let request = TranslationRequest::new("Hello", "English", "German");
            orch.translate(&request).await.unwrap();
        }
        assert_eq!(orch.history().len().await, 3);

        orch.clear_history().await;

        assert!(orch.history().snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_successive_requests_append_in_order() {
        let orch = orchestrator(
            StaticDetector(None),
            StaticProvider("Hallo"),
            UnreachableConfirmer,
        );

        let first = TranslationRequest::new("Hello", "English", "German");
        let second = TranslationRequest::new("Hello", "English", "Dutch");
        orch.translate(&first).await.unwrap();
        orch.translate(&second).await.unwrap();

        let snapshot = orch.history().snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].target_display_name, "German");
        assert_eq!(snapshot[1].target_display_name, "Dutch");
    }
}
