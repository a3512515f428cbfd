//! Core data models for translation requests and session history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user-initiated translation request.
///
/// Selections are catalog display names (for example "Auto Detect" or
/// "English"), not provider codes; the orchestrator resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub raw_text: String,
    pub source_selection: String,
    pub target_selection: String,
}

impl TranslationRequest {
    pub fn new(
        raw_text: impl Into<String>,
        source_selection: impl Into<String>,
        target_selection: impl Into<String>,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            source_selection: source_selection.into(),
            target_selection: target_selection.into(),
        }
    }
}

/// Language selections resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguages {
    pub source_code: String,
    pub target_code: String,
}

/// One completed translation, as recorded in the session history.
///
/// Records carry display names, not provider codes. Never mutated after
/// creation; removed only when the whole log is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub source_display_name: String,
    pub target_display_name: String,
    pub translated_text: String,
    pub translated_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(
        source_display_name: impl Into<String>,
        target_display_name: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            source_display_name: source_display_name.into(),
            target_display_name: target_display_name.into(),
            translated_text: translated_text.into(),
            translated_at: Utc::now(),
        }
    }
}

/// Terminal outcome of a translate call that did not error.
///
/// Declining a detected source language is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Translation completed and recorded in the history log
    Translated(String),
    /// User declined the detected source language; nothing was recorded
    Cancelled,
}

impl TranslationOutcome {
    /// Translated text, if the request completed
    pub fn text(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Translated(text) => Some(text),
            TranslationOutcome::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_construction() {
        let request = TranslationRequest::new("Bonjour", "Auto Detect", "English");

        assert_eq!(request.raw_text, "Bonjour");
        assert_eq!(request.source_selection, "Auto Detect");
        assert_eq!(request.target_selection, "English");
    }

    #[test]
    fn test_outcome_text() {
        let done = TranslationOutcome::Translated("Hello".to_string());
        assert_eq!(done.text(), Some("Hello"));

        assert_eq!(TranslationOutcome::Cancelled.text(), None);
    }
}
