//! Custom error types for translation operations

use std::fmt;

use thiserror::Error;

/// Which of the two language selectors an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    Source,
    Target,
}

impl fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageRole::Source => write!(f, "source"),
            LanguageRole::Target => write!(f, "target"),
        }
    }
}

/// Translation-related errors
///
/// Every variant is recovered at the orchestrator boundary and surfaced to
/// the user as its Display message; none may crash the process.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Selected language is not in the catalog
    #[error("{role} language '{name}' is not supported")]
    UnsupportedLanguage {
        role: LanguageRole,
        name: String,
    },

    /// Nothing to translate after trimming
    #[error("please enter text to translate")]
    EmptyInput,

    /// Detector could not produce a guess
    #[error("could not detect the language: {message}")]
    Detection {
        message: String,
    },

    /// External translation call failed
    #[error("translation failed: {message}")]
    Provider {
        message: String,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TranslateError {
    /// Whether the user must correct their input to proceed
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TranslateError::UnsupportedLanguage { .. } | TranslateError::EmptyInput
        )
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;
