//! LinguaFlow - Interactive text translation library
//!
//! This library provides the translation request orchestrator behind the
//! LinguaFlow CLI and HTTP surfaces: language catalog lookups, auto-detection
//! with a user confirmation gate, the translation provider call, and an
//! in-memory session history log.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    catalog::{LanguageCatalog, LanguageEntry, AUTO_CODE},
    config::AppConfig,
    confirm::{AutoConfirm, Confirmer, StdinConfirmer},
    detect::{LanguageDetector, WhatlangDetector},
    errors::{LanguageRole, TranslateError},
    history::HistoryLog,
    models::{HistoryRecord, ResolvedLanguages, TranslationOutcome, TranslationRequest},
    orchestrator::Orchestrator,
    provider::{GoogleWebTranslator, TranslationProvider},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
