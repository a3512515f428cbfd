//! Language detection capability

use async_trait::async_trait;
use tracing::debug;
use whatlang::Lang;

use crate::core::errors::{Result, TranslateError};

/// Best-effort language detection.
///
/// Implementations must be deterministic: the same text yields the same
/// guess for the lifetime of the session. Failure is recoverable; the
/// orchestrator surfaces it to the user rather than aborting.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Guess the language code of the given text
    async fn detect(&self, text: &str) -> Result<String>;
}

/// Trigram-based detector backed by whatlang
#[derive(Debug, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

/// Map a whatlang language to its ISO 639-1 code.
///
/// whatlang reports ISO 639-3; the catalog keys on the two-letter codes the
/// translation provider understands. Unmapped languages fall back to the
/// three-letter code.
fn lang_to_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Spa => "es",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Cmn => "zh", // whatlang uses Cmn for Mandarin
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Nld => "nl",
        Lang::Tur => "tr",
        Lang::Pol => "pl",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Nob => "no", // whatlang uses Nob for Norwegian
        Lang::Ces => "cs",
        Lang::Hun => "hu",
        Lang::Ell => "el",
        Lang::Bul => "bg",
        Lang::Ukr => "uk",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Heb => "he",
        Lang::Pes => "fa", // Persian
        Lang::Ind => "id",
        Lang::Ron => "ro",
        Lang::Lit => "lt",
        Lang::Lav => "lv",
        Lang::Est => "et",
        Lang::Slk => "sk",
        Lang::Slv => "sl",
        Lang::Hrv => "hr",
        Lang::Srp => "sr",
        Lang::Cat => "ca",
        Lang::Epo => "eo",
        Lang::Afr => "af",
        Lang::Ben => "bn",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Mar => "mr",
        Lang::Guj => "gu",
        Lang::Kan => "kn",
        Lang::Mal => "ml",
        Lang::Pan => "pa",
        Lang::Urd => "ur",
        Lang::Aze => "az",
        Lang::Kat => "ka",
        Lang::Hye => "hy",
        Lang::Lat => "la",
        Lang::Zul => "zu",
        Lang::Mkd => "mk",
        Lang::Bel => "be",
        Lang::Yid => "yi",
        Lang::Amh => "am",
        Lang::Jav => "jv",
        Lang::Uzb => "uz",
        Lang::Ori => "or",
        Lang::Mya => "my",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Khm => "km",
        Lang::Tuk => "tk",
        Lang::Sna => "sn",
        Lang::Tgl => "tl",
        l => l.code(),
    }
}

#[async_trait]
impl LanguageDetector for WhatlangDetector {
    async fn detect(&self, text: &str) -> Result<String> {
        match whatlang::detect(text) {
            Some(info) => {
                let code = lang_to_code(info.lang());
                debug!(
                    "detected language {} ({}) with confidence {:.2}",
                    info.lang(),
                    code,
                    info.confidence()
                );
                Ok(code.to_string())
            }
            None => Err(TranslateError::Detection {
                message: "please enter more text".to_string(),
            }),
        }
    }
}
