//! OCR pipeline for scanned images.
//!
//! Recognition is delegated to an [`OcrBackend`]; language profiles are
//! tried in order until one succeeds, and the resulting word rows are laid
//! out with the shared geometry heuristics.

mod reconstruct;
#[cfg(feature = "tesseract")]
mod tesseract;
mod tsv;

pub use reconstruct::ImageConverter;
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractBackend;
pub use tsv::parse_tsv;

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::document::Word;
use image::DynamicImage;
use std::fmt;
use tracing::{debug, info, warn};

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// A language configuration handed to the OCR engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageProfile {
    /// Tesseract language string, e.g. `eng` or `eng+spa`.
    Language(String),
    /// Whatever the engine loads when no language is given.
    Default,
}

impl LanguageProfile {
    pub fn language(&self) -> Option<&str> {
        match self {
            LanguageProfile::Language(lang) => Some(lang),
            LanguageProfile::Default => None,
        }
    }
}

impl fmt::Display for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageProfile::Language(lang) => f.write_str(lang),
            LanguageProfile::Default => f.write_str("default"),
        }
    }
}

/// Profiles to try, in order, for a configuration.
pub fn fallback_profiles(config: &OcrConfig) -> Vec<LanguageProfile> {
    let mut profiles: Vec<LanguageProfile> = config
        .languages
        .iter()
        .filter(|lang| !lang.trim().is_empty())
        .map(|lang| LanguageProfile::Language(lang.trim().to_string()))
        .collect();
    if config.use_default_profile {
        profiles.push(LanguageProfile::Default);
    }
    profiles
}

/// One word row reported by the OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    pub block_num: u32,
    pub par_num: u32,
    pub line_num: u32,
    pub word_num: u32,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Confidence 0-100; negative for rows that carry no word.
    pub conf: f32,
    pub text: String,
}

impl OcrWord {
    /// Whether the row holds a recognized word at or above `min_confidence`.
    pub fn is_usable(&self, min_confidence: f32) -> bool {
        !self.text.trim().is_empty() && self.conf >= 0.0 && self.conf >= min_confidence
    }

    pub fn to_word(&self) -> Word {
        Word::new(
            self.text.trim(),
            self.left as f64,
            (self.left + self.width) as f64,
            self.top as f64,
        )
    }
}

/// Trait for OCR engines.
pub trait OcrBackend: Send + Sync {
    /// Recognize words in an image with one language profile.
    fn recognize(&self, image: &DynamicImage, profile: &LanguageProfile) -> Result<Vec<OcrWord>>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image: &DynamicImage, profile: &LanguageProfile) -> Result<Vec<OcrWord>> {
        (**self).recognize(image, profile)
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for &T {
    fn recognize(&self, image: &DynamicImage, profile: &LanguageProfile) -> Result<Vec<OcrWord>> {
        (**self).recognize(image, profile)
    }
}

/// Backend used when no OCR engine is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBackend;

impl OcrBackend for UnavailableBackend {
    fn recognize(&self, _image: &DynamicImage, _profile: &LanguageProfile) -> Result<Vec<OcrWord>> {
        Err(OcrError::Unavailable)
    }
}

/// The best backend available in this build.
#[cfg(feature = "tesseract")]
pub fn default_backend(config: &OcrConfig) -> Box<dyn OcrBackend> {
    Box::new(TesseractBackend::from_config(config))
}

/// The best backend available in this build.
#[cfg(not(feature = "tesseract"))]
pub fn default_backend(_config: &OcrConfig) -> Box<dyn OcrBackend> {
    Box::new(UnavailableBackend)
}

/// Words recognized by the first profile that succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutcome {
    pub profile: LanguageProfile,
    pub words: Vec<OcrWord>,
}

/// Try each profile in order and return the first success.
pub fn recognize_with_fallback<B: OcrBackend + ?Sized>(
    backend: &B,
    image: &DynamicImage,
    profiles: &[LanguageProfile],
) -> Result<OcrOutcome> {
    let mut attempted = Vec::new();
    let mut last_error = None;

    for profile in profiles {
        debug!("Running OCR with profile '{}'", profile);
        match backend.recognize(image, profile) {
            Ok(words) => {
                if !attempted.is_empty() {
                    info!(
                        "OCR fell back to profile '{}' after {} failed",
                        profile,
                        attempted.len()
                    );
                }
                return Ok(OcrOutcome {
                    profile: profile.clone(),
                    words,
                });
            }
            Err(e) => {
                warn!("OCR profile '{}' failed: {}", profile, e);
                attempted.push(profile.to_string());
                last_error = Some(e.to_string());
            }
        }
    }

    Err(OcrError::AllProfilesFailed {
        attempted,
        last: last_error.unwrap_or_else(|| "no language profiles configured".to_string()),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Backend with canned results per profile; unknown profiles fail.
    #[derive(Default)]
    pub struct ScriptedBackend {
        results: HashMap<LanguageProfile, Vec<OcrWord>>,
        pub calls: Mutex<Vec<LanguageProfile>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_result(mut self, profile: LanguageProfile, words: Vec<OcrWord>) -> Self {
            self.results.insert(profile, words);
            self
        }
    }

    impl OcrBackend for ScriptedBackend {
        fn recognize(&self, _image: &DynamicImage, profile: &LanguageProfile) -> Result<Vec<OcrWord>> {
            self.calls.lock().unwrap().push(profile.clone());
            self.results
                .get(profile)
                .cloned()
                .ok_or_else(|| OcrError::Init {
                    profile: profile.to_string(),
                    message: "Failed loading language".to_string(),
                })
        }
    }

    pub fn ocr_word(block: u32, par: u32, line: u32, left: i32, width: i32, text: &str) -> OcrWord {
        OcrWord {
            block_num: block,
            par_num: par,
            line_num: line,
            word_num: 1,
            left,
            top: (line as i32) * 40,
            width,
            height: 30,
            conf: 91.0,
            text: text.to_string(),
        }
    }
}
