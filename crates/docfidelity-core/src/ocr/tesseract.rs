//! Tesseract backend via leptess.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};
use leptess::{LepTess, Variable};
use tracing::trace;

use super::{LanguageProfile, OcrBackend, OcrWord, Result, parse_tsv};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Resolution assumed for images that carry no DPI metadata.
const FALLBACK_DPI: i32 = 300;

/// OCR backend running a fresh Tesseract instance per call.
#[derive(Debug, Clone, Default)]
pub struct TesseractBackend {
    tessdata_dir: Option<PathBuf>,
    page_segmentation_mode: Option<u32>,
}

impl TesseractBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            tessdata_dir: config.tessdata_dir.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    pub fn with_page_segmentation_mode(mut self, mode: u32) -> Self {
        self.page_segmentation_mode = Some(mode);
        self
    }
}

impl OcrBackend for TesseractBackend {
    fn recognize(&self, image: &DynamicImage, profile: &LanguageProfile) -> Result<Vec<OcrWord>> {
        let init_error = |message: String| OcrError::Init {
            profile: profile.to_string(),
            message,
        };

        let data_path = self.tessdata_dir.as_deref().and_then(|p| p.to_str());
        // An empty language makes Tesseract load its built-in default
        let lang = profile.language().unwrap_or("");
        let mut lt = LepTess::new(data_path, lang).map_err(|e| init_error(e.to_string()))?;

        if let Some(mode) = self.page_segmentation_mode {
            lt.set_variable(Variable::TesseditPagesegMode, &mode.to_string())
                .map_err(|e| init_error(e.to_string()))?;
        }

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        lt.set_image_from_mem(&png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        lt.set_fallback_source_resolution(FALLBACK_DPI);

        let tsv = lt
            .get_tsv_text(0)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let words = parse_tsv(&tsv)?;
        trace!("Tesseract '{}' returned {} word rows", profile, words.len());
        Ok(words)
    }
}
