//! Configuration structures for the conversion pipelines.

use crate::layout::LayoutPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base container styling shared by the PDF and image pipelines.
pub const DEFAULT_CONTAINER_CSS: &str =
    "font-family:'Times New Roman', Times, serif;font-size:12pt;line-height:1.5;";

/// Main configuration for a document converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Inline CSS of the container wrapping PDF pages and OCR output.
    pub container_css: String,

    /// DOCX rendering configuration.
    pub docx: DocxConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            container_css: DEFAULT_CONTAINER_CSS.to_string(),
            docx: DocxConfig::default(),
            pdf: PdfConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}

/// DOCX rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxConfig {
    /// `border` attribute on emitted tables (0 = none).
    pub table_border: u32,

    /// Keep runs of spaces by emitting `&nbsp;`.
    pub preserve_spaces: bool,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            table_border: 1,
            preserve_spaces: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Line classification thresholds, in PDF points.
    pub layout: LayoutPolicy,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            layout: LayoutPolicy::default(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language profiles tried in order, e.g. `eng` or `eng+spa`.
    pub languages: Vec<String>,

    /// Try the engine's default profile after every language failed.
    pub use_default_profile: bool,

    /// Directory holding `*.traineddata` files (engine default when unset).
    pub tessdata_dir: Option<PathBuf>,

    /// Page segmentation mode passed to the engine.
    pub page_segmentation_mode: Option<u32>,

    /// Words below this confidence (0-100) are dropped.
    pub min_confidence: f32,

    /// Line classification thresholds, in image pixels.
    pub layout: LayoutPolicy,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: vec!["eng".to_string(), "spa".to_string(), "eng+spa".to_string()],
            use_default_profile: true,
            tessdata_dir: None,
            page_segmentation_mode: None,
            min_confidence: 0.0,
            layout: LayoutPolicy::default(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
