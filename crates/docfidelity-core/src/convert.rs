//! Format dispatch: declared file name to pipeline.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::docx::DocxConverter;
use crate::error::{ConversionError, Result};
use crate::models::config::ConverterConfig;
use crate::ocr::{ImageConverter, OcrBackend};
use crate::pdf::PdfConverter;

/// Raster image formats accepted by the OCR pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

/// Source document kind, decided by the declared file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Docx,
    Pdf,
    Image(ImageKind),
}

impl SourceKind {
    /// Route a declared file name by its extension, ignoring case.
    ///
    /// File contents are never inspected.
    pub fn from_name(declared_name: &str) -> Result<Self> {
        let extension = Path::new(declared_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| ConversionError::UnsupportedFormat(declared_name.to_string()))?;

        match extension.as_str() {
            "docx" => Ok(SourceKind::Docx),
            "pdf" => Ok(SourceKind::Pdf),
            "png" => Ok(SourceKind::Image(ImageKind::Png)),
            "jpg" | "jpeg" => Ok(SourceKind::Image(ImageKind::Jpeg)),
            "gif" => Ok(SourceKind::Image(ImageKind::Gif)),
            _ => Err(ConversionError::UnsupportedFormat(declared_name.to_string())),
        }
    }

    /// Short label used in errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Docx => "docx",
            SourceKind::Pdf => "pdf",
            SourceKind::Image(_) => "image",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry point converting any supported document to an HTML fragment.
pub struct DocumentConverter<B: OcrBackend> {
    config: ConverterConfig,
    ocr: B,
}

impl<B: OcrBackend> DocumentConverter<B> {
    pub fn new(config: ConverterConfig, ocr: B) -> Self {
        Self { config, ocr }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert file bytes, routing by the declared file name.
    pub fn convert(&self, data: &[u8], declared_name: &str) -> Result<String> {
        let kind = SourceKind::from_name(declared_name)?;
        info!("Converting '{}' as {} ({} bytes)", declared_name, kind, data.len());
        self.convert_kind(data, kind)
    }

    /// Convert file bytes with an already known kind.
    pub fn convert_kind(&self, data: &[u8], kind: SourceKind) -> Result<String> {
        let html = match kind {
            SourceKind::Docx => DocxConverter::new(self.config.docx.clone()).convert(data)?,
            SourceKind::Pdf => PdfConverter::new(self.config.pdf.clone())
                .with_container_css(self.config.container_css.clone())
                .convert(data)?,
            SourceKind::Image(_) => {
                ImageConverter::new(&self.ocr, self.config.ocr.clone())
                    .with_container_css(self.config.container_css.clone())
                    .convert(data)?
            }
        };
        debug!("{} conversion produced {} bytes of HTML", kind, html.len());
        Ok(html)
    }
}
