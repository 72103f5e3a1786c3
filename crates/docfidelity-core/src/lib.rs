//! Core library for layout-faithful document to HTML conversion.
//!
//! This crate provides:
//! - DOCX structural walking (paragraphs, runs, lists, tables)
//! - PDF text-layout reconstruction from positioned words
//! - Image OCR layout reconstruction with language fallback
//! - Shared line geometry classification (alignment, indentation, spacing)
//! - Format dispatch by declared file extension

pub mod convert;
pub mod docx;
pub mod error;
pub mod html;
pub mod layout;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod template;

pub use convert::{DocumentConverter, ImageKind, SourceKind};
pub use docx::DocxConverter;
pub use error::{ConversionError, ErrorPayload, ErrorReason, Result};
pub use layout::{Alignment, LayoutPolicy, LineGeometry, LineLayout, SpacingClass, classify};
pub use models::config::{ConverterConfig, DocxConfig, OcrConfig, PdfConfig};
pub use ocr::{ImageConverter, LanguageProfile, OcrBackend, UnavailableBackend, default_backend};
pub use pdf::{PdfConverter, PdfProcessor};
pub use template::{find_fields, merge_fields};

#[cfg(feature = "tesseract")]
pub use ocr::TesseractBackend;
