//! Error types for the docfidelity-core library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type returned by every conversion.
///
/// Pipeline-specific errors are folded into one of these variants so callers
/// only ever match on a single shape.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The declared file name has an extension no pipeline accepts.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The bytes claim a type but fail to parse as it.
    #[error("malformed {kind} input: {message}")]
    MalformedInput {
        /// Declared source kind (`docx`, `pdf`, `image`).
        kind: &'static str,
        /// Message from the underlying parser.
        message: String,
    },

    /// Extraction failed and no fallback was left.
    #[error("{kind} extraction failed: {message}")]
    ExtractionFailed {
        /// Declared source kind (`docx`, `pdf`, `image`).
        kind: &'static str,
        /// What went wrong.
        message: String,
    },
}

impl ConversionError {
    /// Machine-readable reason for this failure.
    ///
    /// Malformed input is reported as `unsupported_format`: the container
    /// could not be read as the declared type.
    pub fn reason(&self) -> ErrorReason {
        match self {
            ConversionError::UnsupportedFormat(_) | ConversionError::MalformedInput { .. } => {
                ErrorReason::UnsupportedFormat
            }
            ConversionError::ExtractionFailed { .. } => ErrorReason::ExtractionFailed,
        }
    }

    /// Structured payload for callers that serialize failures.
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            reason: self.reason(),
            message: self.to_string(),
        }
    }
}

/// Short machine-readable failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    UnsupportedFormat,
    ExtractionFailed,
}

/// Serializable failure shape: `{"reason": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub reason: ErrorReason,
    pub message: String,
}

/// Errors related to DOCX parsing.
#[derive(Error, Debug)]
pub enum DocxError {
    /// The bytes are not a readable ZIP container.
    #[error("not a DOCX container: {0}")]
    Archive(String),

    /// A required part is missing from the package.
    #[error("missing part: {0}")]
    MissingPart(&'static str),

    /// A package part is not well-formed XML.
    #[error("invalid XML in {part}: {message}")]
    Xml { part: &'static str, message: String },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and the empty password does not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Word extraction failed on a single page.
    #[error("failed to extract words from page {page}: {message}")]
    PageExtraction { page: u32, message: String },

    /// Every page failed to extract.
    #[error("no page could be extracted ({pages} pages attempted)")]
    AllPagesFailed { pages: u32 },
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be initialized for a language profile.
    #[error("failed to initialize OCR for profile '{profile}': {message}")]
    Init { profile: String, message: String },

    /// Recognition failed after the engine was initialized.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The engine produced output that could not be read.
    #[error("invalid OCR output: {0}")]
    Output(String),

    /// The image could not be handed to the engine.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// No OCR engine is compiled in.
    #[error("no OCR engine available (build with the `tesseract` feature)")]
    Unavailable,

    /// Every configured language profile failed.
    #[error("all OCR language profiles failed ({}): {last}", .attempted.join(", "))]
    AllProfilesFailed { attempted: Vec<String>, last: String },
}

impl From<DocxError> for ConversionError {
    fn from(err: DocxError) -> Self {
        ConversionError::MalformedInput {
            kind: "docx",
            message: err.to_string(),
        }
    }
}

impl From<PdfError> for ConversionError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Parse(_) | PdfError::Encrypted => ConversionError::MalformedInput {
                kind: "pdf",
                message: err.to_string(),
            },
            _ => ConversionError::ExtractionFailed {
                kind: "pdf",
                message: err.to_string(),
            },
        }
    }
}

impl From<OcrError> for ConversionError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::InvalidImage(_) => ConversionError::MalformedInput {
                kind: "image",
                message: err.to_string(),
            },
            _ => ConversionError::ExtractionFailed {
                kind: "image",
                message: err.to_string(),
            },
        }
    }
}

impl From<image::ImageError> for ConversionError {
    fn from(err: image::ImageError) -> Self {
        ConversionError::MalformedInput {
            kind: "image",
            message: err.to_string(),
        }
    }
}

/// Result type for the docfidelity library.
pub type Result<T> = std::result::Result<T, ConversionError>;
