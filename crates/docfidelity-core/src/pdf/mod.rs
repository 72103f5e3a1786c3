//! PDF processing module.
//!
//! Pages are reduced to positioned words, regrouped into lines by vertical
//! position and rendered with the shared geometry heuristics.

mod collector;
mod extractor;
mod reconstruct;

pub use extractor::PdfExtractor;
pub use reconstruct::PdfConverter;

use crate::error::PdfError;
use crate::models::document::Word;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Words of a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWords {
    /// Page number (1-indexed).
    pub number: u32,
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Words in content-stream order.
    pub words: Vec<Word>,
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract positioned words from a specific page.
    fn page_words(&self, page: u32) -> Result<PageWords>;
}
