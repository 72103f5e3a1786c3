//! PDF word extraction using lopdf and pdf-extract.

use lopdf::Document;
use pdf_extract::OutputError;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace};

use super::collector::WordCollector;
use super::{PageWords, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF word extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // lopdf tries the empty password while loading; retry only if that failed
        if doc.is_encrypted() && doc.encryption_state.is_none() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_words(&self, page: u32) -> Result<PageWords> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let mut collector = WordCollector::new();
        guard_page(page, || pdf_extract::output_doc_page(doc, &mut collector, page))?;

        let (width, height) = (collector.width(), collector.height());
        let words = collector.into_words();
        trace!("Page {}: {} words, {}x{} pt", page, words.len(), width, height);

        Ok(PageWords {
            number: page,
            width,
            height,
            words,
        })
    }
}

/// Run one page's extraction, turning errors and panics into a page error.
///
/// pdf-extract panics on some malformed content streams.
pub(crate) fn guard_page<F>(page: u32, extract: F) -> Result<()>
where
    F: FnOnce() -> std::result::Result<(), OutputError>,
{
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(PdfError::PageExtraction {
            page,
            message: e.to_string(),
        }),
        Err(payload) => Err(PdfError::PageExtraction {
            page,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "text extraction panicked".to_string()
    }
}
