//! Page reconstruction: words to styled lines.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{PageWords, PdfExtractor, PdfProcessor, Result};
use crate::error::PdfError;
use crate::html::{container, escape_html};
use crate::layout::render_line;
use crate::models::config::{DEFAULT_CONTAINER_CSS, PdfConfig};
use crate::models::document::Word;

/// PDF to HTML converter.
pub struct PdfConverter {
    config: PdfConfig,
    container_css: String,
}

impl PdfConverter {
    pub fn new(config: PdfConfig) -> Self {
        Self {
            config,
            container_css: DEFAULT_CONTAINER_CSS.to_string(),
        }
    }

    /// Set the CSS of the container wrapping each page.
    pub fn with_container_css(mut self, css: impl Into<String>) -> Self {
        self.container_css = css.into();
        self
    }

    /// Convert PDF bytes to an HTML fragment.
    pub fn convert(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;
        self.render_document(&extractor)
    }

    /// Render every page of a loaded document.
    ///
    /// A page that fails to extract is replaced by an inline error marker;
    /// the call fails only if no page could be extracted.
    pub fn render_document<P: PdfProcessor>(&self, processor: &P) -> Result<String> {
        let page_count = processor.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        let pages = match self.config.max_pages {
            0 => page_count,
            max => page_count.min(max as u32),
        };

        let mut html = String::new();
        let mut failed = 0;
        for number in 1..=pages {
            let body = match processor.page_words(number) {
                Ok(page) => self.render_page(&page),
                Err(e) => {
                    warn!("Page {} failed: {}", number, e);
                    failed += 1;
                    format!("<p style=\"color:#b00020;\">{}</p>", escape_html(&e.to_string()))
                }
            };
            html.push_str(&container(&self.container_css, &body));
        }

        if failed == pages {
            return Err(PdfError::AllPagesFailed { pages });
        }
        debug!("Rendered {} PDF pages ({} failed)", pages, failed);
        Ok(html)
    }

    /// Render the lines of one page, top to bottom.
    pub fn render_page(&self, page: &PageWords) -> String {
        group_lines(&page.words)
            .iter()
            .map(|line| render_line(line, page.width, &self.config.layout))
            .collect()
    }
}

impl Default for PdfConverter {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

/// Group words sharing a rounded `top` into lines sorted by `x0`.
fn group_lines(words: &[Word]) -> Vec<Vec<Word>> {
    let mut lines: BTreeMap<i64, Vec<Word>> = BTreeMap::new();
    for word in words {
        lines
            .entry(word.top.round() as i64)
            .or_default()
            .push(word.clone());
    }
    lines
        .into_values()
        .map(|mut line| {
            line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            line
        })
        .collect()
}
