//! Paragraph and line reconstruction from OCR word rows.

use image::DynamicImage;
use tracing::debug;

use super::{OcrBackend, OcrWord, Result, fallback_profiles, recognize_with_fallback};
use crate::html::container;
use crate::layout::render_line;
use crate::models::config::{DEFAULT_CONTAINER_CSS, OcrConfig};
use crate::models::document::Word;

/// Lines of one OCR paragraph, each sorted by `x0`.
type ParagraphGroup = Vec<Vec<Word>>;

/// Image to HTML converter.
pub struct ImageConverter<B: OcrBackend> {
    backend: B,
    config: OcrConfig,
    container_css: String,
}

impl<B: OcrBackend> ImageConverter<B> {
    pub fn new(backend: B, config: OcrConfig) -> Self {
        Self {
            backend,
            config,
            container_css: DEFAULT_CONTAINER_CSS.to_string(),
        }
    }

    /// Set the CSS of the container wrapping the output.
    pub fn with_container_css(mut self, css: impl Into<String>) -> Self {
        self.container_css = css.into();
        self
    }

    /// Decode image bytes and convert them to an HTML fragment.
    pub fn convert(&self, data: &[u8]) -> crate::Result<String> {
        let image = image::load_from_memory(data)?;
        Ok(self.render_image(&image)?)
    }

    /// Recognize and render a decoded image.
    pub fn render_image(&self, image: &DynamicImage) -> Result<String> {
        let profiles = fallback_profiles(&self.config);
        let outcome = recognize_with_fallback(&self.backend, image, &profiles)?;

        let paragraphs = group_paragraphs(&outcome.words, self.config.min_confidence);
        debug!(
            "OCR profile '{}': {} rows, {} paragraphs",
            outcome.profile,
            outcome.words.len(),
            paragraphs.len()
        );

        let width = image.width() as f64;
        let body: String = paragraphs
            .iter()
            .map(|lines| {
                let rendered: String = lines
                    .iter()
                    .map(|line| render_line(line, width, &self.config.layout))
                    .collect();
                format!("<div style=\"margin-bottom:12px;\">{}</div>", rendered)
            })
            .collect();

        Ok(container(&self.container_css, &body))
    }
}

/// Group usable rows into paragraphs (by block and paragraph number) and
/// lines (by line number), keeping engine order.
fn group_paragraphs(rows: &[OcrWord], min_confidence: f32) -> Vec<ParagraphGroup> {
    let mut paragraphs: Vec<((u32, u32), Vec<(u32, Vec<Word>)>)> = Vec::new();

    for row in rows.iter().filter(|r| r.is_usable(min_confidence)) {
        let key = (row.block_num, row.par_num);
        if paragraphs.last().is_none_or(|(k, _)| *k != key) {
            paragraphs.push((key, Vec::new()));
        }
        let Some((_, lines)) = paragraphs.last_mut() else {
            continue;
        };
        if lines.last().is_none_or(|(n, _)| *n != row.line_num) {
            lines.push((row.line_num, Vec::new()));
        }
        if let Some((_, words)) = lines.last_mut() {
            words.push(row.to_word());
        }
    }

    paragraphs
        .into_iter()
        .map(|(_, lines)| {
            lines
                .into_iter()
                .map(|(_, mut words)| {
                    words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
                    words
                })
                .collect()
        })
        .collect()
}
