//! Word boxes from pdf-extract's character stream.

use crate::models::document::Word;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

/// Glyphs further apart than this share of the font size start a new word.
const WORD_GAP_RATIO: f64 = 0.1;

/// Baseline shifts larger than this share of the font size start a new word.
const BASELINE_SHIFT_RATIO: f64 = 0.5;

struct PendingWord {
    text: String,
    x0: f64,
    x1: f64,
    baseline: f64,
    size: f64,
}

/// Collects words of one page. Coordinates are flipped so `top` grows
/// downwards from the top edge of the media box.
#[derive(Default)]
pub(crate) struct WordCollector {
    llx: f64,
    ury: f64,
    width: f64,
    height: f64,
    words: Vec<Word>,
    pending: Option<PendingWord>,
}

impl WordCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn width(&self) -> f64 {
        self.width
    }

    pub(crate) fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn into_words(mut self) -> Vec<Word> {
        self.flush();
        self.words
    }

    fn flush(&mut self) {
        if let Some(word) = self.pending.take() {
            self.words.push(Word::new(
                word.text,
                word.x0,
                word.x1,
                word.baseline - word.size,
            ));
        }
    }

    /// Add one glyph at `x` on `baseline` advancing by `advance`.
    fn push_glyph(&mut self, text: &str, x: f64, baseline: f64, advance: f64, size: f64) {
        if text.chars().all(char::is_whitespace) {
            self.flush();
            return;
        }

        let continues = self.pending.as_ref().is_some_and(|word| {
            (baseline - word.baseline).abs() <= size * BASELINE_SHIFT_RATIO
                && x <= word.x1 + size * WORD_GAP_RATIO
                && x >= word.x1 - size
        });
        if !continues {
            self.flush();
        }

        match self.pending.as_mut() {
            Some(word) => {
                word.text.push_str(text);
                word.x1 = word.x1.max(x + advance);
            }
            None => {
                self.pending = Some(PendingWord {
                    text: text.to_string(),
                    x0: x,
                    x1: x + advance,
                    baseline,
                    size,
                })
            }
        }
    }
}

impl OutputDev for WordCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.llx = media_box.llx;
        self.ury = media_box.ury;
        self.width = media_box.urx - media_box.llx;
        self.height = media_box.ury - media_box.lly;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        // Effective size: side of the square with the area of the
        // transformed (font_size, font_size) vector.
        let vx = font_size * trm.m11 + font_size * trm.m21;
        let vy = font_size * trm.m12 + font_size * trm.m22;
        let size = (vx * vy).abs().sqrt();

        let x = trm.m31 - self.llx;
        let baseline = self.ury - trm.m32;
        self.push_glyph(char, x, baseline, width * size, size);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    // Called on every Td/Tm, even mid-line; words are split on geometry only.
    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
