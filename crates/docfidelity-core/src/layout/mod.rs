//! Geometry heuristics shared by the PDF and image pipelines.
//!
//! Both scanned-input pipelines reduce a page to lines of positioned words.
//! This module decides how each line is aligned and indented and how wide
//! the gaps between its words should render.

mod classifier;
mod spacing;

pub use classifier::{Alignment, LineGeometry, LineLayout, classify};
pub use spacing::{SpacingClass, SpacingThresholds, spacing_class};

use crate::html::escape_html;
use crate::models::document::Word;
use serde::{Deserialize, Serialize};

/// Tunable thresholds for line classification.
///
/// Ratios are fractions of the container width; absolute values are in the
/// container's own units (PDF points or image pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    /// Both margins must exceed this share of the width for a centered line.
    pub center_min_margin_ratio: f64,

    /// Maximum difference between the two margins for a centered line.
    pub center_max_offset_ratio: f64,

    /// A centered line must be narrower than this share of the width.
    pub center_max_width_ratio: f64,

    /// A justified line must be wider than this share of the width.
    pub justify_min_width_ratio: f64,

    /// A justified line must have strictly more words than this.
    pub justify_min_words: usize,

    /// Left margins at or below this are not indented.
    pub indent_threshold: f64,

    /// Width of one indentation level.
    pub indent_unit: f64,

    /// CSS pixels emitted per indentation level.
    pub indent_step_px: u32,

    /// Render centered lines bold, as headings.
    pub center_as_heading: bool,

    /// Inter-word gap bands.
    pub spacing: SpacingThresholds,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            center_min_margin_ratio: 0.15,
            center_max_offset_ratio: 0.20,
            center_max_width_ratio: 0.70,
            justify_min_width_ratio: 0.60,
            justify_min_words: 6,
            indent_threshold: 20.0,
            indent_unit: 25.0,
            indent_step_px: 15,
            center_as_heading: true,
            spacing: SpacingThresholds::default(),
        }
    }
}

/// Join x-ordered words, widening the separator according to each gap.
pub fn join_words(words: &[Word], thresholds: &SpacingThresholds) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            let gap = word.x0 - words[i - 1].x1;
            out.push_str(spacing_class(gap, thresholds).separator(thresholds));
        }
        out.push_str(&escape_html(&word.text));
    }
    out
}

/// Render one line of words as a `<p>` styled by its geometry.
///
/// Words must already be sorted by `x0`. An empty slice renders nothing.
pub fn render_line(words: &[Word], container_width: f64, policy: &LayoutPolicy) -> String {
    let Some(geometry) = LineGeometry::from_words(words) else {
        return String::new();
    };
    let layout = classify(&geometry, container_width, policy);
    format!(
        "<p style=\"margin:0;{}\">{}</p>",
        layout.style(policy),
        join_words(words, &policy.spacing)
    )
}
