//! Alignment and indentation of a single line.

use super::LayoutPolicy;
use crate::models::document::Word;

/// Horizontal alignment inferred for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        }
    }
}

/// Horizontal extent of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    /// Left edge of the first word.
    pub start: f64,
    /// Right edge of the last word.
    pub end: f64,
    /// Number of words on the line.
    pub word_count: usize,
    /// Whether the line text ends with `:`.
    pub trailing_colon: bool,
}

impl LineGeometry {
    pub fn new(start: f64, end: f64, word_count: usize) -> Self {
        Self {
            start,
            end,
            word_count,
            trailing_colon: false,
        }
    }

    pub fn with_trailing_colon(mut self, trailing_colon: bool) -> Self {
        self.trailing_colon = trailing_colon;
        self
    }

    /// Geometry of x-ordered words; `None` for an empty line.
    pub fn from_words(words: &[Word]) -> Option<Self> {
        let first = words.first()?;
        let last = words.last()?;
        let end = words.iter().map(|w| w.x1).fold(last.x1, f64::max);
        Some(
            Self::new(first.x0, end, words.len())
                .with_trailing_colon(last.text.trim_end().ends_with(':')),
        )
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Classification of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineLayout {
    pub alignment: Alignment,
    /// Indentation steps; always 0 for centered lines.
    pub indent_level: u32,
}

impl LineLayout {
    pub fn is_centered(&self) -> bool {
        self.alignment == Alignment::Center
    }

    pub fn should_justify(&self) -> bool {
        self.alignment == Alignment::Justify
    }

    /// Inline CSS for the line, without the surrounding `style="..."`.
    pub fn style(&self, policy: &LayoutPolicy) -> String {
        let mut style = format!("text-align:{};", self.alignment.as_css());
        if self.is_centered() {
            if policy.center_as_heading {
                style.push_str("font-weight:bold;");
            }
        } else if self.indent_level > 0 {
            style.push_str(&format!(
                "margin-left:{}px;",
                self.indent_level * policy.indent_step_px
            ));
        }
        style
    }
}

/// Decide alignment and indentation of a line within a container.
pub fn classify(line: &LineGeometry, container_width: f64, policy: &LayoutPolicy) -> LineLayout {
    let margin_left = line.start;

    if container_width > 0.0 {
        let margin_right = container_width - line.end;
        let min_margin = policy.center_min_margin_ratio * container_width;
        let centered = margin_left > min_margin
            && margin_right > min_margin
            && (margin_left - margin_right).abs() < policy.center_max_offset_ratio * container_width
            && line.width() < policy.center_max_width_ratio * container_width;
        if centered {
            return LineLayout {
                alignment: Alignment::Center,
                indent_level: 0,
            };
        }
    }

    let indent_level = if margin_left > policy.indent_threshold && policy.indent_unit > 0.0 {
        (margin_left / policy.indent_unit).floor() as u32
    } else {
        0
    };

    let justify = container_width > 0.0
        && line.width() > policy.justify_min_width_ratio * container_width
        && line.word_count > policy.justify_min_words
        && !line.trailing_colon;

    LineLayout {
        alignment: if justify {
            Alignment::Justify
        } else {
            Alignment::Left
        },
        indent_level,
    }
}
