//! In-memory document structures produced by the extraction pipelines.
//!
//! Nothing here outlives a single conversion.

/// A positioned word from a PDF page or an OCR pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
    /// Top edge, measured from the top of the page.
    pub top: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }
}

/// A block-level element of a DOCX body, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// A DOCX paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Resolved style name ("Normal" when the paragraph has none).
    pub style_name: String,
    /// `w:numPr` is present on the paragraph.
    pub has_numbering: bool,
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Plain text of the paragraph: the concatenation of its runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph renders as a list item.
    pub fn is_list_item(&self) -> bool {
        let style = self.style_name.to_lowercase();
        self.has_numbering || style.contains("list") || style.contains("bullet")
    }

    pub fn is_heading(&self) -> bool {
        self.style_name.to_lowercase().starts_with("heading")
    }
}

/// Paragraph alignment as written in `w:jc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
    /// A value with no CSS mapping (`start`, `distribute`, ...).
    Other(String),
}

impl ParagraphAlignment {
    pub fn from_jc(value: &str) -> Self {
        match value {
            "left" => ParagraphAlignment::Left,
            "center" => ParagraphAlignment::Center,
            "right" => ParagraphAlignment::Right,
            "both" | "justify" => ParagraphAlignment::Justify,
            other => ParagraphAlignment::Other(other.to_string()),
        }
    }

    /// CSS `text-align` value, if any.
    pub fn as_css(&self) -> Option<&'static str> {
        match self {
            ParagraphAlignment::Left => Some("left"),
            ParagraphAlignment::Center => Some("center"),
            ParagraphAlignment::Right => Some("right"),
            ParagraphAlignment::Justify => Some("justify"),
            ParagraphAlignment::Other(_) => None,
        }
    }
}

/// Line spacing of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpacing {
    /// Multiple of single spacing.
    Multiple(f64),
    /// Fixed or minimum height in points.
    Points(f64),
}

/// Paragraph-level formatting; lengths are in points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphFormat {
    pub alignment: Option<ParagraphAlignment>,
    /// Negative for a hanging indent.
    pub first_line_indent: Option<f64>,
    pub left_indent: Option<f64>,
    pub right_indent: Option<f64>,
    pub space_before: Option<f64>,
    pub space_after: Option<f64>,
    pub line_spacing: Option<LineSpacing>,
}

/// A span of text sharing one formatting set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// Text; tabs are `'\t'` and breaks are `'\n'`.
    pub text: String,
    pub format: RunFormat,
}

/// Character formatting of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// `#RRGGBB`.
    pub color: Option<String>,
    /// Font size in half-points, as stored in `w:sz`.
    pub size_half_points: Option<u32>,
}

impl RunFormat {
    pub fn size_pt(&self) -> Option<f64> {
        self.size_half_points.map(|hp| hp as f64 / 2.0)
    }
}

/// A DOCX table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table cell; may hold paragraphs and nested tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub grid_span: u32,
    pub blocks: Vec<Block>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            grid_span: 1,
            blocks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(style: &str, numbered: bool) -> Paragraph {
        Paragraph {
            style_name: style.to_string(),
            has_numbering: numbered,
            ..Paragraph::default()
        }
    }

    #[test]
    fn test_list_detection() {
        assert!(paragraph("List Paragraph", false).is_list_item());
        assert!(paragraph("Bullet 2", false).is_list_item());
        assert!(paragraph("Normal", true).is_list_item());
        assert!(!paragraph("Normal", false).is_list_item());
    }

    #[test]
    fn test_heading_detection() {
        assert!(paragraph("heading 1", false).is_heading());
        assert!(paragraph("Heading 2", false).is_heading());
        assert!(!paragraph("Subheading", false).is_heading());
    }

    #[test]
    fn test_alignment_mapping() {
        assert_eq!(ParagraphAlignment::from_jc("both").as_css(), Some("justify"));
        assert_eq!(ParagraphAlignment::from_jc("center").as_css(), Some("center"));
        assert_eq!(ParagraphAlignment::from_jc("start").as_css(), None);
        assert_eq!(ParagraphAlignment::from_jc("distribute").as_css(), None);
    }

    #[test]
    fn test_paragraph_text_joins_runs() {
        let p = Paragraph {
            runs: vec![
                Run {
                    text: "Hello, ".to_string(),
                    ..Run::default()
                },
                Run {
                    text: "world".to_string(),
                    format: RunFormat {
                        bold: true,
                        ..RunFormat::default()
                    },
                },
            ],
            ..Paragraph::default()
        };
        assert_eq!(p.text(), "Hello, world");
    }
}
