//! HTML rendering of parsed DOCX blocks.

use crate::html::{css_number, escape_html, preserve_space_runs};
use crate::models::config::DocxConfig;
use crate::models::document::{
    Block, LineSpacing, Paragraph, ParagraphFormat, Run, Table, TableCell,
};

const TAB_HTML: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";

/// Renders a block sequence as an HTML fragment.
pub struct DocxRenderer<'a> {
    config: &'a DocxConfig,
}

impl<'a> DocxRenderer<'a> {
    pub fn new(config: &'a DocxConfig) -> Self {
        Self { config }
    }

    /// Render top-level blocks.
    ///
    /// Consecutive list items share one `<ul>`; any open list is closed
    /// before a non-list block and at the end.
    pub fn render(&self, blocks: &[Block]) -> String {
        let mut html = String::new();
        let mut in_list = false;

        for block in blocks {
            match block {
                Block::Paragraph(p) if p.is_list_item() => {
                    if !in_list {
                        html.push_str("<ul>");
                        in_list = true;
                    }
                    html.push_str(&format!(
                        "<li{}>{}</li>",
                        style_attr(&p.format),
                        self.paragraph_content(p)
                    ));
                }
                Block::Paragraph(p) => {
                    if in_list {
                        html.push_str("</ul>");
                        in_list = false;
                    }
                    let tag = if p.is_heading() { "h2" } else { "p" };
                    html.push_str(&format!(
                        "<{tag}{}>{}</{tag}>",
                        style_attr(&p.format),
                        self.paragraph_content(p)
                    ));
                }
                Block::Table(table) => {
                    if in_list {
                        html.push_str("</ul>");
                        in_list = false;
                    }
                    html.push_str(&self.render_table(table));
                }
            }
        }

        if in_list {
            html.push_str("</ul>");
        }
        html
    }

    fn render_table(&self, table: &Table) -> String {
        let mut html = format!(
            "<table border='{}' style='border-collapse:collapse;margin:10px 0;'>",
            self.config.table_border
        );
        for row in &table.rows {
            html.push_str("<tr>");
            for cell in &row.cells {
                html.push_str(&self.render_cell(cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }

    fn render_cell(&self, cell: &TableCell) -> String {
        let open = if cell.grid_span > 1 {
            format!("<td colspan='{}'>", cell.grid_span)
        } else {
            "<td>".to_string()
        };

        let is_empty = cell.blocks.iter().all(|b| match b {
            Block::Paragraph(p) => p.runs.iter().all(|r| r.text.is_empty()),
            Block::Table(_) => false,
        });
        if is_empty {
            return format!("{}&nbsp;</td>", open);
        }

        let mut html = open;
        for block in &cell.blocks {
            match block {
                Block::Paragraph(p) => html.push_str(&format!(
                    "<div{}>{}</div>",
                    style_attr(&p.format),
                    self.paragraph_content(p)
                )),
                Block::Table(table) => html.push_str(&self.render_table(table)),
            }
        }
        html.push_str("</td>");
        html
    }

    fn paragraph_content(&self, p: &Paragraph) -> String {
        let content: String = p.runs.iter().map(|r| self.render_run(r)).collect();
        if content.is_empty() {
            "&nbsp;".to_string()
        } else {
            content
        }
    }

    /// Render one run; wrappers nest as strong, em, u, color, size from
    /// the inside out.
    pub fn render_run(&self, run: &Run) -> String {
        if run.text.is_empty() {
            return String::new();
        }

        let mut text = escape_html(&run.text);
        if self.config.preserve_spaces {
            text = preserve_space_runs(&text);
        }
        let mut html = text.replace('\t', TAB_HTML).replace('\n', "<br>");

        let format = &run.format;
        if format.bold {
            html = format!("<strong>{}</strong>", html);
        }
        if format.italic {
            html = format!("<em>{}</em>", html);
        }
        if format.underline {
            html = format!("<u>{}</u>", html);
        }
        if let Some(color) = &format.color {
            html = format!("<span style=\"color:{};\">{}</span>", color, html);
        }
        if let Some(size) = format.size_pt() {
            html = format!(
                "<span style=\"font-size:{}pt;\">{}</span>",
                css_number(size),
                html
            );
        }
        html
    }
}

/// ` style="..."` for a paragraph, or nothing when every value is default.
fn style_attr(format: &ParagraphFormat) -> String {
    let style = [
        alignment_style(format),
        indentation_style(format),
        spacing_style(format),
        line_height_style(format),
    ]
    .concat();

    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", style)
    }
}

fn alignment_style(format: &ParagraphFormat) -> String {
    format
        .alignment
        .as_ref()
        .and_then(|a| a.as_css())
        .map(|css| format!("text-align:{};", css))
        .unwrap_or_default()
}

fn indentation_style(format: &ParagraphFormat) -> String {
    let mut style = String::new();
    push_length(&mut style, "text-indent", format.first_line_indent);
    push_length(&mut style, "margin-left", format.left_indent);
    push_length(&mut style, "margin-right", format.right_indent);
    style
}

fn spacing_style(format: &ParagraphFormat) -> String {
    let mut style = String::new();
    push_length(&mut style, "margin-top", format.space_before);
    push_length(&mut style, "margin-bottom", format.space_after);
    style
}

fn line_height_style(format: &ParagraphFormat) -> String {
    match format.line_spacing {
        Some(LineSpacing::Multiple(m)) if m > 0.0 && (m - 1.0).abs() > f64::EPSILON => {
            format!("line-height:{};", css_number(m))
        }
        Some(LineSpacing::Points(pt)) if pt > 0.0 => format!("line-height:{}pt;", css_number(pt)),
        _ => String::new(),
    }
}

fn push_length(style: &mut String, property: &str, value: Option<f64>) {
    if let Some(pt) = value.filter(|v| *v != 0.0) {
        style.push_str(&format!("{}:{}pt;", property, css_number(pt)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{ParagraphAlignment, RunFormat, TableRow};
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> Run {
        Run {
            text: text.to_string(),
            format: RunFormat::default(),
        }
    }

    fn para(style: &str, text: &str) -> Block {
        Block::Paragraph(Paragraph {
            style_name: style.to_string(),
            runs: vec![run(text)],
            ..Paragraph::default()
        })
    }

    fn render(blocks: &[Block]) -> String {
        DocxRenderer::new(&DocxConfig::default()).render(blocks)
    }

    #[test]
    fn test_plain_paragraph_has_no_style_attribute() {
        assert_eq!(render(&[para("Normal", "Hola")]), "<p>Hola</p>");
    }

    #[test]
    fn test_heading_paragraph() {
        assert_eq!(render(&[para("Heading 1", "Title")]), "<h2>Title</h2>");
    }

    #[test]
    fn test_single_list_item_is_wrapped() {
        assert_eq!(
            render(&[para("List Paragraph", "only")]),
            "<ul><li>only</li></ul>"
        );
    }

    #[test]
    fn test_five_list_items_share_one_list() {
        let mut blocks = vec![para("Normal", "intro")];
        for i in 0..5 {
            blocks.push(para("List Bullet", &format!("item {}", i)));
        }
        blocks.push(para("Normal", "outro"));

        let html = render(&blocks);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("</ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 5);
        assert!(html.starts_with("<p>intro</p><ul><li>item 0</li>"));
        assert!(html.ends_with("<li>item 4</li></ul><p>outro</p>"));
    }

    #[test]
    fn test_list_closed_before_table_and_reopened() {
        let table = Block::Table(Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    grid_span: 1,
                    blocks: vec![para("Normal", "c")],
                }],
            }],
        });
        let html = render(&[para("List", "a"), table, para("List", "b")]);
        assert_eq!(
            html,
            "<ul><li>a</li></ul>\
             <table border='1' style='border-collapse:collapse;margin:10px 0;'><tr><td><div>c</div></td></tr></table>\
             <ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_empty_cell_renders_nbsp() {
        let table = Block::Table(Table {
            rows: vec![TableRow {
                cells: vec![
                    TableCell::default(),
                    TableCell {
                        grid_span: 1,
                        blocks: vec![Block::Paragraph(Paragraph::default())],
                    },
                    TableCell {
                        grid_span: 3,
                        blocks: vec![para("Normal", "x"), para("Normal", "y")],
                    },
                ],
            }],
        });
        assert_eq!(
            render(&[table]),
            "<table border='1' style='border-collapse:collapse;margin:10px 0;'><tr>\
             <td>&nbsp;</td><td>&nbsp;</td><td colspan='3'><div>x</div><div>y</div></td>\
             </tr></table>"
        );
    }

    #[test]
    fn test_run_wrapping_order() {
        let config = DocxConfig::default();
        let renderer = DocxRenderer::new(&config);
        let r = Run {
            text: "Firma".to_string(),
            format: RunFormat {
                bold: true,
                italic: true,
                underline: true,
                color: Some("#1F3864".to_string()),
                size_half_points: Some(21),
            },
        };
        let expected = "<span style=\"font-size:10.5pt;\"><span style=\"color:#1F3864;\">\
                        <u><em><strong>Firma</strong></em></u></span></span>";
        assert_eq!(renderer.render_run(&r), expected);
        assert_eq!(renderer.render_run(&r), expected);
    }

    #[test]
    fn test_run_text_escaping_and_whitespace() {
        let config = DocxConfig::default();
        let renderer = DocxRenderer::new(&config);
        assert_eq!(
            renderer.render_run(&run("A  &  B\tC\nD")),
            "A&nbsp;&nbsp;&amp;&nbsp;&nbsp;B&nbsp;&nbsp;&nbsp;&nbsp;C<br>D"
        );
        assert_eq!(renderer.render_run(&run("")), "");
    }

    #[test]
    fn test_spaces_collapse_when_not_preserved() {
        let config = DocxConfig {
            preserve_spaces: false,
            ..DocxConfig::default()
        };
        assert_eq!(DocxRenderer::new(&config).render_run(&run("a  b")), "a  b");
    }

    #[test]
    fn test_paragraph_style_extractors() {
        let p = Block::Paragraph(Paragraph {
            style_name: "Normal".to_string(),
            format: ParagraphFormat {
                alignment: Some(ParagraphAlignment::Center),
                first_line_indent: Some(-18.0),
                left_indent: Some(36.0),
                right_indent: Some(0.0),
                space_before: Some(12.0),
                space_after: None,
                line_spacing: Some(LineSpacing::Multiple(1.15)),
            },
            runs: vec![run("x")],
            ..Paragraph::default()
        });
        assert_eq!(
            render(&[p]),
            "<p style=\"text-align:center;text-indent:-18pt;margin-left:36pt;margin-top:12pt;line-height:1.15;\">x</p>"
        );
    }

    #[test]
    fn test_single_line_spacing_is_default() {
        let p = Block::Paragraph(Paragraph {
            format: ParagraphFormat {
                line_spacing: Some(LineSpacing::Multiple(1.0)),
                ..ParagraphFormat::default()
            },
            runs: vec![run("x")],
            ..Paragraph::default()
        });
        assert_eq!(render(&[p]), "<p>x</p>");
    }

    #[test]
    fn test_unmapped_alignment_is_ignored() {
        let p = Block::Paragraph(Paragraph {
            format: ParagraphFormat {
                alignment: Some(ParagraphAlignment::Other("start".to_string())),
                space_after: Some(6.0),
                ..ParagraphFormat::default()
            },
            runs: vec![run("x")],
            ..Paragraph::default()
        });
        assert_eq!(render(&[p]), "<p style=\"margin-bottom:6pt;\">x</p>");
    }

    #[test]
    fn test_empty_paragraph_keeps_its_line() {
        assert_eq!(render(&[para("Normal", "")]), "<p>&nbsp;</p>");
    }
}
