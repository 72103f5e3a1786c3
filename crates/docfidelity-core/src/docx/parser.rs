//! WordprocessingML parsing into [`Block`]s.

use crate::error::DocxError;
use crate::models::document::{
    Block, LineSpacing, Paragraph, ParagraphAlignment, ParagraphFormat, Run, RunFormat, Table,
    TableCell, TableRow,
};
use roxmltree::Node;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::{debug, warn};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Style id to display name, from `word/styles.xml`.
type StyleNames = HashMap<String, String>;

/// Parse the body of a DOCX package into blocks in document order.
pub fn parse_document(data: &[u8]) -> Result<Vec<Block>, DocxError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(data)).map_err(|e| DocxError::Archive(e.to_string()))?;

    let document_xml = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or(DocxError::MissingPart(DOCUMENT_PART))?;
    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => parse_style_names(&xml),
        None => StyleNames::new(),
    };

    let doc = roxmltree::Document::parse(&document_xml).map_err(|e| DocxError::Xml {
        part: DOCUMENT_PART,
        message: e.to_string(),
    })?;

    let Some(body) = wml(doc.root_element(), "body") else {
        return Err(DocxError::Xml {
            part: DOCUMENT_PART,
            message: "missing w:body".to_string(),
        });
    };

    let mut blocks = Vec::new();
    collect_blocks(body, &styles, &mut blocks);
    debug!("Parsed {} top-level blocks", blocks.len());
    Ok(blocks)
}

fn read_part(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    name: &'static str,
) -> Result<Option<String>, DocxError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(DocxError::Archive(e.to_string())),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| DocxError::Archive(format!("{}: {}", name, e)))?;
    Ok(Some(content))
}

fn parse_style_names(xml: &str) -> StyleNames {
    let Ok(doc) = roxmltree::Document::parse(xml) else {
        warn!("Ignoring unparseable {}", STYLES_PART);
        return StyleNames::new();
    };

    doc.root_element()
        .children()
        .filter(|n| is_wml(*n, "style"))
        .filter_map(|style| {
            let id = style.attribute((WML_NS, "styleId"))?;
            let name = wml_attr(style, "name")?;
            Some((id.to_string(), name.to_string()))
        })
        .collect()
}

fn is_wml(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn wml<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_wml(*n, name))
}

fn wml_attr<'a, 'input>(node: Node<'a, 'input>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// Toggle property: present without `w:val`, or with a truthy one.
fn wml_bool(parent: Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false" && v != "off")
    })
}

fn twips_attr(node: Node, attr: &str) -> Option<f64> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f64>().ok())
        .map(|twips| twips / 20.0)
}

fn collect_blocks(parent: Node, styles: &StyleNames, out: &mut Vec<Block>) {
    for child in parent.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "p" => out.push(Block::Paragraph(parse_paragraph(child, styles))),
            "tbl" => out.push(Block::Table(parse_table(child, styles))),
            "sdt" => {
                if let Some(content) = wml(child, "sdtContent") {
                    collect_blocks(content, styles, out);
                }
            }
            "customXml" => collect_blocks(child, styles, out),
            _ => {}
        }
    }
}

fn parse_paragraph(p: Node, styles: &StyleNames) -> Paragraph {
    let ppr = wml(p, "pPr");

    let style_name = match ppr.and_then(|ppr| wml_attr(ppr, "pStyle")) {
        Some(id) => styles.get(id).cloned().unwrap_or_else(|| id.to_string()),
        None => "Normal".to_string(),
    };

    // numId 0 explicitly removes inherited numbering; pPrChange holds
    // the pre-revision properties and is ignored
    let has_numbering = ppr
        .and_then(|ppr| wml(ppr, "numPr"))
        .is_some_and(|num_pr| wml_attr(num_pr, "numId") != Some("0"));

    let mut runs = Vec::new();
    collect_runs(p, &mut runs);

    Paragraph {
        style_name,
        has_numbering,
        format: ppr.map(parse_paragraph_format).unwrap_or_default(),
        runs,
    }
}

fn parse_paragraph_format(ppr: Node) -> ParagraphFormat {
    let mut format = ParagraphFormat {
        alignment: wml_attr(ppr, "jc").map(ParagraphAlignment::from_jc),
        ..ParagraphFormat::default()
    };

    if let Some(ind) = wml(ppr, "ind") {
        format.first_line_indent = twips_attr(ind, "firstLine")
            .or_else(|| twips_attr(ind, "hanging").map(|h| -h));
        format.left_indent = twips_attr(ind, "left").or_else(|| twips_attr(ind, "start"));
        format.right_indent = twips_attr(ind, "right").or_else(|| twips_attr(ind, "end"));
    }

    if let Some(spacing) = wml(ppr, "spacing") {
        format.space_before = twips_attr(spacing, "before");
        format.space_after = twips_attr(spacing, "after");
        if let Some(line) = spacing
            .attribute((WML_NS, "line"))
            .and_then(|v| v.parse::<f64>().ok())
        {
            format.line_spacing = match spacing.attribute((WML_NS, "lineRule")) {
                Some("exact") | Some("atLeast") => Some(LineSpacing::Points(line / 20.0)),
                _ => Some(LineSpacing::Multiple(line / 240.0)),
            };
        }
    }

    format
}

/// Gather runs in reading order, descending into inline containers.
fn collect_runs(parent: Node, out: &mut Vec<Run>) {
    for child in parent.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "r" => out.push(parse_run(child)),
            "hyperlink" | "ins" | "smartTag" | "fldSimple" | "customXml" | "moveTo" => {
                collect_runs(child, out)
            }
            "sdt" => {
                if let Some(content) = wml(child, "sdtContent") {
                    collect_runs(content, out);
                }
            }
            _ => {}
        }
    }
}

fn parse_run(r: Node) -> Run {
    let format = wml(r, "rPr").map(parse_run_format).unwrap_or_default();

    let mut text = String::new();
    for child in r.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or("")),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }

    Run { text, format }
}

fn parse_run_format(rpr: Node) -> RunFormat {
    let underline = wml(rpr, "u")
        .is_some_and(|u| u.attribute((WML_NS, "val")).is_none_or(|v| v != "none"));

    let color = wml_attr(rpr, "color")
        .filter(|c| c.len() == 6 && c.chars().all(|ch| ch.is_ascii_hexdigit()))
        .map(|c| format!("#{}", c.to_ascii_uppercase()));

    RunFormat {
        bold: wml_bool(rpr, "b").unwrap_or(false),
        italic: wml_bool(rpr, "i").unwrap_or(false),
        underline,
        color,
        size_half_points: wml_attr(rpr, "sz").and_then(|v| v.parse().ok()),
    }
}

fn parse_table(tbl: Node, styles: &StyleNames) -> Table {
    let mut rows = Vec::new();
    for tr in table_parts(tbl, "tr") {
        let cells: Vec<TableCell> = table_parts(tr, "tc")
            .into_iter()
            .map(|tc| parse_cell(tc, styles))
            .collect();
        if cells.is_empty() {
            warn!("Skipping table row without cells");
            continue;
        }
        rows.push(TableRow { cells });
    }
    Table { rows }
}

/// Children named `name`, descending through content controls and custom
/// XML wrappers in place.
fn table_parts<'a, 'input>(parent: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    let mut found = Vec::new();
    for child in parent.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            n if n == name => found.push(child),
            "sdt" => {
                if let Some(content) = wml(child, "sdtContent") {
                    found.extend(table_parts(content, name));
                }
            }
            "customXml" => found.extend(table_parts(child, name)),
            _ => {}
        }
    }
    found
}

fn parse_cell(tc: Node, styles: &StyleNames) -> TableCell {
    let grid_span = wml(tc, "tcPr")
        .and_then(|pr| wml_attr(pr, "gridSpan"))
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);

    let mut blocks = Vec::new();
    collect_blocks(tc, styles, &mut blocks);
    TableCell { grid_span, blocks }
}
