//! DOCX processing module.
//!
//! Walks the document body in source order and renders paragraphs, lists
//! and tables with their inline formatting.

mod parser;
mod render;

pub use parser::parse_document;
pub use render::DocxRenderer;

use crate::error::DocxError;
use crate::models::config::DocxConfig;
use tracing::debug;

/// DOCX to HTML converter.
pub struct DocxConverter {
    config: DocxConfig,
}

impl DocxConverter {
    pub fn new(config: DocxConfig) -> Self {
        Self { config }
    }

    /// Convert a DOCX package to an HTML fragment.
    pub fn convert(&self, data: &[u8]) -> Result<String, DocxError> {
        let blocks = parse_document(data)?;
        let html = DocxRenderer::new(&self.config).render(&blocks);
        debug!("Rendered DOCX: {} blocks, {} bytes of HTML", blocks.len(), html.len());
        Ok(html)
    }
}

impl Default for DocxConverter {
    fn default() -> Self {
        Self::new(DocxConfig::default())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    pub fn build_zip(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{body}</w:body></w:document>"#
        )
    }

    /// A minimal DOCX whose body holds `body` (WML with the `w:` prefix).
    pub fn build_docx(body: &str) -> Vec<u8> {
        let document = document_xml(body);
        build_zip(&[("word/document.xml", document.as_str())])
    }

    pub fn build_docx_with_styles(body: &str, styles: &str) -> Vec<u8> {
        let document = document_xml(body);
        let styles_xml = format!(r#"<w:styles xmlns:w="{W_NS}">{styles}</w:styles>"#);
        build_zip(&[
            ("word/document.xml", document.as_str()),
            ("word/styles.xml", styles_xml.as_str()),
        ])
    }
}
