//! Tesseract TSV output parsing.
//!
//! Columns: level, page_num, block_num, par_num, line_num, word_num, left,
//! top, width, height, conf, text. Only word rows (level 5) are kept.

use super::{OcrWord, Result};
use crate::error::OcrError;
use std::str::FromStr;

const WORD_LEVEL: &str = "5";
const COLUMNS: usize = 12;

/// Parse TSV rows into word rows, in engine order.
pub fn parse_tsv(tsv: &str) -> Result<Vec<OcrWord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(tsv.as_bytes());

    let mut words = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| OcrError::Output(e.to_string()))?;
        // Header row, page/block/paragraph/line rows
        if record.get(0) != Some(WORD_LEVEL) {
            continue;
        }
        if record.len() < COLUMNS - 1 {
            return Err(OcrError::Output(format!(
                "row {} has {} columns, expected {}",
                index + 1,
                record.len(),
                COLUMNS
            )));
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        words.push(OcrWord {
            block_num: number(field(2), index)?,
            par_num: number(field(3), index)?,
            line_num: number(field(4), index)?,
            word_num: number(field(5), index)?,
            left: number(field(6), index)?,
            top: number(field(7), index)?,
            width: number(field(8), index)?,
            height: number(field(9), index)?,
            conf: number(field(10), index)?,
            text: field(11).to_string(),
        });
    }
    Ok(words)
}

fn number<T: FromStr>(value: &str, index: usize) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| OcrError::Output(format!("row {}: invalid number '{}'", index + 1, value)))
}
