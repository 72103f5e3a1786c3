//! `{{ field }}` placeholders in converted documents.
//!
//! Contract templates carry placeholders such as `{{ client_name }}` in
//! their text. After conversion they survive as literal text inside the
//! HTML and can be listed or filled in.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::html::escape_html;

lazy_static! {
    // {{ name }}, whitespace inside the braces optional
    static ref FIELD: Regex = Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").unwrap();
}

/// Distinct field names in order of first appearance.
pub fn find_fields(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    FIELD
        .captures_iter(html)
        .filter_map(|caps| {
            let name = caps[1].to_string();
            seen.insert(name.clone()).then_some(name)
        })
        .collect()
}

/// Replace every placeholder with its HTML-escaped value.
///
/// Placeholders without a value are removed.
pub fn merge_fields(html: &str, values: &BTreeMap<String, String>) -> String {
    FIELD
        .replace_all(html, |caps: &Captures| {
            values
                .get(&caps[1])
                .map(|value| escape_html(value))
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_find_fields_in_order() {
        let html = "<p>{{client}} y {{ provider.name }}</p><p>{{client}} {{fecha-firma}}</p>";
        assert_eq!(find_fields(html), vec!["client", "provider.name", "fecha-firma"]);
    }

    #[test]
    fn test_find_fields_ignores_invalid_names() {
        assert!(find_fields("{{ two words }} {{}} {single}").is_empty());
    }

    #[test]
    fn test_merge_fields_escapes_values() {
        let html = "<p>Cliente: {{ client }}</p>";
        let merged = merge_fields(html, &values(&[("client", "Smith & <Sons>")]));
        assert_eq!(merged, "<p>Cliente: Smith &amp; &lt;Sons&gt;</p>");
    }

    #[test]
    fn test_merge_fields_removes_missing() {
        let html = "<p>{{a}}-{{b}}</p>";
        assert_eq!(merge_fields(html, &values(&[("a", "1")])), "<p>1-</p>");
    }

    #[test]
    fn test_merge_without_placeholders_is_identity() {
        let html = "<p style=\"margin:0;\">{ not a field }</p>";
        assert_eq!(merge_fields(html, &BTreeMap::new()), html);
    }
}
