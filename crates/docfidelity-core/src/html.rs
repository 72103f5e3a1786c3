//! Small HTML helpers shared by every pipeline.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Two or more consecutive ASCII spaces
    static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();
}

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every run of two or more spaces with as many `&nbsp;`.
///
/// Single spaces are left alone so the browser can still wrap lines.
pub fn preserve_space_runs(text: &str) -> String {
    SPACE_RUN
        .replace_all(text, |caps: &Captures| "&nbsp;".repeat(caps[0].len()))
        .into_owned()
}

/// Format a CSS length: whole numbers without a fraction, others to at most
/// two decimals.
pub fn css_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let mut s = format!("{:.2}", rounded);
        while s.ends_with('0') {
            s.pop();
        }
        s
    }
}

/// Wrap rendered content in a styled `<div>` container.
pub fn container(css: &str, body: &str) -> String {
    if css.is_empty() {
        format!("<div>{}</div>", body)
    } else {
        format!("<div style=\"{}\">{}</div>", css.replace('"', "&quot;"), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_preserve_space_runs() {
        assert_eq!(preserve_space_runs("a b"), "a b");
        assert_eq!(preserve_space_runs("a  b"), "a&nbsp;&nbsp;b");
        assert_eq!(
            preserve_space_runs("Firma:     ____"),
            "Firma:&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;____"
        );
    }

    #[test]
    fn test_css_number() {
        assert_eq!(css_number(12.0), "12");
        assert_eq!(css_number(10.5), "10.5");
        assert_eq!(css_number(1.15), "1.15");
        assert_eq!(css_number(-18.0), "-18");
        assert_eq!(css_number(0.333333), "0.33");
    }

    #[test]
    fn test_container_quotes_css() {
        assert_eq!(
            container("font-family:\"Times\";", "<p>x</p>"),
            "<div style=\"font-family:&quot;Times&quot;;\"><p>x</p></div>"
        );
        assert_eq!(container("", "x"), "<div>x</div>");
    }
}
