// src/scan/html.rs
// =============================================================================
// This module extracts hrefs from plain <a> tags found in a source line.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The line is parsed as an HTML fragment. JSX components such as <Link>
// are not <a> elements, so they are left to the attribute matcher.
// =============================================================================

use scraper::{Html, Selector};

// Extracts the href of every <a> tag on a line
//
// Parameters:
//   line: one line of source text (borrowed as &str)
//
// Returns: Vec<String> with each href value exactly as written
//
// Example:
//   line = r#"<p>See <a href="/pricing">pricing</a></p>"#
//   result = ["/pricing"]
pub fn anchor_hrefs(line: &str) -> Vec<String> {
    // Most lines have no anchor at all; skip the parser for those
    if !has_anchor_tag(line) {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(line);

    // Selector::parse only fails on an invalid selector, and this one is a
    // constant that is known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    fragment
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// "<a " or "<a\t", but not "<article" or "<aside"
fn has_anchor_tag(line: &str) -> bool {
    line.match_indices("<a")
        .any(|(idx, _)| matches!(line[idx + 2..].chars().next(), Some(c) if c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_anchor_href() {
        let line = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(anchor_hrefs(line), vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_multiple_anchors_on_one_line() {
        let line = r#"<a href="/docs">Docs</a> | <a class="x" href="/about">About</a>"#;
        assert_eq!(anchor_hrefs(line), vec!["/docs", "/about"]);
    }

    #[test]
    fn test_ignores_components_and_other_tags() {
        assert!(anchor_hrefs(r#"<Link href="/about">About</Link>"#).is_empty());
        assert!(anchor_hrefs(r#"<article href="/nope">"#).is_empty());
        assert!(anchor_hrefs("<a>no href</a>").is_empty());
    }

    #[test]
    fn test_unclosed_anchor_still_found() {
        // the closing tag often sits on a later line
        let line = r#"      <a href="/case-studies" className="btn">"#;
        assert_eq!(anchor_hrefs(line), vec!["/case-studies"]);
    }
}
