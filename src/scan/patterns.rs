// src/scan/patterns.rs
// =============================================================================
// Line matchers.
//
// Each matcher looks at one line of source text and returns every string
// it recognizes as a link target. Matchers are plain functions with no
// shared state, so they can be tested one at a time and run in any order.
// The scanner applies all of them to every line; if two matchers find the
// same string both hits are recorded.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::html::anchor_hrefs;
use super::markdown::markdown_links;

/// One extraction strategy.
pub struct Matcher {
    pub name: &'static str,
    pub extract: fn(&str) -> Vec<String>,
    /// Only applied to Markdown/MDX files.
    pub markdown_only: bool,
}

/// All matchers, in the order they are applied.
pub const MATCHERS: &[Matcher] = &[
    Matcher { name: "href", extract: attribute_links, markdown_only: false },
    Matcher { name: "src", extract: asset_sources, markdown_only: false },
    Matcher { name: "navigation", extract: navigation_calls, markdown_only: false },
    Matcher { name: "anchor", extract: anchor_hrefs, markdown_only: false },
    Matcher { name: "location", extract: location_assignments, markdown_only: false },
    Matcher { name: "markdown", extract: markdown_links, markdown_only: true },
];

// href="..." | href='...' | href={"..."} | href={`...`}
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bhref\s*=\s*\{?\s*["'`]([^"'`]+)["'`]"#).expect("valid href regex")
});

static SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bsrc\s*=\s*\{?\s*["'`]([^"'`]+)["'`]"#).expect("valid src regex")
});

// router.push("/x"), redirect("/x"), permanentRedirect("/x"), navigate("/x")
static NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:router\.(?:push|replace|prefetch)|redirect|permanentRedirect|navigate)\(\s*["'`]([^"'`]+)["'`]"#,
    )
    .expect("valid navigation regex")
});

// window.location = "/x", location.href = "/x", window.location.assign("/x")
// A bare `location = ...` is a local variable, not navigation.
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:window\.location(?:\.href)?\s*=\s*|location\.href\s*=\s*|(?:window\.)?location\.(?:assign|replace)\(\s*)["'`]([^"'`]+)["'`]"#,
    )
    .expect("valid location regex")
});

fn captures(regex: &Regex, line: &str) -> Vec<String> {
    regex
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `href` attributes on any element or component.
pub fn attribute_links(line: &str) -> Vec<String> {
    captures(&HREF, line)
}

/// `src` attributes (images, scripts, iframes, media).
pub fn asset_sources(line: &str) -> Vec<String> {
    captures(&SRC, line)
}

/// Router and server-side redirect calls with a literal target.
pub fn navigation_calls(line: &str) -> Vec<String> {
    captures(&NAVIGATION, line)
}

/// Assignments to `window.location`, plus `assign` / `replace` calls.
pub fn location_assignments(line: &str) -> Vec<String> {
    captures(&LOCATION, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_links_all_quote_styles() {
        assert_eq!(attribute_links(r#"<Link href="/about">"#), vec!["/about"]);
        assert_eq!(attribute_links("<Link href='/about'>"), vec!["/about"]);
        assert_eq!(attribute_links(r#"<Link href={"/about"}>"#), vec!["/about"]);
        assert_eq!(attribute_links("<Link href={`/blog/${slug}`}>"), vec!["/blog/${slug}"]);
        assert!(attribute_links("<Link href={item.href}>").is_empty());
    }

    #[test]
    fn test_attribute_links_multiple_per_line() {
        let line = r#"<a href="/a">A</a> <a href="https://example.org">B</a>"#;
        assert_eq!(attribute_links(line), vec!["/a", "https://example.org"]);
    }

    #[test]
    fn test_asset_sources() {
        let line = r#"<Image src="/images/logo.png" alt="logo" />"#;
        assert_eq!(asset_sources(line), vec!["/images/logo.png"]);
        assert!(asset_sources("const source = 1").is_empty());
    }

    #[test]
    fn test_navigation_calls() {
        assert_eq!(navigation_calls(r#"router.push("/contact")"#), vec!["/contact"]);
        assert_eq!(navigation_calls("router.replace('/th')"), vec!["/th"]);
        assert_eq!(navigation_calls(r#"redirect("/login")"#), vec!["/login"]);
        assert_eq!(navigation_calls(r#"permanentRedirect("/new")"#), vec!["/new"]);
        assert!(navigation_calls("router.back()").is_empty());
    }

    #[test]
    fn test_location_assignments() {
        assert_eq!(location_assignments(r#"window.location.href = "/thanks";"#), vec!["/thanks"]);
        assert_eq!(location_assignments("window.location = '/'"), vec!["/"]);
        assert_eq!(location_assignments(r#"location.assign("/x")"#), vec!["/x"]);
        assert_eq!(location_assignments(r#"location.href = "/y""#), vec!["/y"]);
        // comparisons are not navigation
        assert!(location_assignments(r#"if (location.href == "/x") {}"#).is_empty());
    }

    #[test]
    fn test_location_variable_is_not_navigation() {
        assert!(location_assignments(r#"const location = "/not-a-link";"#).is_empty());
        assert!(location_assignments("let location = '/also-not';").is_empty());
        assert!(location_assignments(r#"location = "/bare""#).is_empty());
    }

    #[test]
    fn test_matcher_order_is_stable() {
        let names: Vec<_> = MATCHERS.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["href", "src", "navigation", "anchor", "location", "markdown"]);
    }
}
