// src/routes/pattern.rs
// =============================================================================
// Route patterns and their matchers.
//
// Directory name          Pattern segment   Matches
// ---------------------   ---------------   ------------------------
// about                   about             "about"
// [slug]                  :slug             exactly one segment
// [...slug]               :slug*            one or more segments
// [[...slug]]             :slug*?           zero or more segments
// (marketing)             (none)            route group, no segment
// @modal                  (none)            parallel slot, no segment
// =============================================================================

use std::borrow::Borrow;
use std::fmt;

use regex::Regex;
use serde::Serialize;

/// A normalized route such as `/`, `/about` or `/blog/:slug`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoutePattern(String);

impl RoutePattern {
    /// Joins already-converted segments; no segments means `/`.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(segment.as_ref());
        }
        if path.is_empty() {
            path.push('/');
        }
        RoutePattern(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if any segment is a `:name` placeholder.
    pub fn is_dynamic(&self) -> bool {
        self.0.split('/').any(|segment| segment.starts_with(':'))
    }
}

// Lets the route set look patterns up by &str
impl Borrow<str> for RoutePattern {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts one routing directory name into its pattern segment.
///
/// Returns `None` for directories that exist only for organization
/// (route groups and parallel-route slots).
pub fn dir_segment(name: &str) -> Option<String> {
    if let Some(inner) = name.strip_prefix("[[...").and_then(|s| s.strip_suffix("]]")) {
        return Some(format!(":{inner}*?"));
    }
    if let Some(inner) = name.strip_prefix("[...").and_then(|s| s.strip_suffix(']')) {
        return Some(format!(":{inner}*"));
    }
    if let Some(inner) = name.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Some(format!(":{inner}"));
    }
    if (name.starts_with('(') && name.ends_with(')')) || name.starts_with('@') {
        return None;
    }
    Some(name.to_string())
}

/// Anchored matcher for a dynamic route.
#[derive(Debug)]
pub struct RouteMatcher {
    pub pattern: RoutePattern,
    regex: Regex,
}

impl RouteMatcher {
    pub fn compile(pattern: &RoutePattern) -> Result<Self, regex::Error> {
        let mut source = String::from("^");
        for segment in pattern.as_str().split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(name) if name.ends_with("*?") => source.push_str("(?:/.+)?"),
                Some(name) if name.ends_with('*') => source.push_str("/.+"),
                Some(_) => source.push_str("/[^/]+"),
                None => {
                    source.push('/');
                    source.push_str(&regex::escape(segment));
                }
            }
        }
        // lets an optional catch-all at the root accept "/"
        source.push_str("/?$");

        Ok(RouteMatcher {
            pattern: pattern.clone(),
            regex: Regex::new(&source)?,
        })
    }

    pub fn is_match(&self, link: &str) -> bool {
        self.regex.is_match(link)
    }
}
