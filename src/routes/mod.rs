// src/routes/mod.rs
// =============================================================================
// Routes known to the application, derived from the routing directory.
//
// Submodules:
// - extract: walks the routing tree
// - pattern: route patterns and dynamic-segment matchers
// =============================================================================

mod extract;
mod pattern;

use std::collections::BTreeSet;

pub use extract::extract_routes;
pub use pattern::{RouteMatcher, RoutePattern};

/// The set of route patterns found in one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteSet {
    patterns: BTreeSet<RoutePattern>,
}

impl RouteSet {
    pub fn insert(&mut self, pattern: RoutePattern) -> bool {
        self.patterns.insert(pattern)
    }

    /// Exact membership of a normalized link.
    pub fn contains(&self, link: &str) -> bool {
        self.patterns.contains(link)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutePattern> {
        self.patterns.iter()
    }

    /// Only the patterns with `:name` segments.
    pub fn dynamic(&self) -> impl Iterator<Item = &RoutePattern> {
        self.patterns.iter().filter(|p| p.is_dynamic())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<RoutePattern> for RouteSet {
    fn from_iter<I: IntoIterator<Item = RoutePattern>>(iter: I) -> Self {
        RouteSet {
            patterns: iter.into_iter().collect(),
        }
    }
}
