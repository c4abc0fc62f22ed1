// src/checker/internal.rs
// =============================================================================
// Internal link validation.
//
// Each distinct internal link is resolved in this order:
// 1. still a template (has `/:name` or `[name]`)  -> skipped, never broken
// 2. exact route                                  -> resolved
// 3. matches a dynamic route                       -> resolved
// 4. names a file under the public asset root      -> resolved
// 5. otherwise                                     -> broken
// =============================================================================

use std::path::{Component, Path};

use serde::Serialize;
use tracing::{debug, warn};

use crate::routes::{RouteMatcher, RoutePattern, RouteSet};
use crate::scan::{LinkIndex, LinkOccurrence};

/// How an internal link was (or was not) resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Built from a route template; can't be checked statically.
    Template,
    Route,
    Pattern(RoutePattern),
    Asset,
    Unresolved,
}

impl Resolution {
    pub fn is_broken(&self) -> bool {
        matches!(self, Resolution::Unresolved)
    }
}

/// An internal link with no matching route or asset.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    pub link: String,
    pub occurrences: Vec<LinkOccurrence>,
}

/// Resolver for one run: the route set plus its compiled dynamic matchers.
pub struct InternalResolver<'a> {
    routes: &'a RouteSet,
    matchers: Vec<RouteMatcher>,
    public_dir: &'a Path,
}

impl<'a> InternalResolver<'a> {
    pub fn new(routes: &'a RouteSet, public_dir: &'a Path) -> Self {
        let matchers = routes
            .dynamic()
            .filter_map(|pattern| match RouteMatcher::compile(pattern) {
                Ok(matcher) => Some(matcher),
                Err(err) => {
                    warn!(route = %pattern, error = %err, "ignoring route with invalid matcher");
                    None
                }
            })
            .collect();

        Self {
            routes,
            matchers,
            public_dir,
        }
    }

    pub fn resolve(&self, link: &str) -> Resolution {
        if is_template(link) {
            return Resolution::Template;
        }
        if self.routes.contains(link) {
            return Resolution::Route;
        }
        if let Some(matcher) = self.matchers.iter().find(|m| m.is_match(link)) {
            return Resolution::Pattern(matcher.pattern.clone());
        }
        if public_asset_exists(self.public_dir, link) {
            return Resolution::Asset;
        }
        Resolution::Unresolved
    }
}

/// Returns every unresolved internal link with all of its occurrences.
pub fn validate_internal(index: &LinkIndex, routes: &RouteSet, public_dir: &Path) -> Vec<BrokenLink> {
    let resolver = InternalResolver::new(routes, public_dir);

    index
        .internal
        .iter()
        .filter(|(link, _)| {
            let resolution = resolver.resolve(link);
            debug!(link = %link, ?resolution, "internal link");
            resolution.is_broken()
        })
        .map(|(link, occurrences)| BrokenLink {
            link: link.clone(),
            occurrences: occurrences.clone(),
        })
        .collect()
}

fn is_template(link: &str) -> bool {
    link.contains("/:") || link.contains('[')
}

// Only plain path segments are joined onto the public root, so a link
// like "/../secrets" can't resolve to a file outside it
fn public_asset_exists(public_dir: &Path, link: &str) -> bool {
    let relative = Path::new(link.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return false;
    }
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return false;
    }
    public_dir.join(relative).is_file()
}
