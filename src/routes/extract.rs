// src/routes/extract.rs
// =============================================================================
// Route extraction from a file-based routing tree.
//
// Walk the routing directory; every `page.*` or `route.*` file marks the
// directory that holds it as a route. The route pattern is built from the
// directory names between the routing root and that file.
//
// Never descended into:
// - `api` directly under the routing root (API handlers are not pages)
// - `_private` folders
// - hidden folders
// =============================================================================

use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::pattern::{dir_segment, RoutePattern};
use super::RouteSet;

const ROUTE_FILE_STEMS: &[&str] = &["page", "route"];

// Boundary files wrap a route but never define one
const BOUNDARY_FILE_STEMS: &[&str] = &[
    "not-found",
    "layout",
    "loading",
    "error",
    "global-error",
    "template",
    "default",
];

const ROUTE_FILE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "md", "mdx"];

/// Builds the route set for the routing tree at `app_dir`.
///
/// Unreadable directories (including a missing root) contribute nothing.
pub fn extract_routes(app_dir: &Path) -> RouteSet {
    let mut routes = RouteSet::default();

    let walker = WalkDir::new(app_dir)
        .into_iter()
        .filter_entry(|entry| !is_special_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable routing entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_route_file(&entry) {
            continue;
        }

        let Some(pattern) = route_for(app_dir, entry.path()) else {
            continue;
        };
        debug!(route = %pattern, file = %entry.path().display(), "route");
        routes.insert(pattern);
    }

    routes
}

// Pattern for the directory containing `file`
fn route_for(app_dir: &Path, file: &Path) -> Option<RoutePattern> {
    let dir = file.parent()?.strip_prefix(app_dir).ok()?;

    // A non UTF-8 directory name can't appear in a link; drop the route
    let names: Option<Vec<&str>> = dir
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();

    Some(RoutePattern::from_segments(
        names?.into_iter().filter_map(dir_segment),
    ))
}

fn is_special_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    (entry.depth() == 1 && name == "api") || name.starts_with('_') || name.starts_with('.')
}

fn is_route_file(entry: &DirEntry) -> bool {
    let path = entry.path();
    let (Some(stem), Some(ext)) = (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) else {
        return false;
    };

    if BOUNDARY_FILE_STEMS.contains(&stem) {
        return false;
    }
    ROUTE_FILE_STEMS.contains(&stem) && ROUTE_FILE_EXTENSIONS.contains(&ext)
}
