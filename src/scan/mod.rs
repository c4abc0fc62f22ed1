// src/scan/mod.rs
// =============================================================================
// Link scanner.
//
// Walks the source tree, reads every text file with an included extension,
// and runs the line matchers (see patterns.rs) over each line. Every string
// that survives the skip rules is classified as internal or external and
// recorded with its file and line number.
//
// Submodules:
// - patterns: regex-based line matchers
// - html: <a href> extraction via scraper
// - markdown: Markdown link extraction via pulldown-cmark
// - skip: exclusion rules (mailto:, #fragment, known hosts, ...)
//
// The scan is best-effort: an unreadable directory or file is logged at
// debug level and treated as empty.
// =============================================================================

mod html;
mod markdown;
mod patterns;
mod skip;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;

pub use patterns::MATCHERS;
pub use skip::{is_skipped, SkipRule};

/// One place a link string was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOccurrence {
    /// Relative to the scanned source root.
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
    /// The string exactly as captured.
    pub raw: String,
}

/// Result of classifying a candidate string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Site-root path, already normalized.
    Internal(String),
    /// Anything that is not a site-root path, verbatim.
    External(String),
}

/// Every link found in the source tree, grouped by target.
#[derive(Debug, Default)]
pub struct LinkIndex {
    pub internal: BTreeMap<String, Vec<LinkOccurrence>>,
    pub external: BTreeMap<String, Vec<LinkOccurrence>>,
}

impl LinkIndex {
    pub fn record(&mut self, kind: LinkKind, occurrence: LinkOccurrence) {
        let (map, key) = match kind {
            LinkKind::Internal(key) => (&mut self.internal, key),
            LinkKind::External(key) => (&mut self.external, key),
        };
        map.entry(key).or_default().push(occurrence);
    }

    /// Total occurrences across both maps.
    pub fn occurrence_count(&self) -> usize {
        self.internal
            .values()
            .chain(self.external.values())
            .map(Vec::len)
            .sum()
    }

    /// Runs the matchers over `content` and records what they find.
    ///
    /// `markdown` enables the Markdown matcher and relaxes the comment
    /// heuristic (list items start with `*`).
    pub fn scan_text(&mut self, file: &Path, content: &str, markdown: bool, rules: &[SkipRule]) {
        for (idx, line) in content.lines().enumerate() {
            if is_comment_line(line, markdown) {
                continue;
            }

            let matchers = MATCHERS.iter().filter(|m| markdown || !m.markdown_only);
            for matcher in matchers {
                for raw in (matcher.extract)(line) {
                    if is_skipped(rules, &raw) || has_interpolation(&raw) {
                        continue;
                    }
                    let kind = classify(&raw);
                    trace!(matcher = matcher.name, line = idx + 1, raw = %raw, "candidate");
                    self.record(
                        kind,
                        LinkOccurrence {
                            file: file.to_path_buf(),
                            line: idx + 1,
                            raw,
                        },
                    );
                }
            }
        }
    }
}

/// Classifies a candidate purely by syntax.
///
/// `/x` (but not `//host/x`) is internal. Everything else is external,
/// including document-relative strings like `images/logo.png`; those fail
/// their probe instead of disappearing from the report.
pub fn classify(raw: &str) -> LinkKind {
    if raw.starts_with('/') && !raw.starts_with("//") {
        LinkKind::Internal(normalize_internal(raw))
    } else {
        LinkKind::External(raw.to_string())
    }
}

/// Drops query and fragment, strips trailing slashes, maps empty to `/`.
pub fn normalize_internal(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Template strings like `/blog/${slug}` are not literal links.
pub fn has_interpolation(raw: &str) -> bool {
    raw.contains(['{', '}'])
}

const CODE_COMMENT_MARKERS: &[&str] = &["//", "/*", "*", "{/*", "<!--"];
const MARKDOWN_COMMENT_MARKERS: &[&str] = &["{/*", "<!--"];

// A heuristic, not a parser: only lines that *start* with a marker count,
// so links inside multi-line comment bodies can still slip through.
fn is_comment_line(line: &str, markdown: bool) -> bool {
    let trimmed = line.trim_start();
    let markers = if markdown {
        MARKDOWN_COMMENT_MARKERS
    } else {
        CODE_COMMENT_MARKERS
    };
    markers.iter().any(|marker| trimmed.starts_with(marker))
}

/// Scans `config.src_dir` and builds the link index.
pub fn scan_links(config: &Config) -> LinkIndex {
    let mut index = LinkIndex::default();
    let root = &config.src_dir;

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, &config.excluded_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !config.extensions.iter().any(|included| included == ext) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %entry.path().display(), error = %err, "skipping unreadable file");
                continue;
            }
        };

        let markdown = matches!(ext, "md" | "mdx");
        let display = entry.path().strip_prefix(root).unwrap_or(entry.path());
        index.scan_text(display, &content, markdown, &config.skip_rules);
    }

    debug!(
        internal = index.internal.len(),
        external = index.external.len(),
        "scan complete"
    );
    index
}

// Hidden and denylisted directories below the root
fn is_excluded_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || excluded.iter().any(|dir| *dir == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> LinkIndex {
        let mut index = LinkIndex::default();
        index.scan_text(Path::new("page.tsx"), content, false, &SkipRule::defaults());
        index
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("/about/"), LinkKind::Internal("/about".to_string()));
        assert_eq!(
            classify("https://example.org"),
            LinkKind::External("https://example.org".to_string())
        );
        assert_eq!(
            classify("//cdn.example.org/a.js"),
            LinkKind::External("//cdn.example.org/a.js".to_string())
        );
        assert_eq!(classify("./logo.png"), LinkKind::External("./logo.png".to_string()));
        assert_eq!(classify("styles.css"), LinkKind::External("styles.css".to_string()));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        assert_eq!(normalize_internal("/docs/"), "/docs");
        assert_eq!(normalize_internal("/docs"), "/docs");
        assert_eq!(normalize_internal("/"), "/");
        assert_eq!(normalize_internal("/pricing?plan=pro#faq"), "/pricing");
        assert_eq!(normalize_internal("/#top"), "/");

        for raw in ["/docs/", "/a/b//", "/", "/x?y", "/th/about/"] {
            let once = normalize_internal(raw);
            assert_eq!(normalize_internal(&once), once);
        }
    }

    #[test]
    fn test_records_occurrences_with_line_numbers() {
        let index = scan("line one\n<Link href=\"/about/\">\n<a href=\"https://example.org\">x</a>");

        let about = &index.internal["/about"];
        assert_eq!(about.len(), 1);
        assert_eq!(about[0].line, 2);
        assert_eq!(about[0].raw, "/about/");

        // found by both the href matcher and the anchor matcher
        let external = &index.external["https://example.org"];
        assert_eq!(external.len(), 2);
        assert!(external.iter().all(|o| o.line == 3));
    }

    #[test]
    fn test_skip_rules_produce_no_occurrences() {
        let index = scan(concat!(
            "<a href=\"mailto:hi@example.org\">mail</a>\n",
            "<a href=\"tel:+66\">call</a>\n",
            "<a href=\"#top\">top</a>\n",
            "<a href=\"http://localhost:3000\">dev</a>\n",
            "<a href=\"https://www.linkedin.com/company/acme\">in</a>\n",
        ));
        assert!(index.internal.is_empty());
        assert!(index.external.is_empty());
    }

    #[test]
    fn test_relative_sources_are_recorded_as_external() {
        let index = scan(r#"<img src="images/logo.png" />"#);
        assert!(index.internal.is_empty());
        let occurrences = &index.external["images/logo.png"];
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].line, 1);
    }

    #[test]
    fn test_local_location_variable_is_not_recorded() {
        let index = scan(r#"const location = "/not-a-link";"#);
        assert!(index.internal.is_empty());
        assert!(index.external.is_empty());
    }

    #[test]
    fn test_interpolated_links_are_excluded() {
        let index = scan("<Link href={`/blog/${post.slug}`}>\nrouter.push(`/th/${path}`)");
        assert!(index.internal.is_empty());
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let index = scan("// see <a href=\"/old\">\n * href=\"/older\"\n/* href=\"/oldest\" */");
        assert!(index.internal.is_empty());
    }

    #[test]
    fn test_markdown_matcher_only_for_markdown() {
        let rules = SkipRule::defaults();
        let line = "* Read [the guide](/guides/start)";

        let mut md = LinkIndex::default();
        md.scan_text(Path::new("post.mdx"), line, true, &rules);
        assert!(md.internal.contains_key("/guides/start"));

        let mut code = LinkIndex::default();
        code.scan_text(Path::new("page.tsx"), line, false, &rules);
        assert!(code.internal.is_empty());
    }

    #[test]
    fn test_scan_links_walks_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("components")).unwrap();
        fs::create_dir_all(src.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(src.join(".cache")).unwrap();

        fs::write(src.join("components/Nav.tsx"), r#"<Link href="/about">"#).unwrap();
        fs::write(src.join("components/notes.txt"), r#"href="/ignored-ext""#).unwrap();
        fs::write(src.join("node_modules/pkg/index.js"), r#"href="/vendored""#).unwrap();
        fs::write(src.join(".cache/x.js"), r#"href="/hidden""#).unwrap();

        let config = Config::for_root(dir.path());
        let index = scan_links(&config);

        let keys: Vec<_> = index.internal.keys().cloned().collect();
        assert_eq!(keys, vec!["/about"]);
        assert_eq!(
            index.internal["/about"][0].file,
            PathBuf::from("components/Nav.tsx")
        );
    }

    #[test]
    fn test_missing_source_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_root(&dir.path().join("nope"));
        let index = scan_links(&config);
        assert_eq!(index.occurrence_count(), 0);
    }
}
