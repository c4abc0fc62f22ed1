// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the checker needs to know is collected into one Config value
// in main.rs and passed down by reference. Nothing below this module reads
// the environment on its own.
//
// Defaults match a conventional file-routed web app laid out as:
//
//   <root>/src/app      routing tree (page.tsx, [slug]/, api/, ...)
//   <root>/src          source tree scanned for links
//   <root>/public       static assets served from "/"
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::scan::SkipRule;

/// Per-request timeout for external probes, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Maximum number of external probes in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// User agent sent with every HEAD request.
pub const DEFAULT_USER_AGENT: &str =
    concat!("route-sentinel/", env!("CARGO_PKG_VERSION"), " (link integrity checker)");

/// File extensions the link scanner reads.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "md", "mdx"];

/// Directory names the link scanner never descends into.
/// Hidden directories are skipped separately.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".git",
    "out",
    "build",
    "dist",
    "coverage",
    ".turbo",
    ".vercel",
];

// Errors raised while building a Config.
//
// These are the only errors the checker itself produces; per-file and
// per-URL failures are turned into report data instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max concurrent probes must be at least 1")]
    ZeroConcurrency,

    #[error("request timeout must be greater than 0 ms")]
    ZeroTimeout,
}

/// Complete configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Routing tree root (directories become path segments).
    pub app_dir: PathBuf,
    /// Source tree scanned for link strings.
    pub src_dir: PathBuf,
    /// Static asset root; internal links may resolve to files here.
    pub public_dir: PathBuf,
    /// Extensions (without the dot) of files the scanner reads.
    pub extensions: Vec<String>,
    /// Directory names the scanner skips.
    pub excluded_dirs: Vec<String>,
    /// Ordered exclusion rules applied to every extracted string.
    pub skip_rules: Vec<SkipRule>,
    /// Per-request timeout for HEAD probes.
    pub timeout: Duration,
    /// Upper bound on probes in flight.
    pub max_concurrent: usize,
    pub user_agent: String,
    /// When set, external probing is skipped entirely.
    pub skip_external: bool,
}

impl Config {
    /// Builds the default layout under `root`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            app_dir: root.join("src").join("app"),
            src_dir: root.join("src"),
            public_dir: root.join("public"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            skip_rules: SkipRule::defaults(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_external: false,
        }
    }

    /// Checks the numeric limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_root(Path::new("."))
    }
}

// CI mode is on only when CI is exactly "true".
// "1", "TRUE" or an empty value leave external probing enabled.
pub fn is_ci(value: Option<&str>) -> bool {
    value == Some("true")
}
