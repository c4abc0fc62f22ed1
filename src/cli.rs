// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag is optional. Run with no arguments from the project root and
// the defaults in config.rs apply. The CI environment variable is read in
// main.rs and passed in, so this file never touches the environment.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{Config, ConfigError, DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_MS};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "route-sentinel",
    version,
    about = "Check a file-routed web app's source tree for broken internal routes and dead external links",
    long_about = "route-sentinel reads the routing directory to learn which pages exist, scans the source \
                  tree for links, and reports internal links with no matching route or public asset plus \
                  external URLs that fail a HEAD request. Exits 1 when anything is broken, so it can gate CI. \
                  Set CI=true to skip the external checks."
)]
pub struct Cli {
    /// Project root; the other directories are relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Routing directory (default: src/app)
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// Source directory to scan for links (default: src)
    #[arg(long)]
    pub src_dir: Option<PathBuf>,

    /// Public static asset directory (default: public)
    #[arg(long)]
    pub public_dir: Option<PathBuf>,

    /// Timeout for each external HEAD request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Maximum number of external requests in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Skip external link probing (implied by CI=true)
    #[arg(long)]
    pub skip_external: bool,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the run configuration. `ci` comes from the CI variable.
    pub fn to_config(&self, ci: bool) -> Result<Config, ConfigError> {
        let mut config = Config::for_root(&self.root);

        if let Some(dir) = &self.app_dir {
            config.app_dir = self.root.join(dir);
        }
        if let Some(dir) = &self.src_dir {
            config.src_dir = self.root.join(dir);
        }
        if let Some(dir) = &self.public_dir {
            config.public_dir = self.root.join(dir);
        }
        config.timeout = Duration::from_millis(self.timeout_ms);
        config.max_concurrent = self.max_concurrent;
        config.skip_external = self.skip_external || ci;

        config.validate()?;
        Ok(config)
    }
}
