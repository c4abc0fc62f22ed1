// src/report.rs
// =============================================================================
// Final report.
//
// Collects the counts and findings of a run into one value that can be
// printed for humans (Display) or serialized for machines (--json).
// The exit code is derived from it: any broken internal link or invalid
// external URL fails the run.
// =============================================================================

use std::fmt;

use serde::Serialize;

use crate::checker::{BrokenLink, ProbeResult};
use crate::scan::LinkOccurrence;

/// Findings shown per section before "... and N more".
pub const MAX_LISTED: usize = 20;

/// Locations shown per finding.
pub const MAX_LOCATIONS: usize = 3;

/// An external URL that failed its probe, with where it was found.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidExternal {
    #[serde(flatten)]
    pub probe: ProbeResult,
    pub occurrences: Vec<LinkOccurrence>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub routes: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub occurrences: usize,
    pub broken_internal: Vec<BrokenLink>,
    /// False when external probing was skipped.
    pub external_checked: bool,
    pub probed: usize,
    pub invalid_external: Vec<InvalidExternal>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.broken_internal.is_empty() && self.invalid_external.is_empty()
    }

    /// 0 = clean, 1 = something is broken.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🗺️  Found {} route(s)", self.routes)?;
        writeln!(
            f,
            "🔗 Found {} internal and {} external link(s) in {} occurrence(s)",
            self.internal_links, self.external_links, self.occurrences
        )?;
        writeln!(f)?;

        if self.broken_internal.is_empty() {
            writeln!(f, "✅ All internal links resolve")?;
        } else {
            writeln!(f, "❌ Broken internal links ({}):", self.broken_internal.len())?;
            for broken in self.broken_internal.iter().take(MAX_LISTED) {
                writeln!(f, "   {}", broken.link)?;
                write_locations(f, &broken.occurrences)?;
            }
            write_overflow(f, self.broken_internal.len())?;
        }

        if !self.external_checked {
            writeln!(f, "⏭️  External link check skipped")?;
        } else if self.invalid_external.is_empty() {
            writeln!(f, "✅ All {} external link(s) reachable", self.probed)?;
        } else {
            writeln!(f, "❌ Invalid external links ({}):", self.invalid_external.len())?;
            for invalid in self.invalid_external.iter().take(MAX_LISTED) {
                let probe = &invalid.probe;
                match &probe.error {
                    Some(message) => writeln!(f, "   {} [{}: {}]", probe.url, probe.status, message)?,
                    None => writeln!(f, "   {} [{}]", probe.url, probe.status)?,
                }
                write_locations(f, &invalid.occurrences)?;
            }
            write_overflow(f, self.invalid_external.len())?;
        }

        writeln!(f)?;
        let failures = self.broken_internal.len() + self.invalid_external.len();
        if failures == 0 {
            writeln!(f, "📊 Summary: no broken links")
        } else {
            writeln!(
                f,
                "📊 Summary: {} broken internal, {} invalid external",
                self.broken_internal.len(),
                self.invalid_external.len()
            )
        }
    }
}

fn write_locations(f: &mut fmt::Formatter<'_>, occurrences: &[LinkOccurrence]) -> fmt::Result {
    for occurrence in occurrences.iter().take(MAX_LOCATIONS) {
        writeln!(f, "      → {}:{}", occurrence.file.display(), occurrence.line)?;
    }
    if occurrences.len() > MAX_LOCATIONS {
        writeln!(f, "      (+{} more)", occurrences.len() - MAX_LOCATIONS)?;
    }
    Ok(())
}

fn write_overflow(f: &mut fmt::Formatter<'_>, total: usize) -> fmt::Result {
    if total > MAX_LISTED {
        writeln!(f, "   ... and {} more", total - MAX_LISTED)?;
    }
    Ok(())
}
