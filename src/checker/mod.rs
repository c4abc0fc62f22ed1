// src/checker/mod.rs
// =============================================================================
// This module contains the two validators.
//
// Submodules:
// - internal: resolves site-root links against routes and public assets
// - http: probes external URLs with bounded concurrency
//
// Both take the LinkIndex built by the scanner and only read it.
// =============================================================================

mod http;
mod internal;

// Re-export public items from submodules
// This lets callers write `checker::probe_external()` instead of
// `checker::http::probe_external()`
pub use http::{probe_external, HttpTransport, ProbeResult, ProbeStatus, Transport};
pub use internal::{validate_internal, BrokenLink};
