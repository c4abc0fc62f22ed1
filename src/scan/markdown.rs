// src/scan/markdown.rs
// =============================================================================
// This module extracts link destinations from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// The scanner hands us one line at a time, so only inline links, images
// and autolinks are seen. Reference-style definitions on other lines are
// not resolved.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

// Extracts every link and image destination from a line of Markdown
//
// Example input:
//   "Read the [case study](/case-studies/retail) or ![chart](/img/c.png)"
//
// Example output:
//   vec!["/case-studies/retail", "/img/c.png"]
pub fn markdown_links(line: &str) -> Vec<String> {
    Parser::new(line)
        .filter_map(|event| match event {
            // In pulldown-cmark 0.9, links are Tag::Link(link_type, dest_url, title)
            Event::Start(Tag::Link(_, dest, _)) | Event::Start(Tag::Image(_, dest, _)) => {
                Some(dest.to_string())
            }
            _ => None,
        })
        .filter(|dest| !dest.is_empty())
        .collect()
}
