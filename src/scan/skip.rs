// src/scan/skip.rs
// =============================================================================
// Skip rules: strings that are never treated as links.
//
// A candidate matching any rule is dropped before classification, so it
// never shows up as internal or external. The default list covers:
// - non-navigational schemes (mailto:, tel:, javascript:, ...)
// - fragment-only anchors (#section)
// - loopback hosts used in dev tooling
// - hosts that are referenced but never browsed (font CDNs, XML namespaces)
// - large social sites that reject automated HEAD requests
// =============================================================================

use url::Url;

/// A single exclusion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipRule {
    /// Case-insensitive scheme prefix, including the colon (e.g. `mailto:`).
    Scheme(String),
    /// Fragment-only references such as `#pricing`.
    Fragment,
    /// A host and all of its subdomains.
    Host(String),
}

const SKIPPED_SCHEMES: &[&str] = &["mailto:", "tel:", "sms:", "javascript:", "data:", "blob:"];

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "[::1]"];

const IGNORED_HOSTS: &[&str] = &[
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "schema.org",
    "www.w3.org",
];

// These sites answer bots with 999/403/429, which would fail every CI run.
const DENYLISTED_HOSTS: &[&str] = &[
    "linkedin.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
    "youtube.com",
];

impl SkipRule {
    /// The default ordered rule set.
    pub fn defaults() -> Vec<SkipRule> {
        let schemes = SKIPPED_SCHEMES.iter().map(|s| SkipRule::Scheme(s.to_string()));
        let hosts = LOOPBACK_HOSTS
            .iter()
            .chain(IGNORED_HOSTS)
            .chain(DENYLISTED_HOSTS)
            .map(|h| SkipRule::Host(h.to_string()));

        schemes
            .chain(std::iter::once(SkipRule::Fragment))
            .chain(hosts)
            .collect()
    }

    pub fn matches(&self, raw: &str) -> bool {
        match self {
            SkipRule::Scheme(prefix) => raw
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            SkipRule::Fragment => raw.starts_with('#'),
            SkipRule::Host(name) => host_of(raw).is_some_and(|host| {
                host == *name
                    || host
                        .strip_suffix(name.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
            }),
        }
    }
}

/// Returns true if any rule in `rules` matches `raw`.
pub fn is_skipped(rules: &[SkipRule], raw: &str) -> bool {
    rules.iter().any(|rule| rule.matches(raw))
}

// Lower-cased host of an absolute or protocol-relative URL.
// Site-relative paths have no host and return None.
fn host_of(raw: &str) -> Option<String> {
    let parsed = if raw.starts_with("//") {
        Url::parse(&format!("https:{raw}"))
    } else {
        Url::parse(raw)
    };

    parsed
        .ok()?
        .host_str()
        .map(|host| host.to_ascii_lowercase())
}
