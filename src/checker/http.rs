// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - One HTTP HEAD request per distinct URL (lightweight, no body download)
// - A hard per-request timeout; hitting it drops the request future,
//   which aborts the in-flight request
// - At most `max_concurrent` requests in flight at once
// - No retries: re-running the tool is the retry
//
// The network sits behind the Transport trait so tests can count calls and
// simulate slow or failing servers without touching the internet.
// =============================================================================

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use serde::{Serialize, Serializer};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::scan::LinkIndex;

// Outcome of a probe
//
// A completed request always carries its status code, even 404 or 500.
// ERROR and TIMEOUT are sentinels for requests that never completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Code(u16),
    Error,
    Timeout,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Code(code) => write!(f, "{}", code),
            ProbeStatus::Error => f.write_str("ERROR"),
            ProbeStatus::Timeout => f.write_str("TIMEOUT"),
        }
    }
}

// Serialized as the bare number or the sentinel string
impl Serialize for ProbeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbeStatus::Code(code) => serializer.serialize_u16(*code),
            ProbeStatus::Error => serializer.serialize_str("ERROR"),
            ProbeStatus::Timeout => serializer.serialize_str("TIMEOUT"),
        }
    }
}

/// The result of probing a single external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// The URL exactly as found in the source
    pub url: String,
    pub status: ProbeStatus,
    /// True iff the status code is in [200, 400)
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    fn from_code(url: &str, code: u16) -> Self {
        ProbeResult {
            url: url.to_string(),
            status: ProbeStatus::Code(code),
            valid: (200..400).contains(&code),
            error: None,
        }
    }

    fn error(url: &str, message: String) -> Self {
        ProbeResult {
            url: url.to_string(),
            status: ProbeStatus::Error,
            valid: false,
            error: Some(message),
        }
    }

    fn timeout(url: &str, after: Duration) -> Self {
        ProbeResult {
            url: url.to_string(),
            status: ProbeStatus::Timeout,
            valid: false,
            error: Some(format!("Request timed out after {} ms", after.as_millis())),
        }
    }
}

/// Issues a single HEAD request and reports the status code.
///
/// Implementations should not apply their own timeout or retries; the
/// prober wraps every call in its own timeout.
pub trait Transport {
    fn head(&self, url: Url) -> impl Future<Output = anyhow::Result<u16>>;
}

// The real transport: a reqwest Client shared by every probe
//
// Redirects are not followed. A 301/302 is a live link, and following it
// would turn one probe into several requests.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn head(&self, url: Url) -> anyhow::Result<u16> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| anyhow!(describe_error(&e)))?;
        Ok(response.status().as_u16())
    }
}

// Turns a reqwest error into a short human-readable reason
//
// reqwest errors can happen for many reasons:
// - DNS resolution failure
// - SSL certificate issues
// - Connection refused / reset
fn describe_error(error: &reqwest::Error) -> String {
    // Convert error to string once to avoid lifetime issues
    let error_string = error.to_string();

    if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            format!("Connection failed: {}", error_string)
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}

/// Probes every distinct external URL in the index.
///
/// Returns an empty list, without calling the transport, when
/// `config.skip_external` is set.
pub async fn probe_external<T: Transport>(
    index: &LinkIndex,
    config: &Config,
    transport: &T,
) -> Vec<ProbeResult> {
    if config.skip_external {
        debug!("external probing skipped");
        return Vec::new();
    }

    // The map keys are already distinct URLs
    let probes = index
        .external
        .keys()
        .map(|url| probe_one(transport, url, config.timeout));

    // buffer_unordered(N) runs up to N probes at once and yields results as
    // they finish, so completion order is not the input order
    stream::iter(probes)
        .buffer_unordered(config.max_concurrent.max(1))
        .collect()
        .await
}

async fn probe_one<T: Transport>(transport: &T, raw: &str, timeout: Duration) -> ProbeResult {
    let url = match probe_url(raw) {
        Ok(url) => url,
        Err(message) => return ProbeResult::error(raw, message),
    };

    let result = match tokio::time::timeout(timeout, transport.head(url)).await {
        Ok(Ok(code)) => ProbeResult::from_code(raw, code),
        Ok(Err(e)) => ProbeResult::error(raw, format!("{:#}", e)),
        Err(_elapsed) => ProbeResult::timeout(raw, timeout),
    };
    debug!(url = raw, status = %result.status, "probed");
    result
}

// Protocol-relative URLs ("//cdn.example.org/x.js") are probed over https
fn probe_url(raw: &str) -> Result<Url, String> {
    let candidate = if raw.starts_with("//") {
        Cow::Owned(format!("https:{}", raw))
    } else {
        Cow::Borrowed(raw)
    };

    let url = Url::parse(&candidate).map_err(|e| format!("Invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Unsupported protocol: {}:", other)),
    }
}
