// src/session.rs
// =============================================================================
// One run of the checker.
//
// Init -> ExtractRoutes -> ScanLinks -> ValidateInternal
//      -> (ProbeExternal | SkipExternal) -> Report
//
// A Session owns everything a run produces. Nothing is global, so tests
// can run several sessions side by side against different trees.
// =============================================================================

use tracing::{info, warn};

use crate::checker::{probe_external, validate_internal, Transport};
use crate::config::Config;
use crate::report::{InvalidExternal, Report};
use crate::routes::{extract_routes, RouteSet};
use crate::scan::{scan_links, LinkIndex};

pub struct Session<'a> {
    config: &'a Config,
    routes: RouteSet,
    links: LinkIndex,
}

impl<'a> Session<'a> {
    /// Extracts routes and scans the source tree.
    pub fn new(config: &'a Config) -> Self {
        if !config.app_dir.is_dir() {
            warn!(path = %config.app_dir.display(), "routing directory not found, no routes will be known");
        }

        let routes = extract_routes(&config.app_dir);
        info!(count = routes.len(), "routes extracted");

        let links = scan_links(config);
        info!(
            internal = links.internal.len(),
            external = links.external.len(),
            "links scanned"
        );

        Self {
            config,
            routes,
            links,
        }
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    pub fn links(&self) -> &LinkIndex {
        &self.links
    }

    /// Validates internal links, probes external ones and builds the report.
    pub async fn run<T: Transport>(self, transport: &T) -> Report {
        let broken_internal = validate_internal(&self.links, &self.routes, &self.config.public_dir);
        info!(broken = broken_internal.len(), "internal links validated");

        let probes = probe_external(&self.links, self.config, transport).await;
        let probed = probes.len();

        let mut invalid_external: Vec<InvalidExternal> = probes
            .into_iter()
            .filter(|probe| !probe.valid)
            .map(|probe| {
                let occurrences = self.links.external.get(&probe.url).cloned().unwrap_or_default();
                InvalidExternal { probe, occurrences }
            })
            .collect();
        // probes finish in any order
        invalid_external.sort_by(|a, b| a.probe.url.cmp(&b.probe.url));

        Report {
            routes: self.routes.len(),
            internal_links: self.links.internal.len(),
            external_links: self.links.external.len(),
            occurrences: self.links.occurrence_count(),
            broken_internal,
            external_checked: !self.config.skip_external,
            probed,
            invalid_external,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    struct FixedTransport {
        status: u16,
        calls: AtomicUsize,
    }

    impl FixedTransport {
        fn new(status: u16) -> Self {
            Self {
                status,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for FixedTransport {
        async fn head(&self, _url: Url) -> anyhow::Result<u16> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status)
        }
    }

    // routes: /, /about, /blog/[slug]; one component with four links
    fn site(root: &Path) {
        let app = root.join("src/app");
        for dir in ["", "about", "blog/[slug]"] {
            fs::create_dir_all(app.join(dir)).unwrap();
            fs::write(app.join(dir).join("page.tsx"), "export default function Page() {}").unwrap();
        }
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::write(
            root.join("src/components/Links.tsx"),
            concat!(
                "<Link href=\"/about\">About</Link>\n",
                "<Link href=\"/blog/hi\">Hi</Link>\n",
                "<Link href=\"/missing\">Missing</Link>\n",
                "<Link href=\"https://example.org\">Example</Link>\n",
            ),
        )
        .unwrap();
        fs::create_dir_all(root.join("public")).unwrap();
    }

    #[test]
    fn test_session_collects_routes_and_links() {
        let dir = tempfile::tempdir().unwrap();
        site(dir.path());
        let config = Config::for_root(dir.path());

        let session = Session::new(&config);
        assert_eq!(session.routes().len(), 3);
        assert_eq!(session.links().internal.len(), 3);
        assert_eq!(
            session.links().external.keys().collect::<Vec<_>>(),
            vec!["https://example.org"]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_missing_link_fails() {
        let dir = tempfile::tempdir().unwrap();
        site(dir.path());
        let config = Config::for_root(dir.path());
        let transport = FixedTransport::new(200);

        let report = Session::new(&config).run(&transport).await;

        let broken: Vec<_> = report.broken_internal.iter().map(|b| b.link.as_str()).collect();
        assert_eq!(broken, vec!["/missing"]);
        assert_eq!(report.broken_internal[0].occurrences[0].line, 3);
        assert_eq!(report.probed, 1);
        assert!(report.invalid_external.is_empty());
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_clean_site_passes() {
        let dir = tempfile::tempdir().unwrap();
        site(dir.path());
        fs::create_dir_all(dir.path().join("src/app/missing")).unwrap();
        fs::write(dir.path().join("src/app/missing/page.tsx"), "").unwrap();
        let config = Config::for_root(dir.path());

        let report = Session::new(&config).run(&FixedTransport::new(200)).await;
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_failed_probe_fails() {
        let dir = tempfile::tempdir().unwrap();
        site(dir.path());
        fs::create_dir_all(dir.path().join("src/app/missing")).unwrap();
        fs::write(dir.path().join("src/app/missing/page.tsx"), "").unwrap();
        let config = Config::for_root(dir.path());

        let report = Session::new(&config).run(&FixedTransport::new(404)).await;

        assert_eq!(report.invalid_external.len(), 1);
        assert_eq!(report.invalid_external[0].probe.url, "https://example.org");
        assert_eq!(report.invalid_external[0].occurrences.len(), 1);
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_ci_mode_makes_no_network_calls() {
        let dir = tempfile::tempdir().unwrap();
        site(dir.path());
        let mut config = Config::for_root(dir.path());
        config.skip_external = crate::config::is_ci(Some("true"));
        let transport = FixedTransport::new(500);

        let session = Session::new(&config);
        assert_eq!(session.links().external.len(), 1);
        let report = session.run(&transport).await;

        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(!report.external_checked);
        assert_eq!(report.probed, 0);
        assert!(report.invalid_external.is_empty());
    }
}
