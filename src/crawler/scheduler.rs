//! Crawl scheduler: the state machine that drives one crawl
//!
//! This module handles:
//! - Seeding the frontier with the seed URL and the static contact paths
//! - Homepage analysis (structure-analysis strategy)
//! - The sequential visit loop under the page budget
//! - The politeness delay between visits
//! - Cooperative cancellation between visits

use crate::config::{Config, CrawlStrategy, FilterConfig};
use crate::crawler::extractor::EmailExtractor;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::frontier::{Frontier, FrontierOrder, LinkOrigin};
use crate::crawler::parser::{DiscoveredLink, LinkCategory, LinkDiscoverer, DEFAULT_LINK_CAP};
use crate::state::{CrawlState, PageState};
use crate::url::{normalize_url, same_site, site_root};
use std::collections::HashSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Default page budget
pub const DEFAULT_MAX_PAGES: i64 = 15;

/// Default delay between page visits
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Parameters of one crawl, fixed when the crawl starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Normalized seed URL
    pub seed: Url,

    /// Page budget; zero or negative means visit nothing
    pub max_pages: i64,

    /// Delay between page visits
    pub delay: Duration,

    /// Fetch through the scraping proxy
    pub use_proxy: bool,

    /// How the next page is chosen
    pub strategy: CrawlStrategy,
}

impl CrawlRequest {
    /// Creates a request with the default budget, delay and strategy
    pub fn new(seed: Url) -> Self {
        Self {
            seed,
            max_pages: DEFAULT_MAX_PAGES,
            delay: DEFAULT_DELAY,
            use_proxy: false,
            strategy: CrawlStrategy::default(),
        }
    }

    /// Creates a request from the `[crawler]` and `[proxy]` settings
    pub fn from_config(seed: Url, config: &Config) -> Self {
        Self::new(seed)
            .with_max_pages(config.crawler.max_pages)
            .with_delay(Duration::from_millis(config.crawler.delay_ms))
            .with_proxy(config.proxy.enabled)
            .with_strategy(config.crawler.strategy)
    }

    pub fn with_max_pages(mut self, max_pages: i64) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }

    pub fn with_strategy(mut self, strategy: CrawlStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Number of pages the crawl may fetch
    pub fn page_budget(&self) -> usize {
        usize::try_from(self.max_pages).unwrap_or(0)
    }
}

/// Everything learned from one page visit
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The URL that was requested
    pub url: Url,

    /// Emails found on the page
    pub emails: HashSet<String>,

    /// Same-site links found on the page, best first
    pub links: Vec<DiscoveredLink>,

    /// Outcome of the visit
    pub state: PageState,
}

/// Terminal result of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Every distinct email found, across all pages
    pub emails: HashSet<String>,

    /// Number of fetches performed
    pub pages_visited: usize,

    /// `Done` or `Stopped`
    pub state: CrawlState,
}

impl CrawlOutcome {
    fn empty(state: CrawlState) -> Self {
        Self {
            emails: HashSet::new(),
            pages_visited: 0,
            state,
        }
    }

    /// Returns the emails in sorted order
    pub fn sorted_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self.emails.iter().cloned().collect();
        emails.sort();
        emails
    }

    /// Returns true if the crawl was cancelled before finishing
    pub fn was_stopped(&self) -> bool {
        self.state == CrawlState::Stopped
    }
}

/// Drives a single crawl over a `PageFetcher`
///
/// The scheduler is strictly sequential: one page is fetched, scanned and
/// expanded before the next is chosen.
pub struct CrawlScheduler<F> {
    fetcher: F,
    extractor: EmailExtractor,
    discoverer: LinkDiscoverer,
    contact_paths: Vec<String>,
    cancel: CancellationToken,
    state: CrawlState,
}

impl<F: PageFetcher> CrawlScheduler<F> {
    /// Creates a scheduler from the filter lists and the per-page link cap
    pub fn new(fetcher: F, filters: &FilterConfig, link_cap: usize) -> Self {
        Self {
            fetcher,
            extractor: EmailExtractor::new(filters),
            discoverer: LinkDiscoverer::new(filters, link_cap),
            contact_paths: filters.contact_paths.clone(),
            cancel: CancellationToken::new(),
            state: CrawlState::Idle,
        }
    }

    /// Creates a scheduler with the built-in filter lists
    pub fn with_defaults(fetcher: F) -> Self {
        Self::new(fetcher, &FilterConfig::default(), DEFAULT_LINK_CAP)
    }

    /// Uses `token` to stop the crawl from outside
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle that cancels this scheduler's crawls
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Current state of the scheduler
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Returns the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs a crawl to completion or cancellation
    ///
    /// Never fails: unreachable pages are skipped, and a cancelled crawl
    /// returns the emails found so far.
    pub async fn run(&mut self, request: &CrawlRequest) -> CrawlOutcome {
        self.state = CrawlState::Idle;
        let budget = request.page_budget();

        if budget == 0 {
            tracing::info!("Page budget is {}, nothing to crawl", request.max_pages);
            self.transition(CrawlState::Done);
            return CrawlOutcome::empty(CrawlState::Done);
        }

        tracing::info!(
            "Starting crawl of {} (budget {} pages, {:?} strategy)",
            request.seed,
            budget,
            request.strategy
        );

        let order = match request.strategy {
            CrawlStrategy::StructureAnalysis => FrontierOrder::Priority,
            CrawlStrategy::BreadthFirst => FrontierOrder::Fifo,
        };
        let mut frontier = Frontier::new(order);
        let mut emails = HashSet::new();
        let mut pages_visited = 0usize;

        if request.strategy == CrawlStrategy::BreadthFirst {
            frontier.push(
                request.seed.clone(),
                LinkCategory::Other,
                LinkOrigin::Discovered,
            );
        }
        self.seed_static_paths(&mut frontier, &request.seed);

        if request.strategy == CrawlStrategy::StructureAnalysis {
            if self.cancel.is_cancelled() {
                return self.finish(CrawlState::Stopped, emails, pages_visited);
            }

            self.transition(CrawlState::Analyzing);
            frontier.mark_visited(&request.seed);
            let page = self.visit(&request.seed, request).await;
            pages_visited += 1;
            self.absorb(page, &mut frontier, &mut emails);

            if pages_visited < budget && !frontier.is_empty() {
                self.pause(request.delay).await;
            }
        }

        let terminal = loop {
            if pages_visited >= budget {
                tracing::debug!("Page budget of {} reached", budget);
                break CrawlState::Done;
            }

            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after {} pages", pages_visited);
                break CrawlState::Stopped;
            }

            let Some(url) = frontier.pop() else {
                tracing::debug!("Frontier is empty");
                break CrawlState::Done;
            };

            if !frontier.mark_visited(&url) {
                continue;
            }

            self.transition(CrawlState::Visiting(pages_visited + 1));
            let page = self.visit(&url, request).await;
            pages_visited += 1;
            self.absorb(page, &mut frontier, &mut emails);

            if pages_visited < budget && !frontier.is_empty() {
                self.pause(request.delay).await;
            }
        };

        self.finish(terminal, emails, pages_visited)
    }

    /// Queues the static contact paths relative to the seed's origin
    fn seed_static_paths(&self, frontier: &mut Frontier, seed: &Url) {
        let root = site_root(seed);

        for path in &self.contact_paths {
            let url = match root.join(path).map(|u| normalize_url(u.as_str())) {
                Ok(Ok(url)) => url,
                _ => {
                    tracing::warn!("Skipping invalid contact path {}", path);
                    continue;
                }
            };

            let category = self.discoverer.classify(&url, "");
            frontier.push(url, category, LinkOrigin::StaticPath);
        }

        tracing::debug!("Frontier seeded with {} URLs", frontier.len());
    }

    /// Fetches one page and scans it for emails and links
    async fn visit(&self, url: &Url, request: &CrawlRequest) -> PageResult {
        let result = self.fetcher.fetch(url).await;
        let state = result.page_state();

        match result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                // Resolve against the requested URL when a redirect left the
                // seed's site, e.g. apex to www
                let base = if same_site(&request.seed, &final_url) {
                    &final_url
                } else {
                    tracing::debug!("{} redirected to {}", url, final_url);
                    url
                };

                let emails = self.extractor.extract(&body);
                let links: Vec<DiscoveredLink> = self
                    .discoverer
                    .discover(base, &body)
                    .into_iter()
                    .filter(|link| same_site(&request.seed, &link.url))
                    .collect();

                tracing::info!(
                    "Visited {} ({} emails, {} links)",
                    url,
                    emails.len(),
                    links.len()
                );

                PageResult {
                    url: url.clone(),
                    emails,
                    links,
                    state,
                }
            }
            other => {
                match &other {
                    FetchResult::HttpError { status_code, .. } => {
                        tracing::warn!("Skipping {}: HTTP {} ({})", url, status_code, state);
                    }
                    FetchResult::NetworkError { error, .. } => {
                        tracing::warn!("Skipping {}: {}", url, error);
                    }
                    FetchResult::ContentMismatch { content_type } => {
                        tracing::debug!("Skipping {}: content type {}", url, content_type);
                    }
                    FetchResult::TooLarge { size, limit } => {
                        tracing::warn!("Skipping {}: body of {} bytes exceeds {}", url, size, limit);
                    }
                    FetchResult::Success { .. } => {}
                }

                PageResult {
                    url: url.clone(),
                    emails: HashSet::new(),
                    links: Vec::new(),
                    state,
                }
            }
        }
    }

    /// Merges a page's emails and queues its links
    fn absorb(&self, page: PageResult, frontier: &mut Frontier, emails: &mut HashSet<String>) {
        tracing::debug!("{} finished as {}", page.url, page.state);
        if page.state.is_error() {
            return;
        }

        for email in page.emails {
            if emails.insert(email.clone()) {
                tracing::debug!("Found {} on {}", email, page.url);
            }
        }

        for link in page.links {
            if frontier.push(link.url.clone(), link.category, LinkOrigin::Discovered) {
                tracing::trace!("Queued {} ({})", link.url, link.category);
            }
        }
    }

    /// Sleeps for the politeness delay unless cancelled first
    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }

        tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!("Delay interrupted by cancellation");
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }

    fn transition(&mut self, next: CrawlState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal crawl transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Crawl state {} -> {}", self.state, next);
        self.state = next;
    }

    fn finish(
        &mut self,
        terminal: CrawlState,
        emails: HashSet<String>,
        pages_visited: usize,
    ) -> CrawlOutcome {
        self.transition(terminal);
        tracing::info!(
            "Crawl {}: {} pages visited, {} unique emails",
            terminal,
            pages_visited,
            emails.len()
        );

        CrawlOutcome {
            emails,
            pages_visited,
            state: terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves canned pages and records every fetch
    #[derive(Default)]
    struct MapFetcher {
        pages: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, url: &Url) -> FetchResult {
            self.calls.lock().unwrap().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some(body) => FetchResult::Success {
                    final_url: url.clone(),
                    status_code: 200,
                    content_type: "text/html".to_string(),
                    body: body.clone(),
                },
                None => FetchResult::HttpError {
                    status_code: 404,
                    state: PageState::DeadLink,
                },
            }
        }
    }

    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &Url) -> FetchResult {
            self.respond(url)
        }
    }

    /// Fails every request
    #[derive(Default)]
    struct FailingFetcher {
        calls: AtomicUsize,
    }

    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &Url) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            FetchResult::NetworkError {
                error: "connection refused".to_string(),
                state: PageState::Unreachable,
            }
        }
    }

    /// Cancels the token while serving the nth fetch
    struct CancellingFetcher {
        inner: MapFetcher,
        token: CancellationToken,
        cancel_on: usize,
    }

    impl PageFetcher for CancellingFetcher {
        async fn fetch(&self, url: &Url) -> FetchResult {
            let result = self.inner.respond(url);
            if self.inner.calls().len() == self.cancel_on {
                self.token.cancel();
            }
            result
        }
    }

    const SEED: &str = "https://real-corp.com/";

    fn request(max_pages: i64) -> CrawlRequest {
        CrawlRequest::new(Url::parse(SEED).unwrap())
            .with_max_pages(max_pages)
            .with_delay(Duration::ZERO)
    }

    fn homepage_fetcher() -> MapFetcher {
        MapFetcher::default()
            .with_page(
                SEED,
                r#"<a href="mailto:info@real-corp.com">Mail</a><a href="/contact">Contact</a>"#,
            )
            .with_page(
                "https://real-corp.com/contact",
                "<p>Sales: sales@real-corp.com</p>",
            )
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_homepage_and_contact_page() {
        let mut scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
        let outcome = scheduler.run(&request(2)).await;

        assert_eq!(outcome.emails, set(&["info@real-corp.com", "sales@real-corp.com"]));
        assert_eq!(outcome.pages_visited, 2);
        assert_eq!(outcome.state, CrawlState::Done);
        assert_eq!(
            scheduler.fetcher().calls(),
            vec![SEED, "https://real-corp.com/contact"]
        );
    }

    #[tokio::test]
    async fn test_budget_is_respected() {
        for budget in [1, 3, 7] {
            let mut scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
            let outcome = scheduler.run(&request(budget)).await;

            assert_eq!(scheduler.fetcher().calls().len(), budget as usize);
            assert_eq!(outcome.pages_visited, budget as usize);
        }
    }

    #[tokio::test]
    async fn test_non_positive_budget_fetches_nothing() {
        for budget in [0, -5] {
            let mut scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
            let outcome = scheduler.run(&request(budget)).await;

            assert!(outcome.emails.is_empty());
            assert_eq!(outcome.pages_visited, 0);
            assert_eq!(outcome.state, CrawlState::Done);
            assert!(scheduler.fetcher().calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_no_duplicate_visits() {
        let fetcher = MapFetcher::default()
            .with_page(
                SEED,
                r#"<a href="/">Home</a><a href="/contact">Contact</a><a href="/contact/">Contact</a>"#,
            )
            .with_page(
                "https://real-corp.com/contact",
                r#"<a href="/">Home</a><a href="/contact#form">Form</a>"#,
            );
        let mut scheduler = CrawlScheduler::with_defaults(fetcher);
        let outcome = scheduler.run(&request(100)).await;

        let calls = scheduler.fetcher().calls();
        let unique: HashSet<&String> = calls.iter().collect();
        assert_eq!(unique.len(), calls.len());
        // Seed plus the 21 static paths, each exactly once
        assert_eq!(outcome.pages_visited, 22);
        assert_eq!(outcome.state, CrawlState::Done);
    }

    #[tokio::test]
    async fn test_always_failing_fetcher() {
        let mut scheduler = CrawlScheduler::with_defaults(FailingFetcher::default());
        let outcome = scheduler.run(&request(5)).await;

        assert!(outcome.emails.is_empty());
        assert_eq!(outcome.pages_visited, 5);
        assert_eq!(scheduler.fetcher().calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_unreachable_seed_still_tries_contact_paths() {
        let fetcher = MapFetcher::default().with_page(
            "https://real-corp.com/contact",
            "hello@real-corp.com",
        );
        let mut scheduler = CrawlScheduler::with_defaults(fetcher);
        let outcome = scheduler.run(&request(3)).await;

        assert_eq!(outcome.emails, set(&["hello@real-corp.com"]));
        assert_eq!(scheduler.fetcher().calls()[1], "https://real-corp.com/contact");
    }

    #[tokio::test]
    async fn test_cancellation_between_visits() {
        let token = CancellationToken::new();
        let inner = MapFetcher::default()
            .with_page(SEED, "one@real-corp.com")
            .with_page("https://real-corp.com/contact", "two@real-corp.com")
            .with_page("https://real-corp.com/contact-us", "three@real-corp.com");
        let fetcher = CancellingFetcher {
            inner,
            token: token.clone(),
            cancel_on: 2,
        };

        let mut scheduler = CrawlScheduler::with_defaults(fetcher).with_cancellation(token);
        let outcome = scheduler.run(&request(10)).await;

        assert_eq!(outcome.state, CrawlState::Stopped);
        assert!(outcome.was_stopped());
        assert_eq!(outcome.pages_visited, 2);
        assert_eq!(outcome.emails, set(&["one@real-corp.com", "two@real-corp.com"]));
        assert_eq!(scheduler.fetcher().inner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mut scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
        scheduler.cancellation_token().cancel();
        let outcome = scheduler.run(&request(5)).await;

        assert_eq!(outcome.state, CrawlState::Stopped);
        assert!(scheduler.fetcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_cuts_delay_short() {
        let mut scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
        let token = scheduler.cancellation_token();
        let request = request(5).with_delay(Duration::from_secs(60));

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let outcome = tokio::time::timeout(Duration::from_secs(5), scheduler.run(&request))
            .await
            .expect("crawl should stop promptly");
        canceller.await.unwrap();

        assert_eq!(outcome.state, CrawlState::Stopped);
        assert_eq!(outcome.pages_visited, 1);
    }

    #[tokio::test]
    async fn test_discovered_contact_link_beats_static_guess() {
        let fetcher = MapFetcher::default().with_page(
            SEED,
            r#"<a href="/blog">Blog</a><a href="/get-in-touch">Get in touch</a>"#,
        );
        let mut scheduler = CrawlScheduler::with_defaults(fetcher);
        scheduler.run(&request(2)).await;

        assert_eq!(
            scheduler.fetcher().calls(),
            vec![SEED, "https://real-corp.com/get-in-touch"]
        );
    }

    #[tokio::test]
    async fn test_breadth_first_visits_in_discovery_order() {
        let fetcher = MapFetcher::default()
            .with_page(SEED, r#"<a href="/blog">Blog</a>"#);
        let mut scheduler = CrawlScheduler::with_defaults(fetcher);
        let request = request(4).with_strategy(CrawlStrategy::BreadthFirst);
        scheduler.run(&request).await;

        assert_eq!(
            scheduler.fetcher().calls(),
            vec![
                SEED,
                "https://real-corp.com/contact",
                "https://real-corp.com/contact-us",
                "https://real-corp.com/contact.html",
            ]
        );
    }

    #[tokio::test]
    async fn test_off_site_redirect_links_are_not_followed() {
        struct RedirectingFetcher(MapFetcher);

        impl PageFetcher for RedirectingFetcher {
            async fn fetch(&self, url: &Url) -> FetchResult {
                self.0.calls.lock().unwrap().push(url.to_string());
                FetchResult::Success {
                    final_url: Url::parse("https://elsewhere.net/").unwrap(),
                    status_code: 200,
                    content_type: "text/html".to_string(),
                    body: r#"<a href="/contact-elsewhere">Contact</a>"#.to_string(),
                }
            }
        }

        let mut scheduler = CrawlScheduler::with_defaults(RedirectingFetcher(MapFetcher::default()));
        scheduler.run(&request(30)).await;

        let calls = scheduler.fetcher().0.calls();
        assert!(calls.iter().all(|c| c.starts_with("https://real-corp.com/")));
    }

    /// Serves canned pages as if every request was redirected to `www.`
    struct WwwRedirectFetcher(MapFetcher);

    impl PageFetcher for WwwRedirectFetcher {
        async fn fetch(&self, url: &Url) -> FetchResult {
            match self.0.respond(url) {
                FetchResult::Success {
                    mut final_url,
                    status_code,
                    content_type,
                    body,
                } => {
                    final_url.set_host(Some("www.real-corp.com")).unwrap();
                    FetchResult::Success {
                        final_url,
                        status_code,
                        content_type,
                        body,
                    }
                }
                other => other,
            }
        }
    }

    #[tokio::test]
    async fn test_relative_links_survive_redirect_to_www() {
        let fetcher = MapFetcher::default()
            .with_page(SEED, r#"<a href="/get-in-touch">Get in touch</a>"#)
            .with_page(
                "https://real-corp.com/get-in-touch",
                "<p>hello@real-corp.com</p>",
            );
        let mut scheduler = CrawlScheduler::with_defaults(WwwRedirectFetcher(fetcher));
        let outcome = scheduler.run(&request(2)).await;

        assert_eq!(
            scheduler.fetcher().0.calls(),
            vec![SEED, "https://real-corp.com/get-in-touch"]
        );
        assert_eq!(outcome.emails, set(&["hello@real-corp.com"]));
    }

    #[tokio::test]
    async fn test_absolute_links_to_redirect_host_are_dropped() {
        let fetcher = MapFetcher::default().with_page(
            SEED,
            r#"<a href="https://www.real-corp.com/get-in-touch">Get in touch</a>"#,
        );
        let mut scheduler = CrawlScheduler::with_defaults(WwwRedirectFetcher(fetcher));
        scheduler.run(&request(30)).await;

        let calls = scheduler.fetcher().0.calls();
        assert!(!calls.iter().any(|c| c.contains("get-in-touch")));
        assert!(calls.iter().all(|c| c.starts_with("https://real-corp.com/")));
    }

    #[tokio::test]
    async fn test_visit_records_page_state() {
        let scheduler = CrawlScheduler::with_defaults(homepage_fetcher());
        let request = request(5);

        let home = scheduler.visit(&request.seed, &request).await;
        assert_eq!(home.state, PageState::Processed);
        assert_eq!(home.emails, set(&["info@real-corp.com"]));
        assert_eq!(home.links.len(), 1);

        let missing = Url::parse("https://real-corp.com/team").unwrap();
        let page = scheduler.visit(&missing, &request).await;
        assert_eq!(page.state, PageState::DeadLink);
        assert!(page.emails.is_empty());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_page_budget() {
        let seed = Url::parse(SEED).unwrap();
        assert_eq!(CrawlRequest::new(seed.clone()).page_budget(), 15);
        assert_eq!(CrawlRequest::new(seed.clone()).with_max_pages(-1).page_budget(), 0);
        assert_eq!(CrawlRequest::new(seed).with_max_pages(3).page_budget(), 3);
    }
}
