//! High-level search facade
//!
//! `EmailSearcher` bundles a configured fetcher, the crawl scheduler and a
//! lazily built `DomainVerifier` behind a few calls that never fail.

use crate::config::Config;
use crate::crawler::{CrawlOutcome, CrawlRequest, CrawlScheduler, HttpFetcher};
use crate::url::parse_seed_url;
use crate::verify::{DomainVerifier, SmtpProbe, VerificationResult};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Searches company websites for contact emails and verifies them
pub struct EmailSearcher {
    config: Config,
    fetcher: HttpFetcher,
    verifier: OnceCell<DomainVerifier>,
    cancel: CancellationToken,
}

impl EmailSearcher {
    /// Creates a searcher with the given page budget and delay and default
    /// settings for everything else
    ///
    /// # Arguments
    ///
    /// * `max_pages` - Page budget per site; zero or negative visits nothing
    /// * `delay` - Pause between page visits
    ///
    /// # Returns
    ///
    /// * `Ok(EmailSearcher)` - Ready to search
    /// * `Err(FinderError)` - The HTTP client could not be built
    pub fn new(max_pages: i64, delay: Duration) -> crate::Result<Self> {
        let mut config = Config::default();
        config.crawler.max_pages = max_pages;
        config.crawler.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self::from_config(config)
    }

    /// Creates a searcher from a full configuration
    pub fn from_config(config: Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config, config.proxy.enabled)?;
        Ok(Self {
            config,
            fetcher,
            verifier: OnceCell::new(),
            cancel: CancellationToken::new(),
        })
    }

    /// Uses `token` to stop searches and batch verification from outside
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle that cancels this searcher's work
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls one site and returns the full outcome
    pub async fn search(&self, seed: &Url) -> CrawlOutcome {
        let request = CrawlRequest::from_config(seed.clone(), &self.config);
        let mut scheduler = CrawlScheduler::new(
            self.fetcher.clone(),
            &self.config.filters,
            self.config.crawler.link_cap,
        )
        .with_cancellation(self.cancel.clone());

        scheduler.run(&request).await
    }

    /// Crawls the site at `base_url` and returns every email found
    ///
    /// A missing scheme is treated as `https://`. An unparseable URL yields
    /// an empty set.
    pub async fn search_website_for_emails(&self, base_url: &str) -> HashSet<String> {
        match parse_seed_url(base_url) {
            Ok(seed) => self.search(&seed).await.emails,
            Err(e) => {
                tracing::warn!("Cannot search {}: {}", base_url, e);
                HashSet::new()
            }
        }
    }

    fn verifier(&self) -> &DomainVerifier {
        self.verifier.get_or_init(|| {
            DomainVerifier::new(&self.config.verification).with_cancellation(self.cancel.clone())
        })
    }

    /// Returns true iff the address's domain has at least one MX record
    pub async fn verify_email_domain(&self, email: &str) -> bool {
        self.verifier().verify_domain(email).await
    }

    /// Runs the advisory SMTP probe for one address
    pub async fn verify_email_smtp(&self, email: &str) -> SmtpProbe {
        self.verifier().verify_smtp(email).await
    }

    /// Verifies a batch of addresses in sorted order
    pub async fn verify_emails<'a, I>(&self, emails: I, smtp: bool) -> Vec<VerificationResult>
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.verifier().verify_all(emails, smtp).await
    }
}
