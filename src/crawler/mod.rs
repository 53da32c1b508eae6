//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, direct or through a scraping proxy
//! - Email extraction and validation
//! - HTML parsing and link discovery
//! - The frontier and the crawl state machine

mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod scheduler;

pub use crate::config::CrawlStrategy;
pub use extractor::{is_syntactically_valid, EmailExtractor};
pub use fetcher::{build_http_client, FetchMode, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, FrontierOrder, LinkOrigin};
pub use parser::{DiscoveredLink, LinkCategory, LinkDiscoverer, DEFAULT_LINK_CAP};
pub use scheduler::{
    CrawlOutcome, CrawlRequest, CrawlScheduler, PageResult, DEFAULT_DELAY, DEFAULT_MAX_PAGES,
};

use crate::config::Config;
use url::Url;

/// Runs a complete crawl of one website with an HTTP fetcher
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher (direct or proxy)
/// 2. Seed the frontier with the site's contact paths
/// 3. Visit pages under the budget and delay from `config`
/// 4. Return every email found
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The normalized site URL
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished or was cancelled
/// * `Err(FinderError)` - The HTTP client could not be built
pub async fn crawl(config: &Config, seed: Url) -> crate::Result<CrawlOutcome> {
    let request = CrawlRequest::from_config(seed, config);

    let fetcher = HttpFetcher::from_config(config, request.use_proxy)?;
    let mut scheduler = CrawlScheduler::new(fetcher, &config.filters, config.crawler.link_cap);

    Ok(scheduler.run(&request).await)
}
