//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - Direct fetching and fetching through a scraping proxy
//! - Error classification into page states
//!
//! A fetch never fails the crawl. Every outcome, including network errors,
//! is reported as a `FetchResult` variant.

use crate::config::Config;
use crate::state::PageState;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Default cap on a page body, in bytes
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// URL of the page that was returned (after redirects)
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty when absent)
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not text (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Body is larger than the fetcher's limit
    TooLarge {
        /// Bytes announced or read before giving up
        size: u64,
        /// The configured limit
        limit: usize,
    },

    /// HTTP error that maps to a specific page state
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// The page state this error maps to
        state: PageState,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// The page state this error maps to
        state: PageState,
    },
}

impl FetchResult {
    /// Returns the page body if the fetch succeeded
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the fetch produced content
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Maps the result to the state recorded for the page
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Success { .. } => PageState::Processed,
            Self::ContentMismatch { .. } => PageState::ContentMismatch,
            Self::TooLarge { .. } => PageState::Failed,
            Self::HttpError { state, .. } | Self::NetworkError { state, .. } => *state,
        }
    }
}

/// Anything that can retrieve one page for the crawl loop
///
/// Implementations must be fail-soft: every problem is reported through the
/// returned `FetchResult`.
pub trait PageFetcher {
    /// Fetches a single URL
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult> + Send;
}

/// How the fetcher reaches the target site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// Request the target URL directly
    Direct,

    /// Request `endpoint?api_key=...&url=<target>` from a scraping proxy
    Proxy {
        /// Proxy endpoint
        endpoint: Url,
        /// API key sent with every request
        api_key: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// The client is built once per crawl and reused for every page so that
/// connections are pooled.
///
/// # Arguments
///
/// * `config` - The full configuration (user agent, timeout and TLS policy are used)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.value.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .danger_accept_invalid_certs(accepts_invalid_certs(config))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Whether clients built from `config` skip certificate validation
pub fn accepts_invalid_certs(config: &Config) -> bool {
    !config.crawler.verify_tls
}

/// Fetches pages over HTTP, directly or through a scraping proxy
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    mode: FetchMode,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Creates a fetcher that requests pages directly
    pub fn new(client: Client) -> Self {
        Self {
            client,
            mode: FetchMode::Direct,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Creates a fetcher that routes every request through a scraping proxy
    pub fn with_proxy(client: Client, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            mode: FetchMode::Proxy {
                endpoint,
                api_key: api_key.into(),
            },
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the largest body the fetcher will read
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Builds a fetcher from configuration
    ///
    /// When `use_proxy` is set but the API key environment variable is
    /// missing or empty, the fetcher falls back to direct mode.
    pub fn from_config(config: &Config, use_proxy: bool) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        let limit = config.crawler.max_body_bytes;

        if !use_proxy {
            return Ok(Self::new(client).with_max_body_bytes(limit));
        }

        match std::env::var(&config.proxy.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                let endpoint = Url::parse(&config.proxy.endpoint)?;
                tracing::info!("Fetching through proxy {}", endpoint);
                Ok(Self::with_proxy(client, endpoint, key.trim()).with_max_body_bytes(limit))
            }
            _ => {
                tracing::warn!(
                    "Proxy mode requested but {} is not set, fetching directly",
                    config.proxy.api_key_env
                );
                Ok(Self::new(client).with_max_body_bytes(limit))
            }
        }
    }

    /// Returns the active fetch mode
    pub fn mode(&self) -> &FetchMode {
        &self.mode
    }

    /// Computes the URL actually requested for a target page
    fn request_url(&self, target: &Url) -> Url {
        match &self.mode {
            FetchMode::Direct => target.clone(),
            FetchMode::Proxy { endpoint, api_key } => {
                let mut url = endpoint.clone();
                url.query_pairs_mut()
                    .append_pair("api_key", api_key)
                    .append_pair("url", target.as_str());
                url
            }
        }
    }

    /// Fetches a URL and classifies the outcome
    ///
    /// # Response Handling
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 2xx with text or missing Content-Type | Success |
    /// | HTTP 2xx with other Content-Type | ContentMismatch |
    /// | Body over `max_body_bytes` | TooLarge |
    /// | HTTP 404 / 410 | DeadLink |
    /// | HTTP 429 | RateLimited |
    /// | Other non-2xx | Failed |
    /// | Timeout / connection error | Unreachable |
    /// | Any other client error | Failed |
    pub async fn fetch_url(&self, target: &Url) -> FetchResult {
        let limit = self.max_body_bytes;
        let request_url = self.request_url(target);

        let mut response = match self.client.get(request_url).send().await {
            Ok(response) => response,
            Err(e) => return classify_network_error(e),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
                state: PageState::from_http_status(status.as_u16()),
            };
        }

        let final_url = match self.mode {
            FetchMode::Direct => response.url().clone(),
            FetchMode::Proxy { .. } => target.clone(),
        };

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !is_textual(&content_type) {
            return FetchResult::ContentMismatch { content_type };
        }

        if let Some(length) = response.content_length() {
            if length > limit as u64 {
                return FetchResult::TooLarge {
                    size: length,
                    limit,
                };
            }
        }

        // Chunked responses carry no length
        let mut bytes = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if bytes.len() + chunk.len() > limit {
                        return FetchResult::TooLarge {
                            size: (bytes.len() + chunk.len()) as u64,
                            limit,
                        };
                    }
                    bytes.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    return FetchResult::NetworkError {
                        error: e.to_string(),
                        state: PageState::Failed,
                    }
                }
            }
        }

        FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        self.fetch_url(url).await
    }
}

fn classify_network_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            state: PageState::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            state: PageState::Unreachable,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            state: PageState::Failed,
        }
    }
}

/// Accepts text content types, and responses without a Content-Type
fn is_textual(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.starts_with("application/xhtml+xml")
}
