use serde::Deserialize;

/// Main configuration structure for Sponsor-Finder
///
/// Every section is optional; a missing file or section falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How the crawl spends its page budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlStrategy {
    /// Fetch the homepage first, then visit pages in link-category order
    #[default]
    StructureAnalysis,
    /// Visit pages in the order they were discovered
    BreadthFirst,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages to visit; zero or negative visits nothing
    #[serde(default = "default_max_pages")]
    pub max_pages: i64,

    /// Delay between page visits (milliseconds)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of links taken from a single page
    #[serde(default = "default_link_cap")]
    pub link_cap: usize,

    #[serde(default)]
    pub strategy: CrawlStrategy,

    /// Whether TLS certificates are validated
    #[serde(default)]
    pub verify_tls: bool,

    /// Largest page body read, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            link_cap: default_link_cap(),
            strategy: CrawlStrategy::default(),
            verify_tls: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// User agent sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Third-party fetch proxy settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_proxy_endpoint")]
    pub endpoint: String,

    /// Name of the environment variable holding the proxy API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_proxy_endpoint(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Email verification settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerificationConfig {
    /// Run the SMTP recipient probe after a successful MX lookup
    #[serde(default)]
    pub smtp: bool,

    /// Pause between addresses when verifying a batch (milliseconds)
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    #[serde(default = "default_dns_timeout_secs")]
    pub dns_timeout_secs: u64,

    #[serde(default = "default_smtp_timeout_secs")]
    pub smtp_timeout_secs: u64,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default = "default_helo_domain")]
    pub helo_domain: String,

    /// Synthetic sender used for `MAIL FROM`
    #[serde(default = "default_sender")]
    pub sender: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            smtp: false,
            batch_delay_ms: default_batch_delay_ms(),
            dns_timeout_secs: default_dns_timeout_secs(),
            smtp_timeout_secs: default_smtp_timeout_secs(),
            smtp_port: default_smtp_port(),
            helo_domain: default_helo_domain(),
            sender: default_sender(),
        }
    }
}

/// Data tables driving extraction and link discovery
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Paths always queued on the seed's origin
    #[serde(default = "default_contact_paths")]
    pub contact_paths: Vec<String>,

    /// Placeholder addresses that are never reported
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Substrings marking a scraped image filename rather than an address
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// URL substrings marking non-content pages (auth, cart, search, paging)
    #[serde(default = "default_skip_patterns")]
    pub skip_patterns: Vec<String>,

    /// Path suffixes of downloadable resources
    #[serde(default = "default_binary_extensions")]
    pub binary_extensions: Vec<String>,

    #[serde(default = "default_contact_keywords")]
    pub contact_keywords: Vec<String>,

    #[serde(default = "default_about_keywords")]
    pub about_keywords: Vec<String>,

    #[serde(default = "default_team_keywords")]
    pub team_keywords: Vec<String>,

    #[serde(default = "default_support_keywords")]
    pub support_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            contact_paths: default_contact_paths(),
            denylist: default_denylist(),
            image_extensions: default_image_extensions(),
            skip_patterns: default_skip_patterns(),
            binary_extensions: default_binary_extensions(),
            contact_keywords: default_contact_keywords(),
            about_keywords: default_about_keywords(),
            team_keywords: default_team_keywords(),
            support_keywords: default_support_keywords(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_max_pages() -> i64 {
    15
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_link_cap() -> usize {
    10
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_proxy_endpoint() -> String {
    "https://api.scraperapi.com/".to_string()
}

fn default_api_key_env() -> String {
    "SCRAPER_API_KEY".to_string()
}

fn default_batch_delay_ms() -> u64 {
    2000
}

fn default_dns_timeout_secs() -> u64 {
    5
}

fn default_smtp_timeout_secs() -> u64 {
    10
}

fn default_smtp_port() -> u16 {
    25
}

fn default_helo_domain() -> String {
    "localhost".to_string()
}

fn default_sender() -> String {
    "test@test.com".to_string()
}

fn default_database_path() -> String {
    "sponsor_center.db".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_contact_paths() -> Vec<String> {
    strings(&[
        "/contact",
        "/contact-us",
        "/contact.html",
        "/contact.php",
        "/about",
        "/about-us",
        "/about.html",
        "/about.php",
        "/team",
        "/staff",
        "/people",
        "/leadership",
        "/support",
        "/help",
        "/customer-service",
        "/legal",
        "/privacy",
        "/terms",
        "/careers",
        "/jobs",
        "/employment",
    ])
}

fn default_denylist() -> Vec<String> {
    strings(&[
        "example@example.com",
        "test@test.com",
        "admin@admin.com",
        "info@info.com",
        "contact@contact.com",
        "support@support.com",
        "noreply@noreply.com",
        "donotreply@donotreply.com",
    ])
}

fn default_image_extensions() -> Vec<String> {
    strings(&[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"])
}

fn default_skip_patterns() -> Vec<String> {
    strings(&[
        "/login",
        "/signin",
        "/sign-in",
        "/signup",
        "/sign-up",
        "/register",
        "/logout",
        "/account",
        "/cart",
        "/basket",
        "/checkout",
        "/search",
        "?s=",
        "?q=",
        "page=",
        "/page/",
        "/wp-admin",
        "/wp-login",
        "/feed",
    ])
}

fn default_binary_extensions() -> Vec<String> {
    strings(&[
        ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".zip", ".gz", ".rar",
        ".mp3", ".mp4", ".avi", ".mov", ".css", ".js", ".xml", ".json", ".doc", ".docx", ".xls",
        ".xlsx", ".ppt", ".pptx", ".exe", ".dmg",
    ])
}

fn default_contact_keywords() -> Vec<String> {
    strings(&[
        "contact",
        "get-in-touch",
        "get in touch",
        "reach-us",
        "reach us",
        "enquir",
        "inquir",
        "email",
    ])
}

fn default_about_keywords() -> Vec<String> {
    strings(&["about", "who-we-are", "who we are", "our-story", "our story", "company"])
}

fn default_team_keywords() -> Vec<String> {
    strings(&[
        "team",
        "staff",
        "people",
        "leadership",
        "management",
        "founders",
        "board",
    ])
}

fn default_support_keywords() -> Vec<String> {
    strings(&[
        "support",
        "help",
        "customer-service",
        "customer service",
        "faq",
        "sales",
    ])
}
