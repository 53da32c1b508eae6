//! HTML link discovery
//!
//! This module parses a fetched page and decides which of its links are
//! worth a page of the crawl budget:
//! - Only `<a href>` links that stay on the same site
//! - No auth, cart, search, pagination or binary-file URLs
//! - Each link classified by what it probably leads to, best first

use crate::config::FilterConfig;
use crate::url::{normalize_url, same_site};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Default number of links kept from one page
pub const DEFAULT_LINK_CAP: usize = 10;

/// What a link probably leads to, ordered from most to least useful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkCategory {
    Contact,
    About,
    Team,
    Support,
    Other,
}

impl LinkCategory {
    /// Sort rank; lower is visited first
    pub fn rank(&self) -> u8 {
        match self {
            Self::Contact => 0,
            Self::About => 1,
            Self::Team => 2,
            Self::Support => 3,
            Self::Other => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::About => "about",
            Self::Team => "team",
            Self::Support => "support",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A same-site link found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// Normalized absolute URL
    pub url: Url,

    /// Category assigned from the URL path and anchor text
    pub category: LinkCategory,

    /// Visible text of the anchor, whitespace collapsed
    pub anchor_text: String,
}

/// Extracts and ranks the links of a page
#[derive(Debug, Clone)]
pub struct LinkDiscoverer {
    skip_patterns: Vec<String>,
    binary_extensions: Vec<String>,
    keywords: Vec<(LinkCategory, Vec<String>)>,
    cap: usize,
}

impl LinkDiscoverer {
    /// Creates a discoverer from the filter lists and a per-page link cap
    pub fn new(filters: &FilterConfig, cap: usize) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };

        Self {
            skip_patterns: lower(&filters.skip_patterns),
            binary_extensions: lower(&filters.binary_extensions),
            keywords: vec![
                (LinkCategory::Contact, lower(&filters.contact_keywords)),
                (LinkCategory::About, lower(&filters.about_keywords)),
                (LinkCategory::Team, lower(&filters.team_keywords)),
                (LinkCategory::Support, lower(&filters.support_keywords)),
            ],
            cap,
        }
    }

    /// Returns the maximum number of links kept per page
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Discovers the same-site links of a page
    ///
    /// # Link Extraction Rules
    ///
    /// **Include:**
    /// - `<a href="...">` tags anywhere in the document
    ///
    /// **Exclude:**
    /// - `<a href="..." download>`
    /// - `javascript:`, `mailto:`, `tel:` links and data URIs
    /// - Fragment-only links
    /// - Links to another host or port than `base_url`
    /// - Non-content URLs (auth, cart, search, pagination, binary files)
    ///
    /// The result is deduplicated, stably sorted by category and truncated
    /// to the cap.
    ///
    /// # Example
    ///
    /// ```
    /// use sponsor_finder::crawler::{LinkCategory, LinkDiscoverer};
    /// use url::Url;
    ///
    /// let html = r#"<a href="/blog">Blog</a><a href="/contact">Contact us</a>"#;
    /// let base = Url::parse("https://real-corp.com/").unwrap();
    /// let links = LinkDiscoverer::default().discover(&base, html);
    /// assert_eq!(links[0].url.as_str(), "https://real-corp.com/contact");
    /// assert_eq!(links[0].category, LinkCategory::Contact);
    /// ```
    pub fn discover(&self, base_url: &Url, html: &str) -> Vec<DiscoveredLink> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let mut links: Vec<DiscoveredLink> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Some(url) = resolve_link(href, base_url) else {
                continue;
            };

            if !same_site(base_url, &url) {
                tracing::trace!("Skipping off-site link {}", url);
                continue;
            }

            if self.is_non_content(&url) {
                tracing::trace!("Skipping non-content link {}", url);
                continue;
            }

            let anchor_text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            let category = self.classify(&url, &anchor_text);

            match positions.get(url.as_str()) {
                Some(&index) => {
                    // Same target linked twice; keep the more telling label
                    if category < links[index].category {
                        links[index].category = category;
                        links[index].anchor_text = anchor_text;
                    }
                }
                None => {
                    positions.insert(url.to_string(), links.len());
                    links.push(DiscoveredLink {
                        url,
                        category,
                        anchor_text,
                    });
                }
            }
        }

        links.sort_by_key(|link| link.category.rank());
        links.truncate(self.cap);
        links
    }

    /// Classifies a link by keyword match on its path and anchor text
    ///
    /// When keywords of several categories match, the most useful category
    /// wins (contact, then about, team, support).
    pub fn classify(&self, url: &Url, anchor_text: &str) -> LinkCategory {
        let haystack = format!("{} {}", url.path(), anchor_text).to_lowercase();

        self.keywords
            .iter()
            .find(|(_, words)| words.iter().any(|w| haystack.contains(w.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(LinkCategory::Other)
    }

    /// Returns true for URLs that never hold contact details
    pub fn is_non_content(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        let target = match url.query() {
            Some(query) => format!("{}?{}", path, query.to_lowercase()),
            None => path.clone(),
        };

        self.skip_patterns
            .iter()
            .any(|pattern| target.contains(pattern.as_str()))
            || self
                .binary_extensions
                .iter()
                .any(|ext| path.ends_with(ext.as_str()))
    }
}

impl Default for LinkDiscoverer {
    fn default() -> Self {
        Self::new(&FilterConfig::default(), DEFAULT_LINK_CAP)
    }
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://real-corp.com/page").unwrap()
    }

    fn discover(html: &str) -> Vec<DiscoveredLink> {
        LinkDiscoverer::default().discover(&base_url(), html)
    }

    fn urls(links: &[DiscoveredLink]) -> Vec<&str> {
        links.iter().map(|l| l.url.as_str()).collect()
    }

    #[test]
    fn test_extract_relative_link() {
        let links = discover(r#"<a href="/other">Link</a>"#);
        assert_eq!(urls(&links), vec!["https://real-corp.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let links = discover(r#"<a href="other">Link</a>"#);
        assert_eq!(urls(&links), vec!["https://real-corp.com/other"]);
    }

    #[test]
    fn test_cross_site_links_are_excluded() {
        let html = r#"
            <a href="https://other.com/contact">Contact</a>
            <a href="https://blog.real-corp.com/contact">Blog contact</a>
            <a href="https://real-corp.com:8443/contact">Other port</a>
            <a href="http://real-corp.com/about">About</a>
        "#;
        let links = discover(html);
        assert_eq!(urls(&links), vec!["http://real-corp.com/about"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@real-corp.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>Test</h1>">Data</a>
            <a href="JavaScript:alert(1)">JS upper</a>
        "#;
        assert!(discover(html).is_empty());
    }

    #[test]
    fn test_skip_download_and_fragment_links() {
        let html = r##"
            <a href="/file" download>Download</a>
            <a href="#section">Jump</a>
        "##;
        assert!(discover(html).is_empty());
    }

    #[test]
    fn test_skip_non_content_urls() {
        let html = r#"
            <a href="/login">Log in</a>
            <a href="/cart">Cart</a>
            <a href="/checkout/step-1">Checkout</a>
            <a href="/?s=sponsor">Search</a>
            <a href="/news?page=2">Next</a>
            <a href="/media/brochure.PDF">Brochure</a>
            <a href="/assets/app.js">Script</a>
            <a href="/contact">Contact</a>
        "#;
        let links = discover(html);
        assert_eq!(urls(&links), vec!["https://real-corp.com/contact"]);
    }

    #[test]
    fn test_fragments_are_stripped_and_deduplicated() {
        let html = r#"
            <a href="/about#history">History</a>
            <a href="/about/">About us</a>
            <a href="/about?utm_source=nav">About</a>
        "#;
        let links = discover(html);
        assert_eq!(urls(&links), vec!["https://real-corp.com/about"]);
    }

    #[test]
    fn test_duplicate_keeps_best_category() {
        let html = r#"
            <a href="/hello">Hello</a>
            <a href="/hello">Get in touch</a>
        "#;
        let links = discover(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].category, LinkCategory::Contact);
        assert_eq!(links[0].anchor_text, "Get in touch");
    }

    #[test]
    fn test_classification() {
        let d = LinkDiscoverer::default();
        let url = |p: &str| Url::parse(&format!("https://real-corp.com{}", p)).unwrap();

        assert_eq!(d.classify(&url("/contact-us"), ""), LinkCategory::Contact);
        assert_eq!(d.classify(&url("/x"), "Reach us"), LinkCategory::Contact);
        assert_eq!(d.classify(&url("/about-us"), ""), LinkCategory::About);
        assert_eq!(d.classify(&url("/our-team"), ""), LinkCategory::Team);
        assert_eq!(d.classify(&url("/faq"), ""), LinkCategory::Support);
        assert_eq!(d.classify(&url("/blog/post"), "Read more"), LinkCategory::Other);
        // Contact beats team when both match
        assert_eq!(d.classify(&url("/team"), "Contact the team"), LinkCategory::Contact);
    }

    #[test]
    fn test_sorted_by_category_stably() {
        let html = r#"
            <a href="/blog">Blog</a>
            <a href="/faq">FAQ</a>
            <a href="/leadership">Leadership</a>
            <a href="/news">News</a>
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
        "#;
        let links = discover(html);
        assert_eq!(
            urls(&links),
            vec![
                "https://real-corp.com/contact",
                "https://real-corp.com/about",
                "https://real-corp.com/leadership",
                "https://real-corp.com/faq",
                "https://real-corp.com/blog",
                "https://real-corp.com/news",
            ]
        );
    }

    #[test]
    fn test_cap_truncates_after_sorting() {
        let mut html = String::new();
        for i in 0..15 {
            html.push_str(&format!(r#"<a href="/post-{}">Post</a>"#, i));
        }
        html.push_str(r#"<a href="/contact">Contact</a>"#);

        let links = discover(&html);
        assert_eq!(links.len(), DEFAULT_LINK_CAP);
        assert_eq!(links[0].url.as_str(), "https://real-corp.com/contact");

        let d = LinkDiscoverer::new(&FilterConfig::default(), 3);
        assert_eq!(d.discover(&base_url(), &html).len(), 3);
    }

    #[test]
    fn test_anchor_text_whitespace_collapsed() {
        let html = "<a href=\"/team\">\n  Meet   the\n  <b>team</b>\n</a>";
        let links = discover(html);
        assert_eq!(links[0].anchor_text, "Meet the team");
    }

    #[test]
    fn test_follow_nofollow_links() {
        let links = discover(r#"<a href="/page2" rel="nofollow">Link</a>"#);
        assert_eq!(links.len(), 1);
    }
}
