//! URL handling module for Sponsor-Finder
//!
//! This module provides URL normalization, host extraction, and the same-site
//! test that keeps a crawl on one organization's website.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{email_domain, extract_domain};
pub use normalize::{normalize_url, parse_seed_url};

/// Returns true if `candidate` lives on the same site as `base`
///
/// Two URLs are on the same site when their hosts match and their explicit
/// ports match. The scheme is ignored, so `http://` and `https://` links to
/// the same host are both followed.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sponsor_finder::url::same_site;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// assert!(same_site(&base, &Url::parse("http://example.com/contact").unwrap()));
/// assert!(!same_site(&base, &Url::parse("https://blog.example.com/").unwrap()));
/// ```
pub fn same_site(base: &Url, candidate: &Url) -> bool {
    match (extract_domain(base), extract_domain(candidate)) {
        (Some(a), Some(b)) => a == b && base.port() == candidate.port(),
        _ => false,
    }
}

/// Returns the `scheme://host[:port]` root of a URL
pub fn site_root(url: &Url) -> Url {
    let mut root = url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}
