use crate::UrlError;
use url::Url;

/// Tracking query parameters removed during normalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "ref", "source"];

/// Normalizes a URL so that trivially different spellings of the same page
/// collapse to one frontier entry
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Lowercase the host (the scheme and any `www.` prefix are kept, since
///    the normalized URL is what gets fetched)
/// 3. Collapse repeated slashes and drop a trailing slash (except for root /)
/// 4. Remove the fragment
/// 5. Remove tracking query parameters, keeping the order of the rest
/// 6. Remove an empty query string
///
/// # Examples
///
/// ```
/// use sponsor_finder::url::normalize_url;
///
/// let url = normalize_url("https://Example.COM/contact/#form").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/contact");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // The url crate already lowercases registrable hosts
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    if url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    Ok(url)
}

/// Parses user input as a seed URL, assuming HTTPS when no scheme is given
///
/// ```
/// use sponsor_finder::url::parse_seed_url;
///
/// let url = parse_seed_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn parse_seed_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        normalize_url(trimmed)
    } else {
        normalize_url(&format!("https://{}", trimmed))
    }
}

/// Collapses empty segments and removes a trailing slash
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", segments.join("/"))
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_kept() {
        let result = normalize_url("http://example.com/page").unwrap();
        assert_eq!(result.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_www_is_kept() {
        let result = normalize_url("https://www.example.com/").unwrap();
        assert_eq!(result.as_str(), "https://www.example.com/");
    }

    #[test]
    fn test_remove_trailing_slash() {
        let result = normalize_url("https://example.com/contact/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/contact");
    }

    #[test]
    fn test_keep_root_slash() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/about#team").unwrap();
        assert_eq!(result.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_remove_tracking_params_keep_others_in_order() {
        let result =
            normalize_url("https://example.com/page?b=2&utm_medium=email&a=1&fbclid=123").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?b=2&a=1");
    }

    #[test]
    fn test_all_tracking_params_removed() {
        let result =
            normalize_url("https://example.com/page?utm_source=a&fbclid=b&gclid=c").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_dot_segments_and_repeated_slashes() {
        let result = normalize_url("https://example.com//a/../b/./c//").unwrap();
        assert_eq!(result.as_str(), "https://example.com/b/c");
    }

    #[test]
    fn test_lowercase_host_only() {
        let result = normalize_url("https://EXAMPLE.COM/Contact").unwrap();
        assert_eq!(result.as_str(), "https://example.com/Contact");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(
            normalize_url("not a url"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_port_is_kept() {
        let result = normalize_url("http://127.0.0.1:8080/contact").unwrap();
        assert_eq!(result.as_str(), "http://127.0.0.1:8080/contact");
    }

    #[test]
    fn test_seed_without_scheme_gets_https() {
        let result = parse_seed_url("  real-corp.com/about ").unwrap();
        assert_eq!(result.as_str(), "https://real-corp.com/about");
    }

    #[test]
    fn test_seed_with_scheme_is_untouched() {
        let result = parse_seed_url("http://real-corp.com").unwrap();
        assert_eq!(result.as_str(), "http://real-corp.com/");
    }
}
