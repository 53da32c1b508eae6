use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sponsor_finder::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the domain part of an email address, if it has one
///
/// ```
/// use sponsor_finder::url::email_domain;
///
/// assert_eq!(email_domain("sales@Real-Corp.com"), Some("real-corp.com".to_string()));
/// assert_eq!(email_domain("no-at-sign"), None);
/// ```
pub fn email_domain(email: &str) -> Option<String> {
    let (local, domain) = email.trim().rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some(domain.trim_end_matches('.').to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(
            email_domain("user@nonexistent-domain-xyz123.invalid"),
            Some("nonexistent-domain-xyz123.invalid".to_string())
        );
        assert_eq!(email_domain("user@mail.example.com."), Some("mail.example.com".to_string()));
        assert_eq!(email_domain("@example.com"), None);
        assert_eq!(email_domain("user@"), None);
        assert_eq!(email_domain(""), None);
    }
}
