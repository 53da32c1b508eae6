//! Email extraction from raw page text
//!
//! Two patterns run over the whole document: a plain "looks like an email"
//! pattern and a `mailto:` pattern that captures only the address. Every
//! match is lower-cased, trimmed and passed through a validity gate before
//! it reaches the result set.

use crate::config::FilterConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static DIRECT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static MAILTO_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)mailto:([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})")
        .expect("valid mailto regex")
});

const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;
const MAX_EMAIL_LEN: usize = 254;

/// Finds contact email addresses in page content
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    denylist: HashSet<String>,
    image_extensions: Vec<String>,
}

impl EmailExtractor {
    /// Creates an extractor using the denylist and image extensions from the filters
    pub fn new(filters: &FilterConfig) -> Self {
        Self {
            denylist: filters
                .denylist
                .iter()
                .map(|e| e.trim().to_lowercase())
                .collect(),
            image_extensions: filters
                .image_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Extracts every valid email address from `text`
    ///
    /// The input can be raw HTML or plain text. The result is a set, so an
    /// address that appears both as text and in a `mailto:` link is counted
    /// once.
    ///
    /// # Examples
    ///
    /// ```
    /// use sponsor_finder::crawler::EmailExtractor;
    ///
    /// let extractor = EmailExtractor::default();
    /// let found = extractor.extract(r#"<a href="mailto:a@b.com">click</a>"#);
    /// assert!(found.contains("a@b.com"));
    /// assert_eq!(found.len(), 1);
    /// ```
    pub fn extract(&self, text: &str) -> HashSet<String> {
        let mailto = MAILTO_EMAIL
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str());

        let direct = DIRECT_EMAIL.find_iter(text).map(|m| m.as_str());

        mailto
            .chain(direct)
            .map(|candidate| candidate.trim().to_lowercase())
            .filter(|email| self.is_acceptable(email))
            .collect()
    }

    /// Returns true if a normalized address passes every check of the gate
    pub fn is_acceptable(&self, email: &str) -> bool {
        if self.denylist.contains(email) {
            tracing::trace!("Dropping denylisted address {}", email);
            return false;
        }

        if self
            .image_extensions
            .iter()
            .any(|ext| email.contains(ext.as_str()))
        {
            tracing::trace!("Dropping image-like match {}", email);
            return false;
        }

        is_syntactically_valid(email)
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

/// Checks the structural rules for an email address
///
/// ```
/// use sponsor_finder::crawler::is_syntactically_valid;
///
/// assert!(is_syntactically_valid("sales@real-corp.com"));
/// assert!(!is_syntactically_valid("a..b@real-corp.com"));
/// assert!(!is_syntactically_valid("sales@-real-corp.com"));
/// ```
pub fn is_syntactically_valid(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= MAX_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    // Checked above that there are at least two labels
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
