use std::fmt;

/// Outcome of a single page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Fetched and scanned for emails and links
    Processed,

    /// HTTP 404 or 410
    DeadLink,

    /// Connection refused, DNS failure, TLS error or timeout
    Unreachable,

    /// HTTP 429
    RateLimited,

    /// 5xx, other non-2xx statuses, unreadable bodies, proxy errors
    Failed,

    /// Content-Type is not text
    ContentMismatch,
}

impl PageState {
    /// Maps a non-2xx HTTP status to the state it leaves the page in
    ///
    /// ```
    /// use sponsor_finder::PageState;
    ///
    /// assert_eq!(PageState::from_http_status(410), PageState::DeadLink);
    /// assert_eq!(PageState::from_http_status(503), PageState::Failed);
    /// ```
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 | 410 => Self::DeadLink,
            429 => Self::RateLimited,
            _ => Self::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::Unreachable => "unreachable",
            Self::RateLimited => "rate_limited",
            Self::Failed => "failed",
            Self::ContentMismatch => "content_mismatch",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
