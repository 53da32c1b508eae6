use std::fmt;

/// Lifecycle of a single crawl
///
/// ```text
/// Idle -> Analyzing -> Visiting(1) -> ... -> Visiting(n) -> Done
///                  \-> Done                \-> Stopped
/// ```
///
/// `Analyzing` is only entered by the structure-analysis strategy; a
/// breadth-first crawl goes straight from `Idle` to `Visiting(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Constructed, frontier not yet seeded
    Idle,

    /// Fetching the homepage to rank the rest of the site
    Analyzing,

    /// Visiting the page with this 1-based index
    Visiting(usize),

    /// Budget exhausted or frontier empty
    Done,

    /// Cancellation observed between page visits
    Stopped,
}

impl CrawlState {
    /// Returns true once the crawl can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Stopped)
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        use CrawlState::*;

        match (*self, next) {
            (Idle, Analyzing) | (Idle, Visiting(1)) => true,
            (Analyzing, Visiting(i)) => i >= 1,
            (Visiting(i), Visiting(j)) => j == i + 1,
            (Idle | Analyzing | Visiting(_), Done | Stopped) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Visiting(i) => write!(f, "visiting({})", i),
            Self::Done => write!(f, "done"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
