//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The lifecycle of one crawl (idle, analyzing, visiting, done, stopped)
//! - `PageState`: The outcome of visiting an individual page

mod crawl_state;
mod page_state;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_state::PageState;
