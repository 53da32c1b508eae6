//! Configuration module for Sponsor-Finder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a built-in default, so the configuration file is optional.
//!
//! # Example
//!
//! ```no_run
//! use sponsor_finder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sponsor-finder.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlStrategy, CrawlerConfig, FilterConfig, OutputConfig, ProxyConfig,
    UserAgentConfig, VerificationConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
