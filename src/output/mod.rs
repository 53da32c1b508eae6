//! Output module for reporting and exporting search results
//!
//! This module handles:
//! - Printing harvested emails and verification reports
//! - Printing database statistics
//! - Exporting contacts as CSV or JSON

pub mod export;
pub mod stats;

pub use export::{build_records, export_csv, export_json, to_csv, ExportRecord};
pub use stats::{
    format_emails, format_statistics, format_verification_summary, format_verification_table,
    print_emails, print_statistics, print_verification_summary, print_verification_table,
};
