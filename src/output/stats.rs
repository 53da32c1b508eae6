//! Console reports for crawl results, verification and the database
//!
//! Each report is built as a string by a `format_*` function and printed
//! by its `print_*` counterpart.

use crate::storage::{DatabaseStats, SearchRecord};
use crate::verify::{recommended_contacts, VerificationResult, VerificationSummary};
use std::fmt::Write;

/// Formats harvested emails, one per line, in the given order
pub fn format_emails(website: &str, emails: &[String]) -> String {
    let mut out = String::new();

    if emails.is_empty() {
        let _ = writeln!(out, "No emails found on {}", website);
        return out;
    }

    let _ = writeln!(out, "Found {} email(s) on {}:", emails.len(), website);
    for email in emails {
        let _ = writeln!(out, "  {}", email);
    }
    out
}

pub fn print_emails(website: &str, emails: &[String]) {
    print!("{}", format_emails(website, emails));
}

/// Formats one row per verified address
pub fn format_verification_table(results: &[VerificationResult]) -> String {
    let width = results
        .iter()
        .map(|r| r.email.len())
        .max()
        .unwrap_or(0)
        .max("Email".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<6}  {:<4}  {:<8}  {:<14}  Reason",
        "Email",
        "Format",
        "MX",
        "SMTP",
        "Status",
        width = width
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 48));

    for result in results {
        let smtp = match &result.smtp {
            Some(probe) => probe.outcome.to_string(),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:<6}  {:<4}  {:<8}  {:<14}  {}",
            result.email,
            yes_no(result.format_valid),
            yes_no(result.mx_found),
            smtp,
            result.status.label(),
            result.smtp_reason(),
            width = width
        );
    }

    out
}

pub fn print_verification_table(results: &[VerificationResult]) {
    print!("{}", format_verification_table(results));
}

/// Formats batch counts and the recommended contacts
pub fn format_verification_summary(results: &[VerificationResult]) -> String {
    let summary = VerificationSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out, "Verification Summary:");
    let _ = writeln!(out, "  Total checked: {}", summary.total);
    let _ = writeln!(out, "  Valid: {}", summary.valid);
    let _ = writeln!(out, "  Questionable: {}", summary.questionable);
    let _ = writeln!(out, "  Domain valid: {}", summary.domain_valid);
    let _ = writeln!(out, "  Invalid domain: {}", summary.invalid_domain);
    let _ = writeln!(out, "  Success rate: {:.1}%", summary.success_rate());

    let recommended = recommended_contacts(results);
    if !recommended.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommended contacts ({}):", recommended.len());
        for email in recommended {
            let _ = writeln!(out, "  - {}", email);
        }
    }

    out
}

pub fn print_verification_summary(results: &[VerificationResult]) {
    print!("{}", format_verification_summary(results));
}

/// Formats database row counts and the latest searches
pub fn format_statistics(stats: &DatabaseStats, recent: &[SearchRecord]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Database Statistics ===\n");
    let _ = writeln!(out, "Companies:");
    let _ = writeln!(out, "  Total: {}", stats.total_companies);
    let _ = writeln!(out, "  Sponsors: {}", stats.total_sponsors);
    let _ = writeln!(out, "  Vendors: {}", stats.total_vendors);
    let _ = writeln!(out);

    let verified_rate = if stats.total_contacts > 0 {
        stats.verified_contacts as f64 / stats.total_contacts as f64 * 100.0
    } else {
        0.0
    };
    let _ = writeln!(out, "Contacts:");
    let _ = writeln!(out, "  Total: {}", stats.total_contacts);
    let _ = writeln!(
        out,
        "  Verified: {} ({:.1}%)",
        stats.verified_contacts, verified_rate
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Outreach Emails:");
    let _ = writeln!(out, "  Total: {}", stats.total_emails);
    let _ = writeln!(out, "  Drafted: {}", stats.drafted_emails);
    let _ = writeln!(out, "  Sent: {}", stats.sent_emails);
    let _ = writeln!(out, "  Replied: {}", stats.replied_emails);
    let _ = writeln!(out);

    let _ = writeln!(out, "Templates: {}", stats.total_templates);
    let _ = writeln!(out, "Searches: {}", stats.total_searches);

    if !recent.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recent Searches:");
        for search in recent {
            let _ = writeln!(
                out,
                "  {} [{}] {} ({} results)",
                search.search_date, search.search_type, search.query, search.results_count
            );
        }
    }

    out
}

pub fn print_statistics(stats: &DatabaseStats, recent: &[SearchRecord]) {
    print!("{}", format_statistics(stats, recent));
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
