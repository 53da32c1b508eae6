//! Post-crawl verification of harvested addresses
//!
//! # Components
//!
//! - `DomainVerifier`: MX lookups and the optional SMTP probe
//! - `VerificationResult` / `VerificationStatus`: per-address outcome
//! - `VerificationSummary`: counts over a batch

mod mx;
mod smtp;

pub use mx::DomainVerifier;
pub use smtp::{probe_host, SmtpOutcome, SmtpProbe, SmtpSettings};

use serde::Serialize;
use std::fmt;

/// Overall verdict for one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    /// Domain has MX records and the mail server accepted the recipient
    Valid,

    /// Domain has MX records but the SMTP probe did not confirm the recipient
    Questionable,

    /// Domain has MX records; no SMTP probe was run
    DomainValid,

    /// No MX records (or the lookup failed)
    InvalidDomain,
}

impl VerificationStatus {
    /// Derives the verdict from the MX check and the optional probe
    pub fn derive(mx_found: bool, probe: Option<&SmtpProbe>) -> Self {
        match (mx_found, probe) {
            (false, _) => Self::InvalidDomain,
            (true, None) => Self::DomainValid,
            (true, Some(p)) if p.is_accepted() => Self::Valid,
            (true, Some(_)) => Self::Questionable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Questionable => "Questionable",
            Self::DomainValid => "Domain Valid",
            Self::InvalidDomain => "Invalid Domain",
        }
    }

    /// Addresses worth contacting
    pub fn is_recommended(&self) -> bool {
        matches!(self, Self::Valid | Self::DomainValid)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verification outcome for one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub email: String,
    pub format_valid: bool,
    pub mx_found: bool,
    pub smtp: Option<SmtpProbe>,
    pub status: VerificationStatus,
}

impl VerificationResult {
    /// Returns true if the SMTP probe ran and accepted the address
    pub fn smtp_accepted(&self) -> bool {
        self.smtp.as_ref().is_some_and(SmtpProbe::is_accepted)
    }

    /// Reason from the SMTP probe, empty when no probe ran
    pub fn smtp_reason(&self) -> &str {
        self.smtp.as_ref().map(|p| p.reason.as_str()).unwrap_or("")
    }
}

/// Counts per status over a batch of results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub valid: usize,
    pub questionable: usize,
    pub domain_valid: usize,
    pub invalid_domain: usize,
}

impl VerificationSummary {
    pub fn from_results(results: &[VerificationResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.status {
                VerificationStatus::Valid => summary.valid += 1,
                VerificationStatus::Questionable => summary.questionable += 1,
                VerificationStatus::DomainValid => summary.domain_valid += 1,
                VerificationStatus::InvalidDomain => summary.invalid_domain += 1,
            }
        }

        summary
    }

    /// Share of addresses with a working mail domain, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let good = self.valid + self.questionable + self.domain_valid;
        good as f64 / self.total as f64 * 100.0
    }
}

/// Addresses worth contacting, in result order
pub fn recommended_contacts(results: &[VerificationResult]) -> Vec<&str> {
    results
        .iter()
        .filter(|r| r.status.is_recommended())
        .map(|r| r.email.as_str())
        .collect()
}
