use crate::config::VerificationConfig;
use crate::crawler::is_syntactically_valid;
use crate::url::email_domain;
use crate::verify::smtp::{probe_host, SmtpProbe, SmtpSettings};
use crate::verify::{VerificationResult, VerificationStatus};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Checks harvested addresses against DNS and, optionally, their mail servers
pub struct DomainVerifier {
    resolver: TokioAsyncResolver,
    smtp: SmtpSettings,
    batch_delay: Duration,
    cancel: CancellationToken,
}

impl DomainVerifier {
    /// Creates a verifier using the system resolver configuration
    ///
    /// Falls back to the resolver library's default upstreams when the
    /// system configuration cannot be read.
    pub fn new(config: &VerificationConfig) -> Self {
        let (resolver_config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(system) => system,
            Err(e) => {
                tracing::debug!("Using default resolver configuration: {}", e);
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = Duration::from_secs(config.dns_timeout_secs);

        Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            smtp: SmtpSettings::from(config),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop batch verification from outside
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Overrides the pause between addresses in a batch
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Returns true iff the address's domain publishes at least one MX record
    ///
    /// Resolution failures of any kind count as "no MX".
    pub async fn verify_domain(&self, email: &str) -> bool {
        let Some(domain) = email_domain(email) else {
            tracing::warn!("No domain in {}", email);
            return false;
        };

        let found = !self.mail_exchangers(&domain).await.is_empty();
        if !found {
            tracing::warn!("No MX records found for domain: {}", domain);
        }
        found
    }

    /// Looks up the mail exchangers of a domain, most preferred first
    pub async fn mail_exchangers(&self, domain: &str) -> Vec<String> {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => {
                let mut records: Vec<(u16, String)> = lookup
                    .iter()
                    .map(|mx| {
                        let host = mx.exchange().to_utf8();
                        (mx.preference(), host.trim_end_matches('.').to_string())
                    })
                    .filter(|(_, host)| !host.is_empty())
                    .collect();
                records.sort();
                records.into_iter().map(|(_, host)| host).collect()
            }
            Err(e) => {
                tracing::debug!("MX lookup for {} failed: {}", domain, e);
                Vec::new()
            }
        }
    }

    /// Asks the most preferred mail exchanger whether it accepts the address
    ///
    /// Advisory only; always returns a reason.
    pub async fn verify_smtp(&self, email: &str) -> SmtpProbe {
        let Some(domain) = email_domain(email) else {
            return SmtpProbe::inconclusive("Address has no domain");
        };

        let exchangers = self.mail_exchangers(&domain).await;
        let Some(host) = exchangers.first() else {
            return SmtpProbe::inconclusive(format!("No MX records found for {}", domain));
        };

        probe_host(host, email, &self.smtp).await
    }

    /// Verifies one address
    ///
    /// The SMTP probe only runs when requested and the domain has MX records.
    pub async fn verify(&self, email: &str, smtp: bool) -> VerificationResult {
        tracing::info!("Verifying email: {}", email);

        let format_valid = is_syntactically_valid(email);
        let mx_found = format_valid && self.verify_domain(email).await;

        let probe = if smtp && mx_found {
            Some(self.verify_smtp(email).await)
        } else {
            None
        };

        VerificationResult {
            email: email.to_string(),
            format_valid,
            mx_found,
            status: VerificationStatus::derive(mx_found, probe.as_ref()),
            smtp: probe,
        }
    }

    /// Verifies addresses one at a time in sorted order
    ///
    /// Pauses between addresses and stops early when cancelled, returning
    /// the results gathered so far.
    pub async fn verify_all<'a, I>(&self, emails: I, smtp: bool) -> Vec<VerificationResult>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut sorted: Vec<&String> = emails.into_iter().collect();
        sorted.sort();

        let mut results = Vec::with_capacity(sorted.len());
        for (i, email) in sorted.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!("Verification cancelled after {} addresses", results.len());
                break;
            }

            results.push(self.verify(email, smtp).await);

            if i + 1 < sorted.len() && !self.batch_delay.is_zero() {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep(self.batch_delay) => {}
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> DomainVerifier {
        let config = VerificationConfig {
            dns_timeout_secs: 2,
            ..VerificationConfig::default()
        };
        DomainVerifier::new(&config).with_batch_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_nonexistent_domain_has_no_mx() {
        assert!(
            !verifier()
                .verify_domain("user@nonexistent-domain-xyz123.invalid")
                .await
        );
    }

    #[tokio::test]
    async fn test_address_without_domain() {
        let v = verifier();
        assert!(!v.verify_domain("not-an-address").await);
        let probe = v.verify_smtp("not-an-address").await;
        assert_eq!(probe.outcome, crate::verify::SmtpOutcome::Inconclusive);
    }

    #[tokio::test]
    async fn test_verify_invalid_domain_skips_smtp() {
        let result = verifier()
            .verify("sales@nonexistent-domain-xyz123.invalid", true)
            .await;

        assert!(result.format_valid);
        assert!(!result.mx_found);
        assert!(result.smtp.is_none());
        assert_eq!(result.status, VerificationStatus::InvalidDomain);
    }

    #[tokio::test]
    async fn test_verify_all_sorted() {
        let emails: Vec<String> = vec![
            "b@nonexistent-domain-xyz123.invalid".to_string(),
            "a@nonexistent-domain-xyz123.invalid".to_string(),
        ];
        let results = verifier().verify_all(&emails, false).await;

        let order: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "a@nonexistent-domain-xyz123.invalid",
                "b@nonexistent-domain-xyz123.invalid"
            ]
        );
    }

    #[tokio::test]
    async fn test_verify_all_honours_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let v = verifier().with_cancellation(token);
        let emails = vec!["a@nonexistent-domain-xyz123.invalid".to_string()];

        assert!(v.verify_all(&emails, false).await.is_empty());
    }
}
