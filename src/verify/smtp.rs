//! Advisory SMTP mailbox probe
//!
//! Opens a plain SMTP session with a mail exchanger and asks whether it would
//! accept mail for an address, without sending any message:
//!
//! ```text
//! <- 220 greeting
//! -> HELO <helo-domain>      <- 250
//! -> MAIL FROM:<sender>      <- 250
//! -> RCPT TO:<address>       <- 250 accepted / 5xx rejected / other inconclusive
//! -> QUIT
//! ```
//!
//! Many servers accept every recipient or block probes outright, so the
//! answer is only ever a hint.

use crate::config::VerificationConfig;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// What the mail exchanger said about the recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpOutcome {
    /// RCPT TO answered 250
    Accepted,

    /// RCPT TO answered 5xx
    Rejected,

    /// Any other reply, or the session could not be completed
    Inconclusive,
}

impl SmtpOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for SmtpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a probe with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbe {
    pub outcome: SmtpOutcome,
    pub reason: String,
}

impl SmtpProbe {
    pub fn accepted(reason: impl Into<String>) -> Self {
        Self {
            outcome: SmtpOutcome::Accepted,
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            outcome: SmtpOutcome::Rejected,
            reason: reason.into(),
        }
    }

    pub fn inconclusive(reason: impl Into<String>) -> Self {
        Self {
            outcome: SmtpOutcome::Inconclusive,
            reason: reason.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == SmtpOutcome::Accepted
    }
}

/// Session parameters for a probe
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub port: u16,
    pub helo_domain: String,
    pub sender: String,
    pub timeout: Duration,
}

impl From<&VerificationConfig> for SmtpSettings {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            port: config.smtp_port,
            helo_domain: config.helo_domain.clone(),
            sender: config.sender.clone(),
            timeout: Duration::from_secs(config.smtp_timeout_secs),
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

/// Probes one mail exchanger for `email`
///
/// Never fails: connection problems, timeouts and protocol surprises all
/// come back as `SmtpOutcome::Inconclusive` with the reason.
pub async fn probe_host(host: &str, email: &str, settings: &SmtpSettings) -> SmtpProbe {
    let session = converse(host, email, settings);

    match tokio::time::timeout(settings.timeout, session).await {
        Ok(Ok(probe)) => probe,
        Ok(Err(e)) => {
            tracing::warn!("SMTP probe of {} via {} failed: {}", email, host, e);
            SmtpProbe::inconclusive(format!("SMTP verification error: {}", e))
        }
        Err(_) => {
            tracing::warn!("SMTP probe of {} via {} timed out", email, host);
            SmtpProbe::inconclusive(format!(
                "SMTP verification timed out after {:?}",
                settings.timeout
            ))
        }
    }
}

async fn converse(host: &str, email: &str, settings: &SmtpSettings) -> std::io::Result<SmtpProbe> {
    let stream = TcpStream::connect((host, settings.port)).await?;
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let (code, text) = read_reply(&mut reader).await?;
    if code != 220 {
        return Ok(SmtpProbe::inconclusive(format!(
            "Unexpected greeting: {} {}",
            code, text
        )));
    }

    let steps = [
        format!("HELO {}", settings.helo_domain),
        format!("MAIL FROM:<{}>", settings.sender),
    ];
    for command in &steps {
        let (code, text) = command_reply(&mut reader, &mut writer, command).await?;
        if code != 250 {
            quit(&mut reader, &mut writer).await;
            return Ok(SmtpProbe::inconclusive(format!(
                "Server refused {}: {} {}",
                command, code, text
            )));
        }
    }

    let (code, text) =
        command_reply(&mut reader, &mut writer, &format!("RCPT TO:<{}>", email)).await?;
    quit(&mut reader, &mut writer).await;

    let probe = match code {
        250 => SmtpProbe::accepted("Email appears to be valid"),
        500..=599 => SmtpProbe::rejected(format!("SMTP verification failed: {} {}", code, text)),
        _ => SmtpProbe::inconclusive(format!("SMTP verification failed: {} {}", code, text)),
    };

    tracing::debug!("SMTP probe of {} via {}: {}", email, host, probe.outcome);
    Ok(probe)
}

async fn command_reply(
    reader: &mut BufReader<OwnedReadHalf>,
    writer: &mut OwnedWriteHalf,
    command: &str,
) -> std::io::Result<(u16, String)> {
    writer.write_all(format!("{}\r\n", command).as_bytes()).await?;
    writer.flush().await?;
    read_reply(reader).await
}

/// Sends QUIT and ignores whatever happens
async fn quit(reader: &mut BufReader<OwnedReadHalf>, writer: &mut OwnedWriteHalf) {
    let _ = command_reply(reader, writer, "QUIT").await;
}

/// Reads one possibly multi-line reply (`250-...` continuation lines)
async fn read_reply(reader: &mut BufReader<OwnedReadHalf>) -> std::io::Result<(u16, String)> {
    let mut lines = Vec::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed by server",
            ));
        }

        let line = line.trim_end_matches(['\r', '\n']);
        let (code, rest) = parse_reply_line(line).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("malformed SMTP reply: {}", line),
            )
        })?;

        lines.push(rest.trim_start_matches(['-', ' ']).to_string());

        if !rest.starts_with('-') {
            return Ok((code, lines.join(" ")));
        }
    }
}

/// Splits `250-text` or `250 text` into the code and the remainder
fn parse_reply_line(line: &str) -> Option<(u16, &str)> {
    let code = line.get(..3)?.parse().ok()?;
    Some((code, line.get(3..).unwrap_or("")))
}
