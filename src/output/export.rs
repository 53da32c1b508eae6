//! CSV and JSON export of harvested contacts

use crate::verify::VerificationResult;
use crate::FinderError;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use url::Url;

const CSV_HEADER: &str = "website,email,found_date,verified";

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub website: String,
    pub email: String,
    pub found_date: String,
    pub verified: bool,
}

/// Builds export rows for one crawl
///
/// `verified` is true for addresses whose verification status is
/// recommended. Rows follow the order of `emails`.
pub fn build_records<I>(
    website: &Url,
    emails: I,
    verification: &[VerificationResult],
) -> Vec<ExportRecord>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let found_date = Utc::now().format("%Y-%m-%d").to_string();
    let verified: HashMap<&str, bool> = verification
        .iter()
        .map(|r| (r.email.as_str(), r.status.is_recommended()))
        .collect();

    emails
        .into_iter()
        .map(|email| {
            let email = email.as_ref();
            ExportRecord {
                website: website.to_string(),
                email: email.to_string(),
                found_date: found_date.clone(),
                verified: verified.get(email).copied().unwrap_or(false),
            }
        })
        .collect()
}

/// Quotes a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders records as CSV text, header included
pub fn to_csv(records: &[ExportRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + records.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&record.website),
            csv_field(&record.email),
            csv_field(&record.found_date),
            record.verified
        ));
    }

    out
}

/// Writes records to a CSV file
pub fn export_csv(records: &[ExportRecord], path: &Path) -> crate::Result<()> {
    write_file(path, to_csv(records).as_bytes())?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes records to a pretty-printed JSON file
pub fn export_json(records: &[ExportRecord], path: &Path) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_file(path, json.as_bytes())?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> crate::Result<()> {
    let file = File::create(path)
        .map_err(|e| FinderError::Export(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents)?;
    writer.flush()?;
    Ok(())
}
