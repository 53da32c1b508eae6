//! Storage module for persisting search results and outreach data
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Companies and their harvested contacts
//! - Outreach templates and drafted emails
//! - Search history and statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::url::email_domain;
use crate::verify::VerificationResult;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(FinderError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> crate::Result<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Whether a company is a prospective sponsor or a parts vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompanyType {
    Sponsor,
    Vendor,
}

impl CompanyType {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Sponsor => "sponsor",
            Self::Vendor => "vendor",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "sponsor" => Some(Self::Sponsor),
            "vendor" => Some(Self::Vendor),
            _ => None,
        }
    }
}

/// Role of a contact address, inferred from its local part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContactType {
    General,
    Sales,
    Support,
    Info,
}

impl ContactType {
    /// Infers the role from the part before the `@`
    ///
    /// ```
    /// use sponsor_finder::storage::ContactType;
    ///
    /// assert_eq!(ContactType::infer("sales@real-corp.com"), ContactType::Sales);
    /// assert_eq!(ContactType::infer("jane.doe@real-corp.com"), ContactType::General);
    /// ```
    pub fn infer(email: &str) -> Self {
        let local = email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        if ["sales", "partner", "sponsor", "business"]
            .iter()
            .any(|k| local.contains(k))
        {
            Self::Sales
        } else if ["support", "help", "service"].iter().any(|k| local.contains(k)) {
            Self::Support
        } else if ["info", "contact", "hello", "enquir", "inquir"]
            .iter()
            .any(|k| local.contains(k))
        {
            Self::Info
        } else {
            Self::General
        }
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Sales => "sales",
            Self::Support => "support",
            Self::Info => "info",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "sales" => Some(Self::Sales),
            "support" => Some(Self::Support),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Lifecycle of an outreach email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmailStatus {
    Drafted,
    Sent,
    Replied,
    Bounced,
}

impl EmailStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Drafted => "drafted",
            Self::Sent => "sent",
            Self::Replied => "replied",
            Self::Bounced => "bounced",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "drafted" => Some(Self::Drafted),
            "sent" => Some(Self::Sent),
            "replied" => Some(Self::Replied),
            "bounced" => Some(Self::Bounced),
            _ => None,
        }
    }
}

/// Fields needed to insert a company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub url: String,
    pub company_type: CompanyType,
    pub industry: Option<String>,
    pub project_part: Option<String>,
    pub relevance_score: i64,
    pub notes: Option<String>,
}

impl NewCompany {
    /// A sponsor prospect with only a name and URL
    pub fn sponsor(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            company_type: CompanyType::Sponsor,
            industry: None,
            project_part: None,
            relevance_score: 0,
            notes: None,
        }
    }
}

/// Represents a company in the database
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub company_type: CompanyType,
    pub industry: Option<String>,
    pub project_part: Option<String>,
    pub relevance_score: i64,
    pub date_added: String,
    pub last_updated: String,
    pub notes: Option<String>,
}

/// Represents a harvested contact address
#[derive(Debug, Clone, Serialize)]
pub struct ContactRecord {
    pub id: i64,
    pub company_id: i64,
    pub email: String,
    pub contact_type: ContactType,
    pub is_verified: bool,
    pub is_primary: bool,
    pub date_added: String,
}

/// Represents a drafted or sent outreach email
#[derive(Debug, Clone, Serialize)]
pub struct OutreachEmail {
    pub id: i64,
    pub company_id: i64,
    pub contact_id: Option<i64>,
    pub subject: String,
    pub body: String,
    pub status: EmailStatus,
    pub created_at: String,
    pub sent_at: Option<String>,
    pub replied_at: Option<String>,
    pub template_used: Option<String>,
}

/// Represents an outreach template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateRecord {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: Option<String>,
    pub times_used: i64,
    pub created_at: String,
    pub last_used: Option<String>,
}

/// Represents a performed search
#[derive(Debug, Clone, Serialize)]
pub struct SearchRecord {
    pub id: i64,
    pub search_type: String,
    pub query: String,
    pub results_count: i64,
    pub config_hash: Option<String>,
    pub search_date: String,
}

/// Row counts across the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub total_companies: u64,
    pub total_sponsors: u64,
    pub total_vendors: u64,
    pub total_contacts: u64,
    pub verified_contacts: u64,
    pub total_emails: u64,
    pub drafted_emails: u64,
    pub sent_emails: u64,
    pub replied_emails: u64,
    pub total_templates: u64,
    pub total_searches: u64,
}

/// Saves one crawl as a sponsor company with its contacts
///
/// Contacts that appear in `verification` are flagged verified when their
/// status is recommended. Returns the company ID.
pub fn save_crawl_results<S, I>(
    storage: &mut S,
    website: &Url,
    emails: I,
    verification: &[VerificationResult],
) -> StorageResult<i64>
where
    S: Storage,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let name = website
        .host_str()
        .map(|h| h.trim_start_matches("www.").to_string())
        .unwrap_or_else(|| website.to_string());
    let company_id = storage.add_company(&NewCompany::sponsor(name, website.as_str()))?;

    let verified: HashMap<&str, bool> = verification
        .iter()
        .map(|r| (r.email.as_str(), r.status.is_recommended()))
        .collect();

    let mut saved = 0;
    for email in emails {
        let email = email.as_ref();
        if email_domain(email).is_none() {
            continue;
        }

        let is_verified = verified.get(email).copied().unwrap_or(false);
        let contact_id =
            storage.add_contact(company_id, email, ContactType::infer(email), is_verified)?;
        if is_verified {
            storage.set_contact_verified(contact_id, true)?;
        }
        saved += 1;
    }

    tracing::info!("Saved {} contacts for {}", saved, website);
    Ok(company_id)
}
