//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{
    CompanyRecord, CompanyType, ContactRecord, ContactType, DatabaseStats, EmailStatus,
    NewCompany, OutreachEmail, SearchRecord, TemplateRecord,
};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    #[error("Contact not found: {0}")]
    ContactNotFound(i64),

    #[error("Email not found: {0}")]
    EmailNotFound(i64),

    #[error("Template not found: {0}")]
    TemplateNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines the database operations behind searches and outreach.
pub trait Storage {
    // ===== Companies =====

    /// Adds a company, or returns the ID of the company with the same URL
    fn add_company(&mut self, company: &NewCompany) -> StorageResult<i64>;

    /// Gets a company by ID
    fn get_company(&self, company_id: i64) -> StorageResult<CompanyRecord>;

    /// Gets a company by URL
    fn get_company_by_url(&self, url: &str) -> StorageResult<Option<CompanyRecord>>;

    /// Lists companies, newest first, optionally filtered by type
    fn list_companies(
        &self,
        company_type: Option<CompanyType>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<CompanyRecord>>;

    // ===== Contacts =====

    /// Adds a contact, or returns the ID of the existing contact with the
    /// same company and email
    ///
    /// # Arguments
    ///
    /// * `company_id` - The owning company
    /// * `email` - The normalized address
    /// * `contact_type` - Role inferred from the address
    /// * `is_verified` - Whether the address passed verification
    fn add_contact(
        &mut self,
        company_id: i64,
        email: &str,
        contact_type: ContactType,
        is_verified: bool,
    ) -> StorageResult<i64>;

    /// Sets the verification flag of a contact
    fn set_contact_verified(&mut self, contact_id: i64, verified: bool) -> StorageResult<()>;

    /// Gets all contacts of a company
    fn get_company_contacts(&self, company_id: i64) -> StorageResult<Vec<ContactRecord>>;

    // ===== Templates =====

    /// Adds an outreach template
    fn add_template(
        &mut self,
        name: &str,
        subject: &str,
        body: &str,
        category: Option<&str>,
    ) -> StorageResult<i64>;

    /// Gets a template by ID
    fn get_template(&self, template_id: i64) -> StorageResult<TemplateRecord>;

    /// Lists templates, optionally filtered by category
    fn list_templates(&self, category: Option<&str>) -> StorageResult<Vec<TemplateRecord>>;

    /// Increments a template's usage counter and stamps its last use
    fn record_template_use(&mut self, template_id: i64) -> StorageResult<()>;

    // ===== Outreach Emails =====

    /// Stores a drafted outreach email
    fn draft_email(
        &mut self,
        company_id: i64,
        contact_id: Option<i64>,
        subject: &str,
        body: &str,
        template_used: Option<&str>,
    ) -> StorageResult<i64>;

    /// Gets an outreach email by ID
    fn get_email(&self, email_id: i64) -> StorageResult<OutreachEmail>;

    /// Lists outreach emails, newest first, optionally filtered by status
    fn list_emails(&self, status: Option<EmailStatus>) -> StorageResult<Vec<OutreachEmail>>;

    /// Updates an email's status, stamping `sent_at` or `replied_at` as appropriate
    fn update_email_status(&mut self, email_id: i64, status: EmailStatus) -> StorageResult<()>;

    // ===== Search History =====

    /// Records a search
    fn record_search(
        &mut self,
        search_type: &str,
        query: &str,
        results_count: usize,
        config_hash: Option<&str>,
    ) -> StorageResult<i64>;

    /// Gets the most recent searches, newest first
    fn recent_searches(&self, limit: usize) -> StorageResult<Vec<SearchRecord>>;

    // ===== Statistics =====

    /// Gets row counts across the database
    fn statistics(&self) -> StorageResult<DatabaseStats>;
}
