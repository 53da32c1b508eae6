//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{
    CompanyRecord, CompanyType, ContactRecord, ContactType, DatabaseStats, EmailStatus,
    NewCompany, OutreachEmail, SearchRecord, TemplateRecord,
};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const COMPANY_COLUMNS: &str = "id, name, url, type, industry, project_part, relevance_score,
     date_added, last_updated, notes";

const CONTACT_COLUMNS: &str =
    "id, company_id, email, contact_type, is_verified, is_primary, date_added";

const EMAIL_COLUMNS: &str = "id, company_id, contact_id, subject, body, status, created_at,
     sent_at, replied_at, template_used";

const TEMPLATE_COLUMNS: &str =
    "id, name, subject, body, category, times_used, created_at, last_used";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(FinderError)` - Failed to open database
    pub fn new(path: &Path) -> crate::Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> crate::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn count(&self, sql: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn company_from_row(row: &Row<'_>) -> rusqlite::Result<CompanyRecord> {
    Ok(CompanyRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        company_type: CompanyType::from_db_string(&row.get::<_, String>(3)?)
            .unwrap_or(CompanyType::Sponsor),
        industry: row.get(4)?,
        project_part: row.get(5)?,
        relevance_score: row.get(6)?,
        date_added: row.get(7)?,
        last_updated: row.get(8)?,
        notes: row.get(9)?,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactRecord> {
    Ok(ContactRecord {
        id: row.get(0)?,
        company_id: row.get(1)?,
        email: row.get(2)?,
        contact_type: ContactType::from_db_string(&row.get::<_, String>(3)?)
            .unwrap_or(ContactType::General),
        is_verified: row.get(4)?,
        is_primary: row.get(5)?,
        date_added: row.get(6)?,
    })
}

fn email_from_row(row: &Row<'_>) -> rusqlite::Result<OutreachEmail> {
    Ok(OutreachEmail {
        id: row.get(0)?,
        company_id: row.get(1)?,
        contact_id: row.get(2)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        status: EmailStatus::from_db_string(&row.get::<_, String>(5)?)
            .unwrap_or(EmailStatus::Drafted),
        created_at: row.get(6)?,
        sent_at: row.get(7)?,
        replied_at: row.get(8)?,
        template_used: row.get(9)?,
    })
}

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<TemplateRecord> {
    Ok(TemplateRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        subject: row.get(2)?,
        body: row.get(3)?,
        category: row.get(4)?,
        times_used: row.get(5)?,
        created_at: row.get(6)?,
        last_used: row.get(7)?,
    })
}

impl Storage for SqliteStorage {
    // ===== Companies =====

    fn add_company(&mut self, company: &NewCompany) -> StorageResult<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM companies WHERE url = ?1",
                params![company.url],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let now = now();
        self.conn.execute(
            "INSERT INTO companies (name, url, type, industry, project_part, relevance_score,
             date_added, last_updated, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?8)",
            params![
                company.name,
                company.url,
                company.company_type.to_db_string(),
                company.industry,
                company.project_part,
                company.relevance_score,
                now,
                company.notes
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_company(&self, company_id: i64) -> StorageResult<CompanyRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM companies WHERE id = ?1", COMPANY_COLUMNS),
                params![company_id],
                company_from_row,
            )
            .optional()?
            .ok_or(StorageError::CompanyNotFound(company_id))
    }

    fn get_company_by_url(&self, url: &str) -> StorageResult<Option<CompanyRecord>> {
        let company = self
            .conn
            .query_row(
                &format!("SELECT {} FROM companies WHERE url = ?1", COMPANY_COLUMNS),
                params![url],
                company_from_row,
            )
            .optional()?;

        Ok(company)
    }

    fn list_companies(
        &self,
        company_type: Option<CompanyType>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<CompanyRecord>> {
        // A negative LIMIT means no limit in SQLite
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let type_filter = company_type.map(|t| t.to_db_string());

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM companies
             WHERE ?1 IS NULL OR type = ?1
             ORDER BY date_added DESC, id DESC
             LIMIT ?2",
            COMPANY_COLUMNS
        ))?;

        let companies = stmt
            .query_map(params![type_filter, limit], company_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(companies)
    }

    // ===== Contacts =====

    fn add_contact(
        &mut self,
        company_id: i64,
        email: &str,
        contact_type: ContactType,
        is_verified: bool,
    ) -> StorageResult<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM contacts WHERE company_id = ?1 AND email = ?2",
                params![company_id, email],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let result = self.conn.execute(
            "INSERT INTO contacts (company_id, email, contact_type, is_verified, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                company_id,
                email,
                contact_type.to_db_string(),
                is_verified,
                now()
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, msg))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::ConstraintViolation(
                    msg.unwrap_or_else(|| format!("company {} does not exist", company_id)),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_contact_verified(&mut self, contact_id: i64, verified: bool) -> StorageResult<()> {
        let updated = self.conn.execute(
            "UPDATE contacts SET is_verified = ?1 WHERE id = ?2",
            params![verified, contact_id],
        )?;

        if updated == 0 {
            return Err(StorageError::ContactNotFound(contact_id));
        }
        Ok(())
    }

    fn get_company_contacts(&self, company_id: i64) -> StorageResult<Vec<ContactRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM contacts WHERE company_id = ?1 ORDER BY is_primary DESC, email",
            CONTACT_COLUMNS
        ))?;

        let contacts = stmt
            .query_map(params![company_id], contact_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    // ===== Templates =====

    fn add_template(
        &mut self,
        name: &str,
        subject: &str,
        body: &str,
        category: Option<&str>,
    ) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO templates (name, subject, body, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, subject, body, category, now()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_template(&self, template_id: i64) -> StorageResult<TemplateRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM templates WHERE id = ?1", TEMPLATE_COLUMNS),
                params![template_id],
                template_from_row,
            )
            .optional()?
            .ok_or(StorageError::TemplateNotFound(template_id))
    }

    fn list_templates(&self, category: Option<&str>) -> StorageResult<Vec<TemplateRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM templates WHERE ?1 IS NULL OR category = ?1 ORDER BY name",
            TEMPLATE_COLUMNS
        ))?;

        let templates = stmt
            .query_map(params![category], template_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(templates)
    }

    fn record_template_use(&mut self, template_id: i64) -> StorageResult<()> {
        let updated = self.conn.execute(
            "UPDATE templates SET times_used = times_used + 1, last_used = ?1 WHERE id = ?2",
            params![now(), template_id],
        )?;

        if updated == 0 {
            return Err(StorageError::TemplateNotFound(template_id));
        }
        Ok(())
    }

    // ===== Outreach Emails =====

    fn draft_email(
        &mut self,
        company_id: i64,
        contact_id: Option<i64>,
        subject: &str,
        body: &str,
        template_used: Option<&str>,
    ) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO emails (company_id, contact_id, subject, body, status, created_at,
             template_used)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                company_id,
                contact_id,
                subject,
                body,
                EmailStatus::Drafted.to_db_string(),
                now(),
                template_used
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_email(&self, email_id: i64) -> StorageResult<OutreachEmail> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM emails WHERE id = ?1", EMAIL_COLUMNS),
                params![email_id],
                email_from_row,
            )
            .optional()?
            .ok_or(StorageError::EmailNotFound(email_id))
    }

    fn list_emails(&self, status: Option<EmailStatus>) -> StorageResult<Vec<OutreachEmail>> {
        let status_filter = status.map(|s| s.to_db_string());
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM emails WHERE ?1 IS NULL OR status = ?1
             ORDER BY created_at DESC, id DESC",
            EMAIL_COLUMNS
        ))?;

        let emails = stmt
            .query_map(params![status_filter], email_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(emails)
    }

    fn update_email_status(&mut self, email_id: i64, status: EmailStatus) -> StorageResult<()> {
        let updated = match status {
            EmailStatus::Sent => self.conn.execute(
                "UPDATE emails SET status = ?1, sent_at = ?2 WHERE id = ?3",
                params![status.to_db_string(), now(), email_id],
            )?,
            EmailStatus::Replied => self.conn.execute(
                "UPDATE emails SET status = ?1, replied_at = ?2 WHERE id = ?3",
                params![status.to_db_string(), now(), email_id],
            )?,
            EmailStatus::Drafted | EmailStatus::Bounced => self.conn.execute(
                "UPDATE emails SET status = ?1 WHERE id = ?2",
                params![status.to_db_string(), email_id],
            )?,
        };

        if updated == 0 {
            return Err(StorageError::EmailNotFound(email_id));
        }
        Ok(())
    }

    // ===== Search History =====

    fn record_search(
        &mut self,
        search_type: &str,
        query: &str,
        results_count: usize,
        config_hash: Option<&str>,
    ) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO search_history (search_type, query, results_count, config_hash, search_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![search_type, query, results_count as i64, config_hash, now()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn recent_searches(&self, limit: usize) -> StorageResult<Vec<SearchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, search_type, query, results_count, config_hash, search_date
             FROM search_history ORDER BY search_date DESC, id DESC LIMIT ?1",
        )?;

        let searches = stmt
            .query_map(params![limit as i64], |row| {
                Ok(SearchRecord {
                    id: row.get(0)?,
                    search_type: row.get(1)?,
                    query: row.get(2)?,
                    results_count: row.get(3)?,
                    config_hash: row.get(4)?,
                    search_date: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(searches)
    }

    // ===== Statistics =====

    fn statistics(&self) -> StorageResult<DatabaseStats> {
        Ok(DatabaseStats {
            total_companies: self.count("SELECT COUNT(*) FROM companies")?,
            total_sponsors: self.count("SELECT COUNT(*) FROM companies WHERE type = 'sponsor'")?,
            total_vendors: self.count("SELECT COUNT(*) FROM companies WHERE type = 'vendor'")?,
            total_contacts: self.count("SELECT COUNT(*) FROM contacts")?,
            verified_contacts: self.count("SELECT COUNT(*) FROM contacts WHERE is_verified = 1")?,
            total_emails: self.count("SELECT COUNT(*) FROM emails")?,
            drafted_emails: self.count("SELECT COUNT(*) FROM emails WHERE status = 'drafted'")?,
            sent_emails: self.count("SELECT COUNT(*) FROM emails WHERE status = 'sent'")?,
            replied_emails: self.count("SELECT COUNT(*) FROM emails WHERE status = 'replied'")?,
            total_templates: self.count("SELECT COUNT(*) FROM templates")?,
            total_searches: self.count("SELECT COUNT(*) FROM search_history")?,
        })
    }
}
