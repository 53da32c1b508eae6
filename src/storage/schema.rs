//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Sponsor-Finder database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Companies found by searches (sponsors and vendors)
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    type TEXT NOT NULL,
    industry TEXT,
    project_part TEXT,
    relevance_score INTEGER NOT NULL DEFAULT 0,
    date_added TEXT NOT NULL,
    last_updated TEXT NOT NULL,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_companies_type ON companies(type);

-- Email addresses harvested for a company
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    email TEXT NOT NULL,
    contact_type TEXT NOT NULL DEFAULT 'general',
    is_verified INTEGER NOT NULL DEFAULT 0,
    is_primary INTEGER NOT NULL DEFAULT 0,
    date_added TEXT NOT NULL,
    UNIQUE(company_id, email)
);

CREATE INDEX IF NOT EXISTS idx_contacts_company ON contacts(company_id);

-- Drafted and sent outreach emails
CREATE TABLE IF NOT EXISTS emails (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    contact_id INTEGER REFERENCES contacts(id) ON DELETE SET NULL,
    subject TEXT NOT NULL,
    body TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'drafted',
    created_at TEXT NOT NULL,
    sent_at TEXT,
    replied_at TEXT,
    template_used TEXT
);

CREATE INDEX IF NOT EXISTS idx_emails_status ON emails(status);

-- Reusable outreach templates
CREATE TABLE IF NOT EXISTS templates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    subject TEXT NOT NULL,
    body TEXT NOT NULL,
    category TEXT,
    times_used INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    last_used TEXT
);

-- Searches performed
CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    search_type TEXT NOT NULL,
    query TEXT NOT NULL,
    results_count INTEGER NOT NULL DEFAULT 0,
    config_hash TEXT,
    search_date TEXT NOT NULL
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
