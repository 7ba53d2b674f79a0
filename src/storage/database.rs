//! SQLite history of analysed calls

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::storage::models::AnalysisRecord;

/// Database wrapper for callbrief
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

const ANALYSIS_COLUMNS: &str =
    "id, phone_number, call_text, status, summary, error, created_at";

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                phone_number TEXT NOT NULL,
                call_text TEXT NOT NULL,
                status TEXT NOT NULL,
                summary TEXT,
                error TEXT,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_analyses_created_at
                ON analyses(created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_analyses_phone_number
                ON analyses(phone_number);
            "#,
        )?;

        Ok(())
    }

    /// Append an analysis to the history
    pub fn insert_analysis(&self, record: &AnalysisRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO analyses (id, phone_number, call_text, status, summary, error, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id,
                record.phone_number,
                record.call_text,
                record.status,
                record.summary,
                record.error,
                record.created_at.timestamp_millis(),
            ],
        )?;

        Ok(())
    }

    /// Get an analysis by ID
    pub fn get_analysis(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {ANALYSIS_COLUMNS} FROM analyses WHERE id = ?1"),
                params![id],
                Self::row_to_analysis,
            )
            .optional()?;

        Ok(record)
    }

    /// List analyses, newest first
    pub fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANALYSIS_COLUMNS}
             FROM analyses
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1"
        ))?;

        let records = stmt
            .query_map(params![limit as i64], Self::row_to_analysis)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Total number of stored analyses
    pub fn count_analyses(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_analysis(row: &rusqlite::Row) -> rusqlite::Result<AnalysisRecord> {
        let created_millis: i64 = row.get(6)?;

        Ok(AnalysisRecord {
            id: row.get(0)?,
            phone_number: row.get(1)?,
            call_text: row.get(2)?,
            status: row.get(3)?,
            summary: row.get(4)?,
            error: row.get(5)?,
            created_at: DateTime::<Utc>::from_timestamp_millis(created_millis).unwrap_or_default(),
        })
    }
}
