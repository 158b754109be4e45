//! Rate Store Module
//!
//! SQLite-backed table of cached rates with upsert-by-pair and age-based pruning.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{RateRecord, MAX_CODE_LENGTH};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS conversions (
        id INTEGER PRIMARY KEY,
        base TEXT NOT NULL,
        target TEXT NOT NULL,
        rate REAL NOT NULL,
        created_at INTEGER NOT NULL
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_conversions_pair
        ON conversions (base, target);
";

// == Rate Store ==
/// Persistent rate table over a single SQLite connection.
///
/// The schema is created lazily before the first operation and the
/// `CREATE ... IF NOT EXISTS` statements make that step idempotent.
#[derive(Debug)]
pub struct RateStore {
    conn: Connection,
    schema_ready: bool,
}

impl RateStore {
    // == Constructors ==
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            schema_ready: false,
        }
    }

    fn ensure_schema(&mut self) -> Result<()> {
        if !self.schema_ready {
            self.conn.execute_batch(SCHEMA)?;
            self.schema_ready = true;
            debug!("conversions table ready");
        }
        Ok(())
    }

    // == Get ==
    /// Looks up the record for the exact ordered pair.
    ///
    /// Codes are compared as supplied; no case folding happens here.
    pub fn get(&mut self, base: &str, target: &str) -> Result<Option<RateRecord>> {
        self.ensure_schema()?;
        let record = self
            .conn
            .query_row(
                "SELECT id, base, target, rate, created_at FROM conversions
                 WHERE base = ?1 AND target = ?2",
                params![base, target],
                map_record,
            )
            .optional()?;
        Ok(record)
    }

    // == Upsert ==
    /// Creates or replaces the single record for `(base, target)`.
    ///
    /// On replace the id is kept and both `rate` and `created_at` are overwritten.
    pub fn upsert(&mut self, base: &str, target: &str, rate: f64, now: i64) -> Result<()> {
        validate_code(base)?;
        validate_code(target)?;
        validate_rate(rate)?;
        self.ensure_schema()?;

        self.conn.execute(
            "INSERT INTO conversions (base, target, rate, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (base, target)
             DO UPDATE SET rate = excluded.rate, created_at = excluded.created_at",
            params![base, target, rate, now],
        )?;
        Ok(())
    }

    // == Delete Older Than ==
    /// Removes every record with `created_at < cutoff`.
    ///
    /// Returns the number of records removed.
    pub fn delete_older_than(&mut self, cutoff: i64) -> Result<usize> {
        self.ensure_schema()?;
        let removed = self
            .conn
            .execute("DELETE FROM conversions WHERE created_at < ?1", params![cutoff])?;
        Ok(removed)
    }

    // == Delete All ==
    /// Removes every record, returning how many were removed.
    pub fn delete_all(&mut self) -> Result<usize> {
        self.ensure_schema()?;
        let removed = self.conn.execute("DELETE FROM conversions", [])?;
        Ok(removed)
    }

    // == List All ==
    /// Returns every record ordered by id.
    pub fn list_all(&mut self) -> Result<Vec<RateRecord>> {
        self.ensure_schema()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, base, target, rate, created_at FROM conversions ORDER BY id",
        )?;
        let records = stmt
            .query_map([], map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    // == Length ==
    /// Returns the current number of records.
    pub fn len(&mut self) -> Result<usize> {
        self.ensure_schema()?;
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM conversions", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // == Is Empty ==
    /// Returns true when the table holds no records.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<RateRecord> {
    Ok(RateRecord {
        id: row.get(0)?,
        base: row.get(1)?,
        target: row.get(2)?,
        rate: row.get(3)?,
        created_at: row.get(4)?,
    })
}

// == Validation ==
/// Accepts only positive finite rates.
pub fn validate_rate(rate: f64) -> Result<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(StoreError::Validation(format!(
            "rate must be a positive finite number, got {}",
            rate
        )))
    }
}

/// Accepts non-blank codes up to `MAX_CODE_LENGTH` bytes.
pub fn validate_code(code: &str) -> Result<&str> {
    if code.trim().is_empty() {
        return Err(StoreError::Validation(
            "currency code cannot be empty".to_string(),
        ));
    }
    if code.len() > MAX_CODE_LENGTH {
        return Err(StoreError::Validation(format!(
            "currency code exceeds maximum length of {} bytes",
            MAX_CODE_LENGTH
        )));
    }
    Ok(code)
}
