//! Queries for the scans table: append-only log of analysis runs.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use triage_core::errors::{StoreError, StoreResult};
use triage_core::records::Scan;

use crate::to_store_err;

/// Insert a new scan session. Returns the row id.
pub fn insert_scan(conn: &Connection, started_at: DateTime<Utc>) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO scans (started_at) VALUES (?1)",
        params![started_at.to_rfc3339()],
    )
    .map_err(to_store_err)?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a scan by id.
pub fn get_scan(conn: &Connection, id: i64) -> StoreResult<Option<Scan>> {
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, started_at FROM scans WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(to_store_err)?;

    match row {
        Some((id, raw)) => Ok(Some(Scan {
            id,
            started_at: decode_timestamp(&raw)?,
        })),
        None => Ok(None),
    }
}

/// Check whether a scan exists.
pub fn scan_exists(conn: &Connection, id: i64) -> StoreResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM scans WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )
    .map_err(to_store_err)
}

/// Delete a scan. Returns false if no row matched.
/// Cascades through file_scans to every result row of the scan.
pub fn delete_scan(conn: &Connection, id: i64) -> StoreResult<bool> {
    let rows = conn
        .execute("DELETE FROM scans WHERE id = ?1", params![id])
        .map_err(to_store_err)?;
    Ok(rows > 0)
}

/// Count total scan sessions.
pub fn count_scans(conn: &Connection) -> StoreResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM scans", [], |row| row.get(0))
        .map_err(to_store_err)
}

fn decode_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidValue {
            column: "scans.started_at".to_string(),
            value: raw.to_string(),
        })
}
