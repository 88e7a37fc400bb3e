//! Queries for the file_scans table: membership of files in scans.

use rusqlite::{params, Connection};

use triage_core::errors::{StoreError, StoreResult};
use triage_core::records::FileScanLink;

use crate::to_store_err;

/// Insert a file/scan membership row.
pub fn insert_link(conn: &Connection, file_id: i64, scan_id: i64) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO file_scans (file_id, scan_id) VALUES (?1, ?2)",
        params![file_id, scan_id],
    )
    .map_err(to_store_err)?;
    Ok(())
}

/// Check whether a file is registered in a scan.
pub fn link_exists(conn: &Connection, file_id: i64, scan_id: i64) -> StoreResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM file_scans WHERE file_id = ?1 AND scan_id = ?2)",
        params![file_id, scan_id],
        |row| row.get(0),
    )
    .map_err(to_store_err)
}

/// Require the membership row, erroring if the file was never
/// registered in the scan. Gates every result insert.
pub fn require_link(conn: &Connection, file_id: i64, scan_id: i64) -> StoreResult<FileScanLink> {
    if link_exists(conn, file_id, scan_id)? {
        Ok(FileScanLink { file_id, scan_id })
    } else {
        Err(StoreError::LinkNotFound { file_id, scan_id })
    }
}

/// All scans a file participates in, ordered by scan id.
pub fn scan_ids_for_file(conn: &Connection, file_id: i64) -> StoreResult<Vec<i64>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT scan_id FROM file_scans WHERE file_id = ?1 ORDER BY scan_id",
        )
        .map_err(to_store_err)?;

    let rows = stmt
        .query_map(params![file_id], |row| row.get(0))
        .map_err(to_store_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(to_store_err)
}
