//! Queries for the files table: one row per submitted binary.

use rusqlite::{params, Connection, OptionalExtension};

use triage_core::errors::StoreResult;
use triage_core::records::{FileRecord, NewFile};

use crate::to_store_err;

/// Insert a new file row (is_detected starts false). Returns the row id.
pub fn insert_file(conn: &Connection, new: &NewFile) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO files (name, file_type, size_bytes) VALUES (?1, ?2, ?3)",
        params![new.name, new.file_type, new.size_bytes],
    )
    .map_err(to_store_err)?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a file by id.
pub fn get_file(conn: &Connection, id: i64) -> StoreResult<Option<FileRecord>> {
    conn.query_row(
        "SELECT id, name, file_type, size_bytes, is_detected
         FROM files WHERE id = ?1",
        params![id],
        |row| {
            Ok(FileRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                file_type: row.get(2)?,
                size_bytes: row.get(3)?,
                is_detected: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(to_store_err)
}

/// Flip the detection flag on. One-way: nothing ever resets it.
pub fn mark_detected(conn: &Connection, file_id: i64) -> StoreResult<()> {
    conn.execute(
        "UPDATE files SET is_detected = 1 WHERE id = ?1",
        params![file_id],
    )
    .map_err(to_store_err)?;
    Ok(())
}

/// Delete a file. Returns false if no row matched.
/// Cascades through file_scans to every result row of the file.
pub fn delete_file(conn: &Connection, id: i64) -> StoreResult<bool> {
    let rows = conn
        .execute("DELETE FROM files WHERE id = ?1", params![id])
        .map_err(to_store_err)?;
    Ok(rows > 0)
}

/// All files registered in a scan, ordered by file id.
pub fn files_in_scan(conn: &Connection, scan_id: i64) -> StoreResult<Vec<FileRecord>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT f.id, f.name, f.file_type, f.size_bytes, f.is_detected
             FROM files f
             JOIN file_scans fs ON fs.file_id = f.id
             WHERE fs.scan_id = ?1
             ORDER BY f.id",
        )
        .map_err(to_store_err)?;

    let rows = stmt
        .query_map(params![scan_id], |row| {
            Ok(FileRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                file_type: row.get(2)?,
                size_bytes: row.get(3)?,
                is_detected: row.get(4)?,
            })
        })
        .map_err(to_store_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(to_store_err)
}
