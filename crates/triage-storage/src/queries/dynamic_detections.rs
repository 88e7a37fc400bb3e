//! Queries for the dynamic_detections table: sandbox tracer output.

use rusqlite::{params, Connection};

use triage_core::errors::StoreResult;
use triage_core::records::{DynamicDetection, NewDynamicDetection};

use crate::to_store_err;

/// Insert a dynamic detection. Returns the row id.
pub fn insert_detection(conn: &Connection, new: &NewDynamicDetection) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO dynamic_detections
            (file_id, scan_id, parameter, algorithm, api, key_length)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.file_id,
            new.scan_id,
            new.parameter,
            new.algorithm,
            new.api,
            new.key_length,
        ],
    )
    .map_err(to_store_err)?;
    Ok(conn.last_insert_rowid())
}

/// All dynamic detections for a file/scan link, ordered by insertion.
pub fn list_for_link(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<DynamicDetection>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, file_id, scan_id, parameter, algorithm, api, key_length
             FROM dynamic_detections
             WHERE file_id = ?1 AND scan_id = ?2
             ORDER BY id",
        )
        .map_err(to_store_err)?;

    let rows = stmt
        .query_map(params![file_id, scan_id], |row| {
            Ok(DynamicDetection {
                id: row.get(0)?,
                file_id: row.get(1)?,
                scan_id: row.get(2)?,
                parameter: row.get(3)?,
                algorithm: row.get(4)?,
                api: row.get(5)?,
                key_length: row.get(6)?,
            })
        })
        .map_err(to_store_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(to_store_err)
}
