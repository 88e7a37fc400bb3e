//! Queries for the static_detections table: signature scanner output.

use rusqlite::{params, Connection};

use triage_core::errors::{StoreError, StoreResult};
use triage_core::records::{DetectionMethod, NewStaticDetection, Severity, StaticDetection};

use crate::to_store_err;

/// Insert a static detection. Returns the row id.
pub fn insert_detection(conn: &Connection, new: &NewStaticDetection) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO static_detections
            (file_id, scan_id, byte_offset, algorithm, matched_pattern, method, severity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.file_id,
            new.scan_id,
            new.byte_offset,
            new.algorithm,
            new.matched_pattern,
            new.method.as_str(),
            new.severity.as_str(),
        ],
    )
    .map_err(to_store_err)?;
    Ok(conn.last_insert_rowid())
}

/// All static detections for a file/scan link, ordered by insertion.
pub fn list_for_link(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<StaticDetection>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, file_id, scan_id, byte_offset, algorithm,
                    matched_pattern, method, severity
             FROM static_detections
             WHERE file_id = ?1 AND scan_id = ?2
             ORDER BY id",
        )
        .map_err(to_store_err)?;

    type RawRow = (i64, i64, i64, Option<i64>, String, String, String, String);
    let rows = stmt
        .query_map(params![file_id, scan_id], |row| {
            Ok::<RawRow, rusqlite::Error>((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })
        .map_err(to_store_err)?;

    let raw = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_store_err)?;

    let mut detections = Vec::with_capacity(raw.len());
    for (id, file_id, scan_id, byte_offset, algorithm, matched_pattern, method, severity) in raw {
        detections.push(StaticDetection {
            id,
            file_id,
            scan_id,
            byte_offset,
            algorithm,
            matched_pattern,
            method: decode_method(&method)?,
            severity: decode_severity(&severity)?,
        });
    }
    Ok(detections)
}

fn decode_method(raw: &str) -> StoreResult<DetectionMethod> {
    DetectionMethod::from_str_name(raw).ok_or_else(|| StoreError::InvalidValue {
        column: "static_detections.method".to_string(),
        value: raw.to_string(),
    })
}

fn decode_severity(raw: &str) -> StoreResult<Severity> {
    Severity::from_str_name(raw).ok_or_else(|| StoreError::InvalidValue {
        column: "static_detections.severity".to_string(),
        value: raw.to_string(),
    })
}
