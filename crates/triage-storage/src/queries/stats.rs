//! Aggregate counts: corpus-wide and scan-scoped statistics.

use rusqlite::{params, Connection};

use triage_core::errors::StoreResult;
use triage_core::records::{AlgorithmCount, ScanStats};

use crate::to_store_err;

/// Ranking depth of the algorithm aggregation.
const TOP_ALGORITHMS_LIMIT: i64 = 10;

/// Corpus-wide statistics across every file and static detection.
pub fn corpus_stats(conn: &Connection) -> StoreResult<ScanStats> {
    let total_files: i64 = conn
        .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))
        .map_err(to_store_err)?;

    let files_with_findings: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM files WHERE is_detected = 1",
            [],
            |row| row.get(0),
        )
        .map_err(to_store_err)?;

    // Ties within a count share an arbitrary relative order; there is
    // no secondary sort key.
    let mut stmt = conn
        .prepare_cached(
            "SELECT algorithm, COUNT(*) AS n
             FROM static_detections
             GROUP BY algorithm
             ORDER BY n DESC
             LIMIT ?1",
        )
        .map_err(to_store_err)?;
    let rows = stmt
        .query_map(params![TOP_ALGORITHMS_LIMIT], |row| {
            Ok(AlgorithmCount {
                algorithm: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(to_store_err)?;
    let top_algorithms = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_store_err)?;

    Ok(ScanStats {
        total_files,
        files_with_findings,
        top_algorithms,
    })
}

/// Statistics restricted to one scan's memberships and detections.
/// A file in several scans counts once per scan it appears in.
pub fn scan_stats(conn: &Connection, scan_id: i64) -> StoreResult<ScanStats> {
    let total_files: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM file_scans WHERE scan_id = ?1",
            params![scan_id],
            |row| row.get(0),
        )
        .map_err(to_store_err)?;

    let files_with_findings: i64 = conn
        .query_row(
            "SELECT COUNT(*)
             FROM files f
             JOIN file_scans fs ON fs.file_id = f.id
             WHERE fs.scan_id = ?1 AND f.is_detected = 1",
            params![scan_id],
            |row| row.get(0),
        )
        .map_err(to_store_err)?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT algorithm, COUNT(*) AS n
             FROM static_detections
             WHERE scan_id = ?1
             GROUP BY algorithm
             ORDER BY n DESC
             LIMIT ?2",
        )
        .map_err(to_store_err)?;
    let rows = stmt
        .query_map(params![scan_id, TOP_ALGORITHMS_LIMIT], |row| {
            Ok(AlgorithmCount {
                algorithm: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(to_store_err)?;
    let top_algorithms = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_store_err)?;

    Ok(ScanStats {
        total_files,
        files_with_findings,
        top_algorithms,
    })
}
