//! Queries for the llm_records table: sparse append-only analyzer artifacts.
//!
//! Each submission inserts a fresh row with exactly one text column
//! populated. Rows are never updated in place, so the column getters
//! return one entry per row with None for the unpopulated ones.

use rusqlite::{params, Connection};

use triage_core::errors::StoreResult;
use triage_core::records::LlmRecord;

use crate::to_store_err;

/// Insert a row carrying only the disassembly text. Returns the row id.
pub fn insert_file_text(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
    text: &str,
) -> StoreResult<i64> {
    insert_text(
        conn,
        "INSERT INTO llm_records (file_id, scan_id, file_text) VALUES (?1, ?2, ?3)",
        file_id,
        scan_id,
        text,
    )
}

/// Insert a row carrying only the analysis verdict. Returns the row id.
pub fn insert_analysis(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
    text: &str,
) -> StoreResult<i64> {
    insert_text(
        conn,
        "INSERT INTO llm_records (file_id, scan_id, analysis) VALUES (?1, ?2, ?3)",
        file_id,
        scan_id,
        text,
    )
}

/// Insert a row carrying only the generated decryptor code. Returns the row id.
pub fn insert_generated_code(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
    text: &str,
) -> StoreResult<i64> {
    insert_text(
        conn,
        "INSERT INTO llm_records (file_id, scan_id, generated_code) VALUES (?1, ?2, ?3)",
        file_id,
        scan_id,
        text,
    )
}

/// Insert a row carrying only the execution log. Returns the row id.
pub fn insert_execution_log(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
    text: &str,
) -> StoreResult<i64> {
    insert_text(
        conn,
        "INSERT INTO llm_records (file_id, scan_id, execution_log) VALUES (?1, ?2, ?3)",
        file_id,
        scan_id,
        text,
    )
}

/// Rows for a link that carry an analysis verdict, ordered by insertion.
/// Rows holding only disassembly, code, or logs are excluded.
pub fn list_with_analysis(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<LlmRecord>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, file_id, scan_id, file_text, analysis, generated_code, execution_log
             FROM llm_records
             WHERE file_id = ?1 AND scan_id = ?2 AND analysis IS NOT NULL
             ORDER BY id",
        )
        .map_err(to_store_err)?;

    let rows = stmt
        .query_map(params![file_id, scan_id], |row| {
            Ok(LlmRecord {
                id: row.get(0)?,
                file_id: row.get(1)?,
                scan_id: row.get(2)?,
                file_text: row.get(3)?,
                analysis: row.get(4)?,
                generated_code: row.get(5)?,
                execution_log: row.get(6)?,
            })
        })
        .map_err(to_store_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(to_store_err)
}

/// file_text column across all rows of a link, ordered by insertion.
pub fn file_texts(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<Option<String>>> {
    column_values(
        conn,
        "SELECT file_text FROM llm_records
         WHERE file_id = ?1 AND scan_id = ?2 ORDER BY id",
        file_id,
        scan_id,
    )
}

/// generated_code column across all rows of a link, ordered by insertion.
pub fn generated_codes(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<Option<String>>> {
    column_values(
        conn,
        "SELECT generated_code FROM llm_records
         WHERE file_id = ?1 AND scan_id = ?2 ORDER BY id",
        file_id,
        scan_id,
    )
}

/// execution_log column across all rows of a link, ordered by insertion.
pub fn execution_logs(
    conn: &Connection,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<Option<String>>> {
    column_values(
        conn,
        "SELECT execution_log FROM llm_records
         WHERE file_id = ?1 AND scan_id = ?2 ORDER BY id",
        file_id,
        scan_id,
    )
}

fn insert_text(
    conn: &Connection,
    sql: &str,
    file_id: i64,
    scan_id: i64,
    text: &str,
) -> StoreResult<i64> {
    conn.execute(sql, params![file_id, scan_id, text])
        .map_err(to_store_err)?;
    Ok(conn.last_insert_rowid())
}

fn column_values(
    conn: &Connection,
    sql: &str,
    file_id: i64,
    scan_id: i64,
) -> StoreResult<Vec<Option<String>>> {
    let mut stmt = conn.prepare_cached(sql).map_err(to_store_err)?;
    let rows = stmt
        .query_map(params![file_id, scan_id], |row| row.get(0))
        .map_err(to_store_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_store_err)
}
