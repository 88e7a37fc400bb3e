//! VACUUM, checkpoint, integrity check.

use rusqlite::Connection;

use triage_core::errors::StoreResult;

use crate::to_store_err;

/// Run incremental vacuum.
pub fn incremental_vacuum(conn: &Connection, pages: u32) -> StoreResult<()> {
    conn.execute_batch(&format!("PRAGMA incremental_vacuum({pages})"))
        .map_err(to_store_err)?;
    Ok(())
}

/// Run full vacuum.
pub fn full_vacuum(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("VACUUM").map_err(to_store_err)?;
    Ok(())
}

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(to_store_err)?;
    Ok(())
}

/// Run integrity check. Returns true if the database is OK.
pub fn integrity_check(conn: &Connection) -> StoreResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(to_store_err)?;
    Ok(result == "ok")
}
