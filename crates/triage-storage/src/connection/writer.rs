//! Write connection utilities: BEGIN IMMEDIATE transactions.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use triage_core::errors::StoreResult;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// This acquires the write lock at transaction start, preventing SQLITE_BUSY.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> StoreResult<T>
where
    F: FnOnce(&Transaction<'_>) -> StoreResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(crate::to_store_err)?;

    let result = f(&tx)?;

    tx.commit().map_err(crate::to_store_err)?;

    Ok(result)
}
