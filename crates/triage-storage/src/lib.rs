//! # triage-storage
//!
//! SQLite persistence for the Triage analysis store: connection management,
//! schema migrations, query modules, and the [`StorageEngine`] implementing
//! the core storage traits.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;

use triage_core::errors::StoreError;

/// Map a rusqlite error onto the store taxonomy. Constraint failures
/// (duplicate association, CHECK violation, foreign key breakage) stay
/// distinguishable from infrastructure failures.
pub(crate) fn to_store_err(e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(err, message)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Constraint {
                message: message.unwrap_or_else(|| err.to_string()),
            }
        }
        other => StoreError::Sqlite {
            message: other.to_string(),
        },
    }
}
