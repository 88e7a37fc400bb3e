//! Storage errors and their three-way classification.

/// How a storage failure should be surfaced by a transport adapter:
/// client error for missing references, client error for integrity
/// violations, server error for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Constraint,
    Unavailable,
}

/// Errors from the analysis store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scan {id} not found")]
    ScanNotFound { id: i64 },

    #[error("file {id} not found")]
    FileNotFound { id: i64 },

    #[error("file {file_id} is not registered in scan {scan_id}")]
    LinkNotFound { file_id: i64, scan_id: i64 },

    #[error("no LLM records for file {file_id} in scan {scan_id}")]
    LlmNotFound { file_id: i64, scan_id: i64 },

    #[error("constraint violation: {message}")]
    Constraint { message: String },

    #[error("invalid value in {column}: {value}")]
    InvalidValue { column: String, value: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },
}

impl StoreError {
    /// Classify this error for the transport boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ScanNotFound { .. }
            | Self::FileNotFound { .. }
            | Self::LinkNotFound { .. }
            | Self::LlmNotFound { .. } => ErrorKind::NotFound,
            Self::Constraint { .. } | Self::InvalidValue { .. } => ErrorKind::Constraint,
            Self::Sqlite { .. } | Self::MigrationFailed { .. } => ErrorKind::Unavailable,
        }
    }
}

/// Crate-wide result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
