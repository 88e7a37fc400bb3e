//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Default: `triage.db` under the project root.
    pub db_path: Option<PathBuf>,
    /// Read connection pool size. Default: 4, clamped to 1..=8.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    /// Returns the effective read pool size, defaulting to 4.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }
}
