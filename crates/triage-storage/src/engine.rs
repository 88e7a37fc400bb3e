//! StorageEngine: owns the DatabaseManager, implements IScanStorage
//! and IScanStats, exposes maintenance entry points.

use std::path::Path;

use chrono::Utc;

use triage_core::config::TriageConfig;
use triage_core::errors::{StoreError, StoreResult};
use triage_core::records::{
    DynamicDetection, FileDetail, FileRecord, LlmRecord, NewDynamicDetection, NewFile,
    NewStaticDetection, Scan, ScanStats, StaticDetection,
};
use triage_core::traits::{IScanStats, IScanStorage};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries;

/// The main storage engine. Owns the database connections and provides
/// the full IScanStorage + IScanStats interface.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = DatabaseManager::open(path)?;
        tracing::info!(path = %path.display(), "storage engine opened");
        Ok(Self { db })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = DatabaseManager::open_in_memory()?;
        Ok(Self { db })
    }

    /// Open using the resolved configuration: database path and read
    /// pool size come from the config, relative to `root`.
    pub fn open_with_config(root: &Path, config: &TriageConfig) -> StoreResult<Self> {
        let path = config.database_path(root);
        let pool_size = config.storage.effective_read_pool_size();
        let db = DatabaseManager::open_with_pool(&path, pool_size)?;
        tracing::info!(path = %path.display(), pool_size, "storage engine opened");
        Ok(Self { db })
    }

    /// Access the underlying database manager (for raw queries in tests
    /// and maintenance tooling).
    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    /// Run incremental vacuum, releasing up to `pages` free pages.
    pub fn incremental_vacuum(&self, pages: u32) -> StoreResult<()> {
        self.db
            .with_writer(|conn| queries::maintenance::incremental_vacuum(conn, pages))
    }

    /// Rebuild the database file, reclaiming all free space.
    pub fn full_vacuum(&self) -> StoreResult<()> {
        self.db.with_writer(queries::maintenance::full_vacuum)
    }

    /// Flush the WAL into the main database file.
    pub fn wal_checkpoint(&self) -> StoreResult<()> {
        self.db.with_writer(queries::maintenance::wal_checkpoint)
    }

    /// Run PRAGMA integrity_check. Returns true if the database is OK.
    pub fn integrity_check(&self) -> StoreResult<bool> {
        self.db.with_writer(queries::maintenance::integrity_check)
    }
}

impl IScanStorage for StorageEngine {
    fn open_scan(&self) -> StoreResult<Scan> {
        let started_at = Utc::now();
        let id = self
            .db
            .with_writer(|conn| queries::scans::insert_scan(conn, started_at))?;
        Ok(Scan { id, started_at })
    }

    fn get_scan(&self, scan_id: i64) -> StoreResult<Option<Scan>> {
        self.db
            .with_reader(|conn| queries::scans::get_scan(conn, scan_id))
    }

    fn delete_scan(&self, scan_id: i64) -> StoreResult<()> {
        let deleted = self
            .db
            .with_writer(|conn| queries::scans::delete_scan(conn, scan_id))?;
        if !deleted {
            return Err(StoreError::ScanNotFound { id: scan_id });
        }
        tracing::debug!(scan_id, "scan deleted");
        Ok(())
    }

    fn register_file(&self, scan_id: i64, file: &NewFile) -> StoreResult<FileRecord> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                if !queries::scans::scan_exists(tx, scan_id)? {
                    return Err(StoreError::ScanNotFound { id: scan_id });
                }
                let id = queries::files::insert_file(tx, file)?;
                queries::links::insert_link(tx, id, scan_id)?;
                Ok(FileRecord {
                    id,
                    name: file.name.clone(),
                    file_type: file.file_type.clone(),
                    size_bytes: file.size_bytes,
                    is_detected: false,
                })
            })
        })
    }

    fn get_file(&self, file_id: i64) -> StoreResult<Option<FileRecord>> {
        self.db
            .with_reader(|conn| queries::files::get_file(conn, file_id))
    }

    fn delete_file(&self, file_id: i64) -> StoreResult<()> {
        let deleted = self
            .db
            .with_writer(|conn| queries::files::delete_file(conn, file_id))?;
        if !deleted {
            return Err(StoreError::FileNotFound { id: file_id });
        }
        tracing::debug!(file_id, "file deleted");
        Ok(())
    }

    fn submit_static(&self, detection: &NewStaticDetection) -> StoreResult<StaticDetection> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, detection.file_id, detection.scan_id)?;
                let id = queries::static_detections::insert_detection(tx, detection)?;
                queries::files::mark_detected(tx, detection.file_id)?;
                Ok(StaticDetection {
                    id,
                    file_id: detection.file_id,
                    scan_id: detection.scan_id,
                    byte_offset: detection.byte_offset,
                    algorithm: detection.algorithm.clone(),
                    matched_pattern: detection.matched_pattern.clone(),
                    method: detection.method,
                    severity: detection.severity,
                })
            })
        })
    }

    fn submit_dynamic(&self, detection: &NewDynamicDetection) -> StoreResult<DynamicDetection> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, detection.file_id, detection.scan_id)?;
                let id = queries::dynamic_detections::insert_detection(tx, detection)?;
                queries::files::mark_detected(tx, detection.file_id)?;
                Ok(DynamicDetection {
                    id,
                    file_id: detection.file_id,
                    scan_id: detection.scan_id,
                    parameter: detection.parameter.clone(),
                    algorithm: detection.algorithm.clone(),
                    api: detection.api.clone(),
                    key_length: detection.key_length,
                })
            })
        })
    }

    fn submit_assembly(&self, file_id: i64, scan_id: i64, raw_text: &str) -> StoreResult<i64> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, file_id, scan_id)?;
                // Raw disassembly is not a finding: is_detected stays put.
                queries::llm_records::insert_file_text(tx, file_id, scan_id, raw_text)
            })
        })
    }

    fn submit_analysis(
        &self,
        file_id: i64,
        scan_id: i64,
        analysis: &str,
    ) -> StoreResult<LlmRecord> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, file_id, scan_id)?;
                let id = queries::llm_records::insert_analysis(tx, file_id, scan_id, analysis)?;
                queries::files::mark_detected(tx, file_id)?;
                Ok(LlmRecord {
                    id,
                    file_id,
                    scan_id,
                    file_text: None,
                    analysis: Some(analysis.to_string()),
                    generated_code: None,
                    execution_log: None,
                })
            })
        })
    }

    fn submit_generated_code(
        &self,
        file_id: i64,
        scan_id: i64,
        code: &str,
    ) -> StoreResult<LlmRecord> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, file_id, scan_id)?;
                let id = queries::llm_records::insert_generated_code(tx, file_id, scan_id, code)?;
                queries::files::mark_detected(tx, file_id)?;
                Ok(LlmRecord {
                    id,
                    file_id,
                    scan_id,
                    file_text: None,
                    analysis: None,
                    generated_code: Some(code.to_string()),
                    execution_log: None,
                })
            })
        })
    }

    fn submit_execution_log(
        &self,
        file_id: i64,
        scan_id: i64,
        log: &str,
    ) -> StoreResult<LlmRecord> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                queries::links::require_link(tx, file_id, scan_id)?;
                let id = queries::llm_records::insert_execution_log(tx, file_id, scan_id, log)?;
                queries::files::mark_detected(tx, file_id)?;
                Ok(LlmRecord {
                    id,
                    file_id,
                    scan_id,
                    file_text: None,
                    analysis: None,
                    generated_code: None,
                    execution_log: Some(log.to_string()),
                })
            })
        })
    }

    fn assembly_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>> {
        self.db.with_reader(|conn| {
            let texts = queries::llm_records::file_texts(conn, file_id, scan_id)?;
            if texts.is_empty() {
                return Err(StoreError::LlmNotFound { file_id, scan_id });
            }
            Ok(texts)
        })
    }

    fn code_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>> {
        self.db.with_reader(|conn| {
            let texts = queries::llm_records::generated_codes(conn, file_id, scan_id)?;
            if texts.is_empty() {
                return Err(StoreError::LlmNotFound { file_id, scan_id });
            }
            Ok(texts)
        })
    }

    fn log_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>> {
        self.db.with_reader(|conn| {
            let texts = queries::llm_records::execution_logs(conn, file_id, scan_id)?;
            if texts.is_empty() {
                return Err(StoreError::LlmNotFound { file_id, scan_id });
            }
            Ok(texts)
        })
    }

    fn file_detail(&self, file_id: i64) -> StoreResult<FileDetail> {
        self.db.with_reader(|conn| {
            queries::detail::file_detail(conn, file_id)?
                .ok_or(StoreError::FileNotFound { id: file_id })
        })
    }

    fn scan_files(&self, scan_id: i64) -> StoreResult<Vec<FileDetail>> {
        self.db.with_reader(|conn| {
            if !queries::scans::scan_exists(conn, scan_id)? {
                return Err(StoreError::ScanNotFound { id: scan_id });
            }
            queries::detail::scan_file_details(conn, scan_id)
        })
    }
}

impl IScanStats for StorageEngine {
    fn corpus_stats(&self) -> StoreResult<ScanStats> {
        self.db.with_reader(queries::stats::corpus_stats)
    }

    fn scan_stats(&self, scan_id: i64) -> StoreResult<ScanStats> {
        self.db.with_reader(|conn| {
            if !queries::scans::scan_exists(conn, scan_id)? {
                return Err(StoreError::ScanNotFound { id: scan_id });
            }
            queries::stats::scan_stats(conn, scan_id)
        })
    }
}
