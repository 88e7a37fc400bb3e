use crate::errors::StoreResult;
use crate::records::{
    DynamicDetection, FileDetail, FileRecord, LlmRecord, NewDynamicDetection, NewFile,
    NewStaticDetection, Scan, ScanStats, StaticDetection,
};

/// Scan/file lifecycle, result submission, LLM retrieval, and detail views.
///
/// Every mutating operation executes as one atomic unit against the store:
/// the association existence check and the dependent insert either both
/// happen or neither does.
pub trait IScanStorage: Send + Sync {
    // --- Scans ---
    fn open_scan(&self) -> StoreResult<Scan>;
    fn get_scan(&self, scan_id: i64) -> StoreResult<Option<Scan>>;
    /// Deletes the scan, its associations, and transitively every result
    /// row recorded under them.
    fn delete_scan(&self, scan_id: i64) -> StoreResult<()>;

    // --- Files ---
    /// Creates the file and its association to `scan_id` atomically.
    /// Fails with `ScanNotFound` and persists nothing if the scan is absent.
    fn register_file(&self, scan_id: i64, file: &NewFile) -> StoreResult<FileRecord>;
    fn get_file(&self, file_id: i64) -> StoreResult<Option<FileRecord>>;
    /// Deletes the file, its associations, and transitively every result
    /// row recorded under them.
    fn delete_file(&self, file_id: i64) -> StoreResult<()>;

    // --- Result submission ---
    /// Appends a static finding and marks the file detected.
    /// Fails with `LinkNotFound` if the pair was never registered.
    fn submit_static(&self, detection: &NewStaticDetection) -> StoreResult<StaticDetection>;
    /// Appends a dynamic finding and marks the file detected.
    fn submit_dynamic(&self, detection: &NewDynamicDetection) -> StoreResult<DynamicDetection>;
    /// Appends an LLM record holding only the raw text. Raw text is not a
    /// finding, so the file's detected flag is left untouched.
    fn submit_assembly(&self, file_id: i64, scan_id: i64, raw_text: &str) -> StoreResult<i64>;
    /// Appends an LLM record holding the analysis text and marks the file
    /// detected.
    fn submit_analysis(&self, file_id: i64, scan_id: i64, analysis: &str)
        -> StoreResult<LlmRecord>;
    /// Appends an LLM record holding generated code and marks the file
    /// detected.
    fn submit_generated_code(
        &self,
        file_id: i64,
        scan_id: i64,
        code: &str,
    ) -> StoreResult<LlmRecord>;
    /// Appends an LLM record holding an execution log and marks the file
    /// detected.
    fn submit_execution_log(
        &self,
        file_id: i64,
        scan_id: i64,
        log: &str,
    ) -> StoreResult<LlmRecord>;

    // --- LLM retrieval ---
    /// Raw-text field of every LLM record for the pair, in insertion order,
    /// nulls included. Fails with `LlmNotFound` if the pair has no records.
    fn assembly_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>>;
    /// Generated-code field of every LLM record for the pair. Same contract.
    fn code_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>>;
    /// Execution-log field of every LLM record for the pair. Same contract.
    fn log_texts(&self, file_id: i64, scan_id: i64) -> StoreResult<Vec<Option<String>>>;

    // --- Detail views ---
    /// The file plus all of its associations and their results. LLM rows
    /// without analysis text are filtered out of this view.
    fn file_detail(&self, file_id: i64) -> StoreResult<FileDetail>;
    /// Detail views for every file associated with the scan. An empty scan
    /// yields an empty vec; a missing scan fails with `ScanNotFound`.
    fn scan_files(&self, scan_id: i64) -> StoreResult<Vec<FileDetail>>;
}

/// Aggregate statistics over the stored corpus.
pub trait IScanStats: Send + Sync {
    /// Counts across every file and static detection in the store.
    fn corpus_stats(&self) -> StoreResult<ScanStats>;
    /// Counts restricted to files and detections associated with one scan.
    /// Fails with `ScanNotFound` if the scan is absent.
    fn scan_stats(&self, scan_id: i64) -> StoreResult<ScanStats>;
}
