use serde::{Deserialize, Serialize};

use super::detections::{DynamicDetection, StaticDetection};
use super::file::FileRecord;
use super::llm::LlmRecord;

/// Composed view of a file: the file itself plus every scan it is
/// associated with and the results recorded under each association.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDetail {
    pub file: FileRecord,
    pub links: Vec<LinkDetail>,
}

/// Results recorded under one File<->Scan association.
///
/// `llm_records` is filtered to rows whose analysis text is non-null;
/// assembly-only and code/log-only rows are suppressed in this view even
/// though they remain retrievable through the direct getters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkDetail {
    pub scan_id: i64,
    pub static_detections: Vec<StaticDetection>,
    pub dynamic_detections: Vec<DynamicDetection>,
    pub llm_records: Vec<LlmRecord>,
}
