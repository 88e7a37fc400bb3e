use serde::{Deserialize, Serialize};

/// A file examined by the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub id: i64,
    pub name: String,
    pub file_type: String,
    pub size_bytes: i64,
    /// True once any analyzer has reported a finding for this file,
    /// in any scan. Never reset to false.
    pub is_detected: bool,
}

/// Attributes for registering a new file into a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFile {
    pub name: String,
    pub file_type: String,
    pub size_bytes: i64,
}
