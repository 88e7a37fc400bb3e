use serde::{Deserialize, Serialize};

/// Occurrence count for one detected algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlgorithmCount {
    pub algorithm: String,
    pub count: i64,
}

/// Aggregate counts, either corpus-wide or scoped to a single scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanStats {
    pub total_files: i64,
    pub files_with_findings: i64,
    /// Up to 10 algorithms ranked by static-detection count, descending.
    /// Ties surface in whatever order the store yields them.
    pub top_algorithms: Vec<AlgorithmCount>,
}
