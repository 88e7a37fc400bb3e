use serde::{Deserialize, Serialize};

/// The File<->Scan association. At most one per pair; every analysis result
/// row must reference an existing association, and deleting either side
/// cascades through it to all dependent results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FileScanLink {
    pub file_id: i64,
    pub scan_id: i64,
}
