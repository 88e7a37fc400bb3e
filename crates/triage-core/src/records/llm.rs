use serde::{Deserialize, Serialize};

/// One row of LLM analyzer output for a File<->Scan association.
///
/// Each submission endpoint appends a new row populating a single text
/// field, so an association accumulates sparse rows over time: an
/// assembly-only row, an analysis-only row, and so on. Rows are never
/// merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmRecord {
    pub id: i64,
    pub file_id: i64,
    pub scan_id: i64,
    /// Raw file/assembly text handed to the LLM.
    pub file_text: Option<String>,
    /// The LLM's analysis verdict text.
    pub analysis: Option<String>,
    /// Code the LLM generated while analyzing.
    pub generated_code: Option<String>,
    /// Execution log captured from running generated code.
    pub execution_log: Option<String>,
}
