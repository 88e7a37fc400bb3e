//! V001: Initial schema.
//! files, scans, file_scans, static_detections, dynamic_detections, llm_records.

pub const MIGRATION_SQL: &str = r#"
-- Sample files: one row per submitted binary.
-- is_detected flips to 1 once any analyzer reports a finding; never reset.
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    file_type TEXT NOT NULL,
    size_bytes INTEGER NOT NULL,
    is_detected INTEGER NOT NULL DEFAULT 0
) STRICT;

-- Scan sessions: append-only log of analysis runs.
CREATE TABLE IF NOT EXISTS scans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL
) STRICT;

-- Membership of files in scans. Every result row below must reference
-- an existing (file_id, scan_id) pair here.
CREATE TABLE IF NOT EXISTS file_scans (
    file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
    scan_id INTEGER NOT NULL REFERENCES scans(id) ON DELETE CASCADE,
    PRIMARY KEY (file_id, scan_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_file_scans_scan ON file_scans(scan_id);

-- Signature scanner output: pattern matches against file contents.
CREATE TABLE IF NOT EXISTS static_detections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_id INTEGER NOT NULL,
    scan_id INTEGER NOT NULL,
    byte_offset INTEGER,
    algorithm TEXT NOT NULL,
    matched_pattern TEXT NOT NULL,
    method TEXT NOT NULL CHECK (method IN ('text', 'oid', 'parameter')),
    severity TEXT NOT NULL CHECK (severity IN ('high', 'medium', 'low')),
    FOREIGN KEY (file_id, scan_id)
        REFERENCES file_scans(file_id, scan_id) ON DELETE CASCADE
) STRICT;

CREATE INDEX IF NOT EXISTS idx_static_link
    ON static_detections(file_id, scan_id);
CREATE INDEX IF NOT EXISTS idx_static_scan ON static_detections(scan_id);
CREATE INDEX IF NOT EXISTS idx_static_algorithm
    ON static_detections(algorithm);

-- Sandbox tracer output: observed crypto API activity at runtime.
-- All observation columns are nullable; the tracer reports what it saw.
CREATE TABLE IF NOT EXISTS dynamic_detections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_id INTEGER NOT NULL,
    scan_id INTEGER NOT NULL,
    parameter TEXT,
    algorithm TEXT,
    api TEXT,
    key_length INTEGER,
    FOREIGN KEY (file_id, scan_id)
        REFERENCES file_scans(file_id, scan_id) ON DELETE CASCADE
) STRICT;

CREATE INDEX IF NOT EXISTS idx_dynamic_link
    ON dynamic_detections(file_id, scan_id);

-- LLM analyzer artifacts: sparse append-only rows, one populated
-- column per submission (file_text, analysis, generated_code,
-- execution_log). Existing rows are never updated.
CREATE TABLE IF NOT EXISTS llm_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_id INTEGER NOT NULL,
    scan_id INTEGER NOT NULL,
    file_text TEXT,
    analysis TEXT,
    generated_code TEXT,
    execution_log TEXT,
    FOREIGN KEY (file_id, scan_id)
        REFERENCES file_scans(file_id, scan_id) ON DELETE CASCADE
) STRICT;

CREATE INDEX IF NOT EXISTS idx_llm_link ON llm_records(file_id, scan_id);
"#;
