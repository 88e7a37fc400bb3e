//! Table-level query functions. Each module owns one table's SQL.

pub mod detail;
pub mod dynamic_detections;
pub mod files;
pub mod links;
pub mod llm_records;
pub mod maintenance;
pub mod scans;
pub mod static_detections;
pub mod stats;
