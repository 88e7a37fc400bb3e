//! # triage-core
//!
//! Foundation crate for the Triage analysis store.
//! Defines all record types, traits, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod records;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TriageConfig;
pub use errors::{ConfigError, ErrorKind, StoreError, StoreResult};
pub use records::{
    AlgorithmCount, DetectionMethod, DynamicDetection, FileDetail, FileRecord, FileScanLink,
    LinkDetail, LlmRecord, NewDynamicDetection, NewFile, NewStaticDetection, Scan, ScanStats,
    Severity, StaticDetection,
};
pub use traits::{IScanStats, IScanStorage};
