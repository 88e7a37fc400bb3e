//! Record types for the analysis store: entities, composed views, statistics.

pub mod detail;
pub mod detections;
pub mod file;
pub mod link;
pub mod llm;
pub mod scan;
pub mod stats;

pub use detail::{FileDetail, LinkDetail};
pub use detections::{
    DetectionMethod, DynamicDetection, NewDynamicDetection, NewStaticDetection, Severity,
    StaticDetection,
};
pub use file::{FileRecord, NewFile};
pub use link::FileScanLink;
pub use llm::LlmRecord;
pub use scan::Scan;
pub use stats::{AlgorithmCount, ScanStats};
