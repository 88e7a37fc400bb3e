//! Configuration system for Triage.
//! TOML-based, layered resolution: env > project > defaults.

pub mod storage_config;
pub mod triage_config;

pub use storage_config::StorageConfig;
pub use triage_config::TriageConfig;
