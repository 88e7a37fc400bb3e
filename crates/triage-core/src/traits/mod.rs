//! Trait seams implemented by the storage crate.

pub mod storage;

pub use storage::{IScanStats, IScanStorage};
