//! Infrastructure layer for perspective-council
//!
//! This crate contains the adapters around the deliberation core:
//! configuration file loading and JSON snapshot loading.

pub mod config;
pub mod snapshot;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDetectionConfig, FileSynthesisConfig, check_sensitivity,
};
pub use snapshot::{DeliberationSnapshot, JsonSnapshotLoader, SnapshotError};
