//! Application layer for perspective-council
//!
//! This crate contains the deliberation use case, its progress port, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeliberationParams;
pub use ports::progress::{DeliberationProgress, DeliberationStage, NoProgress};
pub use use_cases::deliberate::{
    DeliberateError, DeliberateUseCase, DeliberationInput, DeliberationOutcome,
};
