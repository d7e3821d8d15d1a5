//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, IssueSeverity};
