//! Conflict detection and resolution
//!
//! ```text
//! perspectives ──► ConflictDetector ──► Vec<Conflict> ──► ConflictResolver
//!                  (direct, priority,                     (suggestions,
//!                   scope, semantic)                       auto-resolve)
//! ```

pub mod detector;
pub mod entities;
pub mod resolver;

pub use detector::{ConflictDetector, SENSITIVITY_THRESHOLD, filter_by_sensitivity};
pub use entities::{Conflict, ConflictSeverity, ConflictType};
pub use resolver::{ConflictResolver, suggestions_for, unresolved};
