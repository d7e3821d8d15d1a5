//! Domain error types
//!
//! Analysis itself never fails: degenerate inputs map to fallback values.
//! These errors only surface from strict parsing of wire/config strings.

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Unknown synthesis strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid conflict severity: {0}")]
    InvalidSeverity(String),

    #[error("Invalid conflict type: {0}")]
    InvalidConflictType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnknownStrategy("majority".to_string());
        assert_eq!(error.to_string(), "Unknown synthesis strategy: majority");
    }
}
