//! Structured configuration issues.
//!
//! Configuration problems never abort a run: each detected problem becomes a
//! [`ConfigIssue`] and the offending value falls back to its default.
//!
//! # Examples
//!
//! ```
//! use council_domain::HeuristicPolicy;
//!
//! let issues = HeuristicPolicy::default().validate();
//! assert!(issues.is_empty());
//! ```

/// Severity level of a configuration issue.
///
/// Every issue is recoverable today, so the only level is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A keyword table is empty, so the heuristic it drives never fires.
    EmptyTable { table: String },
    /// A string field did not parse into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field lies outside its accepted range.
    OutOfRange { field: String, value: f64 },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: IssueSeverity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            message: message.into(),
        }
    }
}
