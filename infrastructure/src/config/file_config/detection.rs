//! Conflict detection configuration from TOML (`[detection]` section)
//!
//! ```toml
//! [detection]
//! sensitivity = 0.3   # < 0.5 keeps every conflict, >= 0.5 only critical/major
//! ```

use council_application::config::deliberation_params::DEFAULT_SENSITIVITY;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDetectionConfig {
    pub sensitivity: f64,
}

impl Default for FileDetectionConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl FileDetectionConfig {
    /// Sensitivity in `[0, 1]`, falling back to the default otherwise
    pub fn parse_sensitivity(&self) -> (f64, Vec<ConfigIssue>) {
        match check_sensitivity("detection.sensitivity", self.sensitivity) {
            None => (self.sensitivity, Vec::new()),
            Some(issue) => (DEFAULT_SENSITIVITY, vec![issue]),
        }
    }
}

/// Range check shared by the config file and command-line overrides
pub fn check_sensitivity(field: &str, value: f64) -> Option<ConfigIssue> {
    if (0.0..=1.0).contains(&value) {
        return None;
    }
    Some(ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value,
        },
        format!("{}: {} is outside 0.0..=1.0, ignoring it", field, value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_config_deserialize() {
        let toml_str = r#"
[detection]
sensitivity = 0.7
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (sensitivity, issues) = config.detection.parse_sensitivity();
        assert_eq!(sensitivity, 0.7);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let config = FileDetectionConfig { sensitivity: 1.5 };
        let (sensitivity, issues) = config.parse_sensitivity();
        assert_eq!(sensitivity, DEFAULT_SENSITIVITY);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "detection.sensitivity"
        ));
    }

    #[test]
    fn test_check_sensitivity_bounds() {
        assert!(check_sensitivity("x", 0.0).is_none());
        assert!(check_sensitivity("x", 1.0).is_none());
        assert!(check_sensitivity("x", -0.1).is_some());
        assert!(check_sensitivity("x", f64::NAN).is_some());
    }
}
