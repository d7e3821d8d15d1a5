//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod detection;
mod synthesis;

pub use detection::{FileDetectionConfig, check_sensitivity};
pub use synthesis::FileSynthesisConfig;

use council_application::DeliberationParams;
use council_domain::{ConfigIssue, HeuristicPolicy};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Conflict detection settings
    pub detection: FileDetectionConfig,
    /// Synthesis strategy settings
    pub synthesis: FileSynthesisConfig,
    /// Keyword table overrides; omitted tables keep their built-in values
    pub heuristics: HeuristicPolicy,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Sensitivity range
    /// 2. Strategy name and weights
    /// 3. Empty heuristic tables
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.detection.parse_sensitivity().1);

        issues.extend(self.synthesis.parse_strategy().1);
        issues.extend(self.synthesis.parse_weights().1);

        issues.extend(self.heuristics.validate());

        issues
    }

    /// Use case parameters with invalid values replaced by defaults
    pub fn to_params(&self) -> DeliberationParams {
        let mut params = DeliberationParams::default()
            .with_sensitivity(self.detection.parse_sensitivity().0)
            .with_synthesis(self.synthesis.to_options());
        params.domain = self.synthesis.domain.clone();
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ConfigIssueCode, StrategyKind};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[detection]
sensitivity = 0.6

[synthesis]
strategy = "facilitator"
facilitator = "Dana"
domain = "security"

[heuristics]
analytical_traits = ["analytical", "methodical"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.to_params();
        assert_eq!(params.sensitivity, 0.6);
        assert_eq!(params.synthesis.strategy, StrategyKind::Facilitator);
        assert_eq!(params.synthesis.facilitator.as_deref(), Some("Dana"));
        assert_eq!(params.domain.as_deref(), Some("security"));
        assert_eq!(config.heuristics.analytical_traits.len(), 2);
        assert!(!config.heuristics.collaborative_traits.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.to_params(), DeliberationParams::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[detection]
sensitivity = -1.0

[synthesis]
strategy = "vote"

[heuristics]
assertive_markers = []
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::EmptyTable { table } if table == "assertive_markers"
        )));
        assert_eq!(config.to_params().synthesis.strategy, StrategyKind::Consensus);
    }
}
