//! Synthesis configuration from TOML (`[synthesis]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [synthesis]
//! strategy = "weighted"     # consensus | weighted | facilitator
//! facilitator = "Dana"
//! domain = "security"
//!
//! [synthesis.weights]
//! alice = 2.0
//! ```

use council_domain::{ConfigIssue, ConfigIssueCode, StrategyKind, SynthesisOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesisConfig {
    /// Strategy name: "consensus", "weighted" or "facilitator"
    pub strategy: String,
    /// Participant who decides under the facilitator strategy
    pub facilitator: Option<String>,
    /// Decision domain for the expertise factor of the confidence model
    pub domain: Option<String>,
    /// Explicit weights for the weighted strategy
    pub weights: BTreeMap<String, f64>,
}

impl Default for FileSynthesisConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default().to_string(),
            facilitator: None,
            domain: None,
            weights: BTreeMap::new(),
        }
    }
}

impl FileSynthesisConfig {
    /// Parse the strategy string, falling back to consensus
    pub fn parse_strategy(&self) -> (StrategyKind, Vec<ConfigIssue>) {
        match self.strategy.parse::<StrategyKind>() {
            Ok(kind) => (kind, Vec::new()),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "synthesis.strategy".to_string(),
                        value: self.strategy.clone(),
                        valid_values: StrategyKind::all().iter().map(|k| k.to_string()).collect(),
                    },
                    format!(
                        "synthesis.strategy: unknown value '{}', falling back to '{}'",
                        self.strategy,
                        StrategyKind::default()
                    ),
                );
                (StrategyKind::default(), vec![issue])
            }
        }
    }

    /// Keep only positive weights
    pub fn parse_weights(&self) -> (BTreeMap<String, f64>, Vec<ConfigIssue>) {
        let mut weights = BTreeMap::new();
        let mut issues = Vec::new();
        for (name, weight) in &self.weights {
            if *weight > 0.0 {
                weights.insert(name.clone(), *weight);
            } else {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: format!("synthesis.weights.{}", name),
                        value: *weight,
                    },
                    format!(
                        "synthesis.weights.{}: weight must be positive, using the default weight",
                        name
                    ),
                ));
            }
        }
        (weights, issues)
    }

    /// Build the domain synthesis options, ignoring invalid values
    pub fn to_options(&self) -> SynthesisOptions {
        let mut options = SynthesisOptions::new(self.parse_strategy().0)
            .with_weights(self.parse_weights().0);
        options.facilitator = self.facilitator.clone();
        options
    }
}
