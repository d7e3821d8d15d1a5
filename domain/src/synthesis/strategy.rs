//! Decision strategy trait and selection
//!
//! Different strategies can be plugged in to change how a perspective set is
//! turned into one decision:
//! - [`ConsensusStrategy`]: unweighted approve rate
//! - [`WeightedStrategy`]: per-participant weights, veto holders heavier
//! - [`FacilitatorStrategy`]: one participant decides for the group
//!
//! [`ConsensusStrategy`]: super::consensus::ConsensusStrategy
//! [`WeightedStrategy`]: super::weighted::WeightedStrategy
//! [`FacilitatorStrategy`]: super::facilitator::FacilitatorStrategy

use super::consensus::ConsensusStrategy;
use super::entities::ConsensusLevel;
use super::facilitator::FacilitatorStrategy;
use super::weighted::WeightedStrategy;
use crate::core::error::DomainError;
use crate::perspective::Perspective;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which strategy produced (or should produce) a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Consensus,
    Weighted,
    Facilitator,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Consensus => "consensus",
            StrategyKind::Weighted => "weighted",
            StrategyKind::Facilitator => "facilitator",
        }
    }

    pub fn all() -> &'static [StrategyKind] {
        &[
            StrategyKind::Consensus,
            StrategyKind::Weighted,
            StrategyKind::Facilitator,
        ]
    }

    /// Lenient parse: anything unrecognised selects consensus
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consensus" => Ok(StrategyKind::Consensus),
            "weighted" => Ok(StrategyKind::Weighted),
            "facilitator" => Ok(StrategyKind::Facilitator),
            _ => Err(DomainError::UnknownStrategy(s.to_string())),
        }
    }
}

/// What a strategy decides, before the engine adds the derived views
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub decision: String,
    pub confidence: f64,
    pub consensus_level: ConsensusLevel,
    pub rationale: String,
    pub dissent: Option<String>,
}

/// Trait for decision strategies
///
/// Implementations receive a non-empty perspective set; the engine handles
/// the empty case before dispatching.
pub trait DecisionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn decide(&self, perspectives: &[Perspective]) -> StrategyOutcome;
}

/// Caller-facing synthesis settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    pub strategy: StrategyKind,
    /// Explicit weights by participant name (matched case-insensitively)
    pub weights: BTreeMap<String, f64>,
    /// Participant who decides under the facilitator strategy
    pub facilitator: Option<String>,
}

impl SynthesisOptions {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, participant: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(participant.into(), weight);
        self
    }

    pub fn with_weights(mut self, weights: BTreeMap<String, f64>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_facilitator(mut self, facilitator: impl Into<String>) -> Self {
        self.facilitator = Some(facilitator.into());
        self
    }

    /// Instantiate the configured strategy
    pub fn build_strategy(&self) -> Box<dyn DecisionStrategy> {
        match self.strategy {
            StrategyKind::Consensus => Box::new(ConsensusStrategy),
            StrategyKind::Weighted => Box::new(WeightedStrategy::new(self.weights.clone())),
            StrategyKind::Facilitator => {
                Box::new(FacilitatorStrategy::new(self.facilitator.clone()))
            }
        }
    }
}
