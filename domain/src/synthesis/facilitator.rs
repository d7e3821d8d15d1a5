//! Facilitator-decides strategy

use super::entities::ConsensusLevel;
use super::strategy::{DecisionStrategy, StrategyKind, StrategyOutcome};
use crate::core::string::contains_ci;
use crate::perspective::{Perspective, Position};

const APPROVE_CONFIDENCE: f64 = 0.7;
const OTHER_CONFIDENCE: f64 = 0.5;
const FACILITATOR_ROLES: [&str; 2] = ["product", "manager"];

/// One participant decides on behalf of the group
pub struct FacilitatorStrategy {
    facilitator: Option<String>,
}

impl FacilitatorStrategy {
    pub fn new(facilitator: Option<String>) -> Self {
        Self { facilitator }
    }

    /// Named participant, else the first product/manager role, else the first
    /// perspective. `None` only for an empty set.
    pub fn pick<'p>(&self, perspectives: &'p [Perspective]) -> Option<&'p Perspective> {
        self.facilitator
            .as_deref()
            .and_then(|name| perspectives.iter().find(|p| p.participant.is_named(name)))
            .or_else(|| {
                perspectives.iter().find(|p| {
                    FACILITATOR_ROLES
                        .iter()
                        .any(|role| contains_ci(&p.participant.role, role))
                })
            })
            .or_else(|| perspectives.first())
    }

    fn decision_text(position: Position) -> &'static str {
        match position {
            Position::Approve => "Proceed: the facilitator approves the proposal",
            Position::Block => "Do not proceed: the facilitator blocks the proposal",
            _ => "Decision deferred: the facilitator requests further input",
        }
    }
}

impl DecisionStrategy for FacilitatorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Facilitator
    }

    fn decide(&self, perspectives: &[Perspective]) -> StrategyOutcome {
        let Some(facilitator) = self.pick(perspectives) else {
            return StrategyOutcome {
                decision: Self::decision_text(Position::Neutral).to_string(),
                confidence: OTHER_CONFIDENCE,
                consensus_level: ConsensusLevel::None,
                rationale: "No facilitator available".to_string(),
                dissent: None,
            };
        };

        // every round the facilitator spoke in is theirs, not dissent
        let others: Vec<&Perspective> = perspectives
            .iter()
            .filter(|p| !p.participant.is_named(facilitator.name()))
            .collect();
        let disagreeing: Vec<&Perspective> = others
            .iter()
            .copied()
            .filter(|p| p.position != facilitator.position)
            .collect();
        let level = if disagreeing.is_empty() {
            ConsensusLevel::Strong
        } else {
            ConsensusLevel::Moderate
        };
        let confidence = if facilitator.position == Position::Approve {
            APPROVE_CONFIDENCE
        } else {
            OTHER_CONFIDENCE
        };
        let dissent = (!disagreeing.is_empty()).then(|| {
            let names: Vec<String> = disagreeing
                .iter()
                .map(|p| format!("{} ({})", p.name(), p.position))
                .collect();
            format!("Differs from the facilitator: {}", names.join(", "))
        });

        StrategyOutcome {
            decision: Self::decision_text(facilitator.position).to_string(),
            confidence,
            consensus_level: level,
            rationale: format!(
                "Facilitated by {} ({}), who takes the position '{}'; {} of {} others differ",
                facilitator.name(),
                facilitator.participant.role,
                facilitator.position,
                disagreeing.len(),
                others.len()
            ),
            dissent,
        }
    }
}
