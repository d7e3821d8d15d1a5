//! Weighted voting strategy

use super::entities::ConsensusLevel;
use super::strategy::{DecisionStrategy, StrategyKind, StrategyOutcome};
use crate::core::string::normalize;
use crate::perspective::{Perspective, Position};
use std::collections::BTreeMap;

const VETO_WEIGHT: f64 = 1.5;
const DEFAULT_WEIGHT: f64 = 1.0;
const BLOCK_SHARE_LIMIT: f64 = 0.3;

/// Consensus level from weighted position shares
pub struct WeightedStrategy {
    /// Keys normalised to lowercase
    weights: BTreeMap<String, f64>,
}

impl WeightedStrategy {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, weight)| (normalize(&name), weight))
                .collect(),
        }
    }

    /// Explicit weight if supplied, else 1.5 for veto holders and 1.0 otherwise
    pub fn weight_of(&self, perspective: &Perspective) -> f64 {
        match self.weights.get(&normalize(perspective.name())) {
            Some(weight) => *weight,
            None if perspective.participant.has_veto => VETO_WEIGHT,
            None => DEFAULT_WEIGHT,
        }
    }

    fn level(approve_share: f64, block_share: f64) -> ConsensusLevel {
        if block_share > BLOCK_SHARE_LIMIT {
            ConsensusLevel::None
        } else if approve_share >= 0.85 {
            ConsensusLevel::Strong
        } else if approve_share >= 0.6 {
            ConsensusLevel::Moderate
        } else {
            ConsensusLevel::Weak
        }
    }
}

impl DecisionStrategy for WeightedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn decide(&self, perspectives: &[Perspective]) -> StrategyOutcome {
        let mut total = 0.0;
        let mut approve = 0.0;
        let mut block = 0.0;
        for p in perspectives {
            let weight = self.weight_of(p);
            total += weight;
            match p.position {
                Position::Approve => approve += weight,
                Position::Block => block += weight,
                _ => {}
            }
        }

        let (approve_share, block_share) = if total > 0.0 {
            (approve / total, block / total)
        } else {
            (0.0, 0.0)
        };
        let level = if total > 0.0 {
            Self::level(approve_share, block_share)
        } else {
            ConsensusLevel::None
        };

        let blockers: Vec<String> = perspectives
            .iter()
            .filter(|p| p.position == Position::Block)
            .filter_map(|p| {
                let weight = self.weight_of(p);
                (weight >= DEFAULT_WEIGHT).then(|| format!("{} (weight {:.1})", p.name(), weight))
            })
            .collect();
        let dissent = (!blockers.is_empty()).then(|| format!("Blocked by {}", blockers.join(", ")));

        StrategyOutcome {
            decision: level.decision_text(block > 0.0).to_string(),
            confidence: level.base_confidence(),
            consensus_level: level,
            rationale: format!(
                "Weighted approval {:.0}%, weighted opposition {:.0}% (total weight {:.1})",
                approve_share * 100.0,
                block_share * 100.0,
                total
            ),
            dissent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;

    fn view(participant: Participant, position: Position) -> Perspective {
        Perspective::new(participant, position, "")
    }

    #[test]
    fn test_veto_blocker_share_forces_none() {
        // 1.5 of 4.5 = 0.33 > 0.3
        let perspectives = vec![
            view(Participant::new("A", "Eng"), Position::Approve),
            view(Participant::new("B", "Eng"), Position::Approve),
            view(Participant::new("C", "Eng"), Position::Approve),
            view(Participant::new("Sec", "Security").with_veto_power(), Position::Block),
        ];
        let outcome = WeightedStrategy::new(BTreeMap::new()).decide(&perspectives);
        assert_eq!(outcome.consensus_level, ConsensusLevel::None);
        assert_eq!(outcome.confidence, 0.2);
        assert_eq!(outcome.dissent.as_deref(), Some("Blocked by Sec (weight 1.5)"));
    }

    #[test]
    fn test_explicit_weights_case_insensitive() {
        let strategy = WeightedStrategy::new(BTreeMap::from([("ALICE".to_string(), 3.0)]));
        let perspectives = vec![
            view(Participant::new("alice", "Lead"), Position::Approve),
            view(Participant::new("Bob", "Eng"), Position::Defer),
        ];
        assert_eq!(strategy.weight_of(&perspectives[0]), 3.0);
        assert_eq!(strategy.weight_of(&perspectives[1]), 1.0);
        // 3 / 4 = 0.75
        let outcome = strategy.decide(&perspectives);
        assert_eq!(outcome.consensus_level, ConsensusLevel::Moderate);
        assert_eq!(outcome.confidence, 0.6);
        assert!(outcome.dissent.is_none());
    }

    #[test]
    fn test_light_blockers_not_listed() {
        let strategy = WeightedStrategy::new(BTreeMap::from([("Intern".to_string(), 0.2)]));
        let mut perspectives: Vec<Perspective> = (0..9)
            .map(|i| view(Participant::new(format!("P{}", i), "Eng"), Position::Approve))
            .collect();
        perspectives.push(view(Participant::new("Intern", "Eng"), Position::Block));
        let outcome = strategy.decide(&perspectives);
        assert_eq!(outcome.consensus_level, ConsensusLevel::Strong);
        assert!(outcome.dissent.is_none());
    }

    #[test]
    fn test_approve_share_boundaries() {
        let decide = |approve_weight: f64, defer_weight: f64| {
            let strategy = WeightedStrategy::new(BTreeMap::from([
                ("A".to_string(), approve_weight),
                ("B".to_string(), defer_weight),
            ]));
            strategy
                .decide(&[
                    view(Participant::new("A", "Eng"), Position::Approve),
                    view(Participant::new("B", "Eng"), Position::Defer),
                ])
                .consensus_level
        };
        // 17 / 20 = 0.85
        assert_eq!(decide(17.0, 3.0), ConsensusLevel::Strong);
        // 21 / 25 = 0.84
        assert_eq!(decide(21.0, 4.0), ConsensusLevel::Moderate);
        // 3 / 5 = 0.6
        assert_eq!(decide(3.0, 2.0), ConsensusLevel::Moderate);
        // 59 / 100 = 0.59
        assert_eq!(decide(59.0, 41.0), ConsensusLevel::Weak);
    }

    #[test]
    fn test_zero_total_weight() {
        let strategy = WeightedStrategy::new(BTreeMap::from([("A".to_string(), 0.0)]));
        let outcome = strategy.decide(&[view(Participant::new("A", "Eng"), Position::Approve)]);
        assert_eq!(outcome.consensus_level, ConsensusLevel::None);
    }
}
