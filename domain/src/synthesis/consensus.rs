//! Unweighted consensus strategy

use super::entities::{ConsensusLevel, MAX_CONFIDENCE};
use super::strategy::{DecisionStrategy, StrategyKind, StrategyOutcome};
use crate::perspective::{Perspective, Position, PositionTally};

/// Consensus level from the share of approving perspectives
pub struct ConsensusStrategy;

impl ConsensusStrategy {
    /// Level for an approve rate; any block forces `None`
    pub fn level(tally: &PositionTally) -> ConsensusLevel {
        let total = tally.total();
        if total == 0 || tally.block > 0 {
            return ConsensusLevel::None;
        }
        let rate = tally.approve as f64 / total as f64;
        if rate >= 1.0 {
            ConsensusLevel::Unanimous
        } else if rate >= 0.75 {
            ConsensusLevel::Strong
        } else if rate >= 0.5 {
            ConsensusLevel::Moderate
        } else if rate >= 0.25 {
            ConsensusLevel::Weak
        } else {
            ConsensusLevel::None
        }
    }

    fn confidence(level: ConsensusLevel, count: usize) -> f64 {
        let base = level.base_confidence();
        let scaled = if count >= 4 {
            base * 1.1
        } else if count <= 2 {
            base * 0.9
        } else {
            base
        };
        scaled.min(MAX_CONFIDENCE)
    }
}

impl DecisionStrategy for ConsensusStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Consensus
    }

    fn decide(&self, perspectives: &[Perspective]) -> StrategyOutcome {
        let tally = PositionTally::from_perspectives(perspectives);
        let level = Self::level(&tally);

        let dissent = perspectives
            .iter()
            .find(|p| p.position == Position::Block)
            .map(|p| {
                let mut text = format!("{} ({}) blocks", p.name(), p.participant.role);
                if !p.concerns.is_empty() {
                    text.push_str(&format!(": {}", p.concerns.join("; ")));
                }
                text
            });

        StrategyOutcome {
            decision: level.decision_text(tally.block > 0).to_string(),
            confidence: Self::confidence(level, perspectives.len()),
            consensus_level: level,
            rationale: format!(
                "{} of {} perspectives approve ({} block, {} defer, {} neutral)",
                tally.approve,
                tally.total(),
                tally.block,
                tally.defer,
                tally.neutral
            ),
            dissent,
        }
    }
}
