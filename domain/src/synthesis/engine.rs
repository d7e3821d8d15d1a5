//! Synthesis engine - runs one strategy and assembles the decision record

use super::confidence::{ConfidenceInputs, evaluate};
use super::entities::{Contribution, SynthesisResult};
use super::strategy::SynthesisOptions;
use crate::core::string::dedup_ci;
use crate::perspective::Perspective;
use crate::report::{DissentReport, tradeoff_summaries};

/// Turns a perspective set into one [`SynthesisResult`]
///
/// # Example
///
/// ```
/// use council_domain::{Participant, Perspective, Position, StrategyKind, SynthesisEngine, SynthesisOptions};
///
/// let engine = SynthesisEngine::new(SynthesisOptions::new(StrategyKind::Consensus));
/// let perspectives: Vec<Perspective> = ["A", "B", "C", "D"]
///     .iter()
///     .map(|n| Perspective::new(Participant::new(*n, "Engineer"), Position::Approve, "ship it"))
///     .collect();
///
/// let result = engine.synthesize(&perspectives);
/// assert_eq!(result.consensus_level.as_str(), "unanimous");
/// assert_eq!(result.confidence, 0.99);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SynthesisEngine {
    options: SynthesisOptions,
}

impl SynthesisEngine {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Plain synthesis; an empty set yields the fixed "no decision" result
    pub fn synthesize(&self, perspectives: &[Perspective]) -> SynthesisResult {
        if perspectives.is_empty() {
            return SynthesisResult::no_decision(self.options.strategy);
        }

        let strategy = self.options.build_strategy();
        let outcome = strategy.decide(perspectives);

        SynthesisResult {
            strategy: strategy.kind(),
            decision: outcome.decision,
            confidence: outcome.confidence,
            consensus_level: outcome.consensus_level,
            rationale: outcome.rationale,
            tradeoffs: tradeoff_summaries(perspectives),
            recommendations: dedup_ci(perspectives.iter().flat_map(|p| p.recommendations.iter())),
            dissent: outcome.dissent,
            dissent_report: DissentReport::build(perspectives),
            contributions: Contribution::summarize(perspectives),
            confidence_factors: None,
        }
    }

    /// Synthesis plus the composite confidence model
    ///
    /// Unlike [`synthesize`](Self::synthesize), the confidence is always
    /// clamped, so even an empty set reports at least 0.05.
    pub fn synthesize_enhanced(
        &self,
        perspectives: &[Perspective],
        inputs: &ConfidenceInputs,
    ) -> SynthesisResult {
        let mut result = self.synthesize(perspectives);
        let factors = evaluate(result.confidence, perspectives, inputs);
        result.confidence = factors.final_confidence;
        result.confidence_factors = Some(factors);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;
    use crate::perspective::Position;
    use crate::synthesis::entities::ConsensusLevel;
    use crate::synthesis::strategy::StrategyKind;

    fn mixed() -> Vec<Perspective> {
        vec![
            Perspective::new(Participant::new("Ana", "Product Manager"), Position::Approve, "")
                .with_recommendations(["Pilot with one team", "Add metrics"]),
            Perspective::new(
                Participant::new("Sam", "Security").with_veto("No plaintext secrets"),
                Position::Block,
                "",
            )
            .with_concerns(["secrets in config"])
            .with_recommendations(["pilot with one team"]),
            Perspective::new(Participant::new("Kai", "Engineer"), Position::Defer, "")
                .with_concerns(["timeline"]),
        ]
    }

    #[test]
    fn test_empty_is_no_decision() {
        let result = SynthesisEngine::default().synthesize(&[]);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.consensus_level, ConsensusLevel::None);
        assert_eq!(result.strategy, StrategyKind::Consensus);
    }

    #[test]
    fn test_enhanced_empty_is_clamped() {
        let result = SynthesisEngine::default().synthesize_enhanced(&[], &ConfidenceInputs::new());
        assert_eq!(result.confidence, 0.05);
        assert!(result.confidence_factors.is_some());
    }

    #[test]
    fn test_result_records_strategy() {
        for kind in StrategyKind::all() {
            let engine = SynthesisEngine::new(SynthesisOptions::new(*kind));
            assert_eq!(engine.synthesize(&mixed()).strategy, *kind);
        }
    }

    #[test]
    fn test_derived_views_populated() {
        let result = SynthesisEngine::default().synthesize(&mixed());
        assert_eq!(
            result.recommendations,
            vec!["Pilot with one team".to_string(), "Add metrics".to_string()]
        );
        assert_eq!(result.contributions.len(), 3);
        assert!(!result.tradeoffs.is_empty());
        let report = result.dissent_report.unwrap();
        assert_eq!(report.dissenters.len(), 2);
    }

    #[test]
    fn test_facilitator_uses_product_manager() {
        let engine = SynthesisEngine::new(SynthesisOptions::new(StrategyKind::Facilitator));
        let result = engine.synthesize(&mixed());
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.consensus_level, ConsensusLevel::Moderate);
    }

    #[test]
    fn test_enhanced_in_range() {
        let engine = SynthesisEngine::new(SynthesisOptions::new(StrategyKind::Weighted));
        let inputs = ConfidenceInputs::new()
            .with_domain("security")
            .with_addressed_concerns(2);
        let result = engine.synthesize_enhanced(&mixed(), &inputs);
        assert!((0.05..=0.99).contains(&result.confidence));
    }
}
