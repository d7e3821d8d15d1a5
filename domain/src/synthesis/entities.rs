//! Synthesis value objects - the decision record and its parts.
//!
//! - [`ConsensusLevel`] - discretised group agreement
//! - [`Contribution`] - what each participant put in
//! - [`SynthesisResult`] - the final decision record

use super::confidence::ConfidenceFactors;
use super::strategy::StrategyKind;
use crate::perspective::{Perspective, Position};
use crate::report::DissentReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for any strategy-produced or enhanced confidence
pub const MIN_CONFIDENCE: f64 = 0.05;
/// Upper bound for any strategy-produced or enhanced confidence
pub const MAX_CONFIDENCE: f64 = 0.99;

/// Discretised group-agreement score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusLevel {
    Unanimous,
    Strong,
    Moderate,
    Weak,
    None,
}

impl ConsensusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusLevel::Unanimous => "unanimous",
            ConsensusLevel::Strong => "strong",
            ConsensusLevel::Moderate => "moderate",
            ConsensusLevel::Weak => "weak",
            ConsensusLevel::None => "none",
        }
    }

    /// Base confidence shared by the consensus and weighted strategies
    pub fn base_confidence(&self) -> f64 {
        match self {
            ConsensusLevel::Unanimous => 0.95,
            ConsensusLevel::Strong => 0.8,
            ConsensusLevel::Moderate => 0.6,
            ConsensusLevel::Weak => 0.4,
            ConsensusLevel::None => 0.2,
        }
    }

    /// Decision wording for a consensus level
    pub fn decision_text(&self, any_block: bool) -> &'static str {
        match self {
            ConsensusLevel::Unanimous => "Proceed: the council unanimously supports the proposal",
            ConsensusLevel::Strong => "Proceed: the council strongly supports the proposal",
            ConsensusLevel::Moderate => {
                "Proceed with caution: address the outstanding concerns during implementation"
            }
            ConsensusLevel::Weak => "Revise the proposal: support is too thin to proceed",
            ConsensusLevel::None if any_block => {
                "Do not proceed: blocking concerns must be resolved first"
            }
            ConsensusLevel::None => "No consensus reached: further discussion is required",
        }
    }
}

impl fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-participant contribution summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub participant: String,
    pub role: String,
    /// Position in the participant's latest perspective
    pub position: Position,
    pub perspectives: usize,
    pub concerns: usize,
    pub recommendations: usize,
    pub summary: String,
}

impl Contribution {
    /// Summarise contributions, merging perspectives of the same participant
    /// (first-appearance order)
    pub fn summarize(perspectives: &[Perspective]) -> Vec<Contribution> {
        let mut out: Vec<Contribution> = Vec::new();
        for p in perspectives {
            match out.iter_mut().find(|c| p.participant.is_named(&c.participant)) {
                Some(existing) => {
                    existing.position = p.position;
                    existing.perspectives += 1;
                    existing.concerns += p.concerns.len();
                    existing.recommendations += p.recommendations.len();
                }
                None => out.push(Contribution {
                    participant: p.name().to_string(),
                    role: p.participant.role.clone(),
                    position: p.position,
                    perspectives: 1,
                    concerns: p.concerns.len(),
                    recommendations: p.recommendations.len(),
                    summary: String::new(),
                }),
            }
        }
        for c in &mut out {
            c.summary = format!(
                "{} ({}): {}, {} concern(s), {} recommendation(s)",
                c.participant, c.role, c.position, c.concerns, c.recommendations
            );
        }
        out
    }
}

/// The group decision produced by exactly one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub strategy: StrategyKind,
    pub decision: String,
    pub confidence: f64,
    pub consensus_level: ConsensusLevel,
    pub rationale: String,
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissent_report: Option<DissentReport>,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_factors: Option<ConfidenceFactors>,
}

impl SynthesisResult {
    /// Fixed result for an empty perspective set
    pub fn no_decision(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            decision: "No decision: no perspectives were provided".to_string(),
            confidence: 0.0,
            consensus_level: ConsensusLevel::None,
            rationale: "Nothing to synthesize".to_string(),
            tradeoffs: Vec::new(),
            recommendations: Vec::new(),
            dissent: None,
            dissent_report: None,
            contributions: Vec::new(),
            confidence_factors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;

    #[test]
    fn test_base_confidence_table() {
        assert_eq!(ConsensusLevel::Unanimous.base_confidence(), 0.95);
        assert_eq!(ConsensusLevel::Strong.base_confidence(), 0.8);
        assert_eq!(ConsensusLevel::Moderate.base_confidence(), 0.6);
        assert_eq!(ConsensusLevel::Weak.base_confidence(), 0.4);
        assert_eq!(ConsensusLevel::None.base_confidence(), 0.2);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(ConsensusLevel::None.to_string(), "none");
        assert_eq!(
            serde_json::to_string(&ConsensusLevel::Unanimous).unwrap(),
            "\"unanimous\""
        );
    }

    #[test]
    fn test_contributions_merge_rounds() {
        let kai = Participant::new("Kai", "Engineer");
        let perspectives = vec![
            Perspective::new(kai.clone(), Position::Defer, "r1").with_concerns(["cost"]),
            Perspective::new(Participant::new("Ana", "QA"), Position::Approve, ""),
            Perspective::new(kai, Position::Approve, "r2")
                .with_round(2)
                .with_recommendations(["pilot first"]),
        ];
        let contributions = Contribution::summarize(&perspectives);
        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].participant, "Kai");
        assert_eq!(contributions[0].position, Position::Approve);
        assert_eq!(contributions[0].perspectives, 2);
        assert_eq!(contributions[0].concerns, 1);
        assert_eq!(contributions[0].recommendations, 1);
        assert!(contributions[0].summary.starts_with("Kai (Engineer): approve"));
    }

    #[test]
    fn test_no_decision() {
        let result = SynthesisResult::no_decision(StrategyKind::Weighted);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.consensus_level, ConsensusLevel::None);
        assert!(result.dissent.is_none());
        assert!(result.dissent_report.is_none());
    }
}
