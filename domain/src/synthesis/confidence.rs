//! Composite confidence model
//!
//! Layers three adjustments on top of a strategy's base confidence, in order:
//!
//! 1. concern coverage: `+0.10 × addressed / total`
//! 2. domain expertise: `+0.15 × aligned / relevant`, or `× 0.95` when a
//!    domain was named but no participant is an expert in it
//! 3. open conflicts: `-0.05` each, at most `-0.25`
//!
//! The result is clamped to `[0.05, 0.99]`.

use super::entities::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::conflict::{Conflict, unresolved};
use crate::core::string::dedup_ci;
use crate::perspective::{Perspective, PositionTally};
use serde::{Deserialize, Serialize};

const CONCERN_WEIGHT: f64 = 0.10;
const EXPERTISE_WEIGHT: f64 = 0.15;
const NO_EXPERT_FACTOR: f64 = 0.95;
const CONFLICT_PENALTY: f64 = 0.05;
const MAX_CONFLICT_PENALTY: f64 = 0.25;

/// Caller-supplied signals for enhanced synthesis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceInputs {
    /// Domain the decision belongs to (e.g. "security")
    pub domain: Option<String>,
    pub addressed_concerns: usize,
    /// Defaults to the number of distinct concerns raised
    pub total_concerns: Option<usize>,
    pub unresolved_conflicts: usize,
}

impl ConfidenceInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_addressed_concerns(mut self, addressed: usize) -> Self {
        self.addressed_concerns = addressed;
        self
    }

    pub fn with_total_concerns(mut self, total: usize) -> Self {
        self.total_concerns = Some(total);
        self
    }

    /// Count the conflicts that are still open
    pub fn with_conflicts(mut self, conflicts: &[Conflict]) -> Self {
        self.unresolved_conflicts = unresolved(conflicts).count();
        self
    }
}

/// Breakdown of how the final confidence was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub base: f64,
    pub addressed_concerns: usize,
    pub total_concerns: usize,
    pub concern_bonus: f64,
    pub relevant_experts: usize,
    pub aligned_experts: usize,
    pub expertise_bonus: f64,
    /// True when a domain was named but nobody had matching expertise
    pub expertise_penalty_applied: bool,
    pub unresolved_conflicts: usize,
    pub conflict_penalty: f64,
    pub final_confidence: f64,
}

/// Apply the enhancement steps to `base`
pub fn evaluate(base: f64, perspectives: &[Perspective], inputs: &ConfidenceInputs) -> ConfidenceFactors {
    let mut confidence = base;

    let total_concerns = inputs.total_concerns.unwrap_or_else(|| {
        dedup_ci(perspectives.iter().flat_map(|p| p.concerns.iter())).len()
    });
    let concern_bonus = if total_concerns > 0 {
        let ratio = (inputs.addressed_concerns as f64 / total_concerns as f64).min(1.0);
        CONCERN_WEIGHT * ratio
    } else {
        0.0
    };
    confidence += concern_bonus;

    let domain = inputs.domain.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let (relevant_experts, aligned_experts) = match domain {
        Some(domain) => {
            let majority = PositionTally::from_perspectives(perspectives).majority();
            let experts: Vec<&Perspective> = perspectives
                .iter()
                .filter(|p| p.participant.is_expert_in(domain))
                .collect();
            let aligned = experts.iter().filter(|p| p.position == majority).count();
            (experts.len(), aligned)
        }
        None => (0, 0),
    };
    let mut expertise_bonus = 0.0;
    let mut expertise_penalty_applied = false;
    if relevant_experts > 0 {
        expertise_bonus = EXPERTISE_WEIGHT * aligned_experts as f64 / relevant_experts as f64;
        confidence += expertise_bonus;
    } else if domain.is_some() {
        confidence *= NO_EXPERT_FACTOR;
        expertise_penalty_applied = true;
    }

    let conflict_penalty =
        (CONFLICT_PENALTY * inputs.unresolved_conflicts as f64).min(MAX_CONFLICT_PENALTY);
    confidence -= conflict_penalty;

    ConfidenceFactors {
        base,
        addressed_concerns: inputs.addressed_concerns,
        total_concerns,
        concern_bonus,
        relevant_experts,
        aligned_experts,
        expertise_bonus,
        expertise_penalty_applied,
        unresolved_conflicts: inputs.unresolved_conflicts,
        conflict_penalty,
        final_confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
    }
}
