//! Decision synthesis
//!
//! One [`DecisionStrategy`] per run turns the perspectives into a decision;
//! the [`SynthesisEngine`] adds the derived views and, on request, the
//! composite confidence model.

pub mod confidence;
pub mod consensus;
pub mod engine;
pub mod entities;
pub mod facilitator;
pub mod strategy;
pub mod weighted;

pub use confidence::{ConfidenceFactors, ConfidenceInputs};
pub use consensus::ConsensusStrategy;
pub use engine::SynthesisEngine;
pub use entities::{
    ConsensusLevel, Contribution, MAX_CONFIDENCE, MIN_CONFIDENCE, SynthesisResult,
};
pub use facilitator::FacilitatorStrategy;
pub use strategy::{DecisionStrategy, StrategyKind, StrategyOutcome, SynthesisOptions};
pub use weighted::WeightedStrategy;
