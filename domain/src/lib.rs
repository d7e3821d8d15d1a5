//! Domain layer for perspective-council
//!
//! This crate contains the core deliberation logic: conflict detection,
//! decision synthesis, and the derived reports. It has no dependencies on
//! infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Perspectives
//!
//! A [`Perspective`] is one [`Participant`]'s recorded input for a round:
//! free text, a [`Position`] (approve / block / defer / neutral), concerns
//! and recommendations.
//!
//! ## Conflicts
//!
//! The [`ConflictDetector`] runs four heuristic passes (direct, priority,
//! scope, semantic) and the [`ConflictResolver`] attaches canned suggestions.
//!
//! ## Synthesis
//!
//! The [`SynthesisEngine`] turns the perspectives into one decision using a
//! single strategy (consensus, weighted, facilitator), optionally refined by
//! the composite confidence model.
//!
//! ## Devil's advocate
//!
//! The [`AdvocateSelector`] rotates the critical-review role fairly across
//! participants using a caller-owned [`AdvocateHistory`].

pub mod advocate;
pub mod config;
pub mod conflict;
pub mod core;
pub mod participant;
pub mod perspective;
pub mod policy;
pub mod report;
pub mod stance;
pub mod synthesis;

// Re-export commonly used types
pub use advocate::{AdvocateHistory, AdvocateSelection, AdvocateSelector, HistoryInput};
pub use config::{ConfigIssue, ConfigIssueCode, IssueSeverity};
pub use conflict::{
    Conflict, ConflictDetector, ConflictResolver, ConflictSeverity, ConflictType,
    SENSITIVITY_THRESHOLD, filter_by_sensitivity, suggestions_for, unresolved,
};
pub use core::error::DomainError;
pub use participant::{Participant, ParticipantCatalog};
pub use perspective::{Perspective, PerspectiveRecord, Position, PositionTally};
pub use policy::{HeuristicPolicy, PhraseGroup, Priority, PriorityBucket};
pub use report::{
    DissentReport, Dissenter, RiskLevel, TradeoffEntry, TradeoffMatrix, tradeoff_summaries,
};
pub use stance::{Stance, StanceAnalysis, StanceAnalyzer, StanceScores};
pub use synthesis::{
    ConfidenceFactors, ConfidenceInputs, ConsensusLevel, Contribution, DecisionStrategy,
    StrategyKind, StrategyOutcome, SynthesisEngine, SynthesisOptions, SynthesisResult,
};
