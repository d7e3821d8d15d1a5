//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use std::fmt;

/// Stages of a deliberation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliberationStage {
    /// Resolve perspective records against the catalog
    Resolve,
    /// Detect and annotate conflicts
    Conflicts,
    /// Choose the devil's advocate
    Advocate,
    /// Run the synthesis strategy and confidence model
    Synthesis,
    /// Build the per-option trade-off matrix
    Tradeoffs,
}

impl DeliberationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliberationStage::Resolve => "resolve",
            DeliberationStage::Conflicts => "conflicts",
            DeliberationStage::Advocate => "advocate",
            DeliberationStage::Synthesis => "synthesis",
            DeliberationStage::Tradeoffs => "tradeoffs",
        }
    }
}

impl fmt::Display for DeliberationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer.
pub trait DeliberationProgress: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: DeliberationStage);

    /// Called when a stage completes; `items` is the number of things it
    /// produced (perspectives, conflicts, ...)
    fn on_stage_complete(&self, stage: DeliberationStage, items: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DeliberationProgress for NoProgress {
    fn on_stage_start(&self, _stage: DeliberationStage) {}
    fn on_stage_complete(&self, _stage: DeliberationStage, _items: usize) {}
}
