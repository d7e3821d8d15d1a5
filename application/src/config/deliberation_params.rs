//! Deliberation parameters - use case control.
//!
//! [`DeliberationParams`] groups the settings that control one run of
//! [`DeliberateUseCase`](crate::use_cases::deliberate::DeliberateUseCase).
//! Infrastructure builds them from the config file; the CLI overrides
//! individual fields from flags.

use council_domain::{StrategyKind, SynthesisOptions};
use serde::{Deserialize, Serialize};

/// Default detection sensitivity (below the gate, so every conflict is kept)
pub const DEFAULT_SENSITIVITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationParams {
    /// `< 0.5` keeps every conflict, `>= 0.5` only critical and major ones
    pub sensitivity: f64,
    pub synthesis: SynthesisOptions,
    /// Decision domain for the expertise factor of the confidence model
    pub domain: Option<String>,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            synthesis: SynthesisOptions::default(),
            domain: None,
        }
    }
}

impl DeliberationParams {
    // ==================== Builder Methods ====================

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.synthesis.strategy = strategy;
        self
    }

    pub fn with_synthesis(mut self, synthesis: SynthesisOptions) -> Self {
        self.synthesis = synthesis;
        self
    }

    pub fn with_facilitator(mut self, facilitator: impl Into<String>) -> Self {
        self.synthesis.facilitator = Some(facilitator.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}
