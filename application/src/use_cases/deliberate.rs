//! Deliberate use case
//!
//! Runs one full council pass over a set of perspective records:
//!
//! 1. **Resolve** - attach catalog participants to the raw records
//! 2. **Conflicts** - detect at the configured sensitivity, then annotate
//! 3. **Advocate** - pick the devil's advocate and append it to the history
//! 4. **Synthesis** - strategy decision plus the composite confidence model
//! 5. **Tradeoffs** - per-option risk matrix, only when options are given

use crate::config::DeliberationParams;
use crate::ports::progress::{DeliberationProgress, DeliberationStage, NoProgress};
use council_domain::{
    AdvocateHistory, AdvocateSelection, AdvocateSelector, ConfidenceInputs, Conflict,
    ConflictDetector, ConflictResolver, HeuristicPolicy, HistoryInput, ParticipantCatalog,
    Perspective, PerspectiveRecord, SynthesisEngine, SynthesisResult, TradeoffMatrix, unresolved,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while preparing a deliberation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberateError {
    #[error("Unknown participant '{name}' (not in the catalog by name or role)")]
    UnknownParticipant { name: String },
}

/// Input for the Deliberate use case
#[derive(Debug, Clone, Default)]
pub struct DeliberationInput {
    pub proposal: String,
    pub records: Vec<PerspectiveRecord>,
    pub history: HistoryInput,
    pub params: DeliberationParams,
    /// Candidate options for the trade-off matrix
    pub options: Vec<String>,
    pub addressed_concerns: usize,
    /// Overrides the distinct-concern count of the confidence model
    pub total_concerns: Option<usize>,
}

impl DeliberationInput {
    pub fn new(proposal: impl Into<String>, records: Vec<PerspectiveRecord>) -> Self {
        Self {
            proposal: proposal.into(),
            records,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: impl Into<HistoryInput>) -> Self {
        self.history = history.into();
        self
    }

    pub fn with_params(mut self, params: DeliberationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
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
}

/// Everything one deliberation produced
#[derive(Debug, Clone, Serialize)]
pub struct DeliberationOutcome {
    pub proposal: String,
    pub perspectives: Vec<Perspective>,
    pub conflicts: Vec<Conflict>,
    pub advocate: Option<AdvocateSelection>,
    /// Input history with this round's advocate appended
    pub history: AdvocateHistory,
    pub synthesis: SynthesisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tradeoff_matrix: Option<TradeoffMatrix>,
}

impl DeliberationOutcome {
    pub fn unresolved_conflicts(&self) -> usize {
        unresolved(&self.conflicts).count()
    }
}

/// Use case for running a council deliberation
pub struct DeliberateUseCase {
    catalog: Arc<ParticipantCatalog>,
    policy: Arc<HeuristicPolicy>,
}

impl DeliberateUseCase {
    pub fn new(catalog: Arc<ParticipantCatalog>) -> Self {
        Self {
            catalog,
            policy: Arc::new(HeuristicPolicy::default()),
        }
    }

    pub fn with_policy(mut self, policy: Arc<HeuristicPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: DeliberationInput,
    ) -> Result<DeliberationOutcome, DeliberateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DeliberationInput,
        progress: &dyn DeliberationProgress,
    ) -> Result<DeliberationOutcome, DeliberateError> {
        let DeliberationInput {
            proposal,
            records,
            history,
            params,
            options,
            addressed_concerns,
            total_concerns,
        } = input;

        info!("Starting deliberation with {} perspective(s)", records.len());

        // Stage 1: Resolve
        progress.on_stage_start(DeliberationStage::Resolve);
        let perspectives = self.resolve_records(records)?;
        progress.on_stage_complete(DeliberationStage::Resolve, perspectives.len());

        // Stage 2: Conflicts
        let conflicts = self.stage_conflicts(&perspectives, params.sensitivity, progress);

        // Stage 3: Advocate
        let mut history: AdvocateHistory = history.into();
        progress.on_stage_start(DeliberationStage::Advocate);
        let advocate = AdvocateSelector::new(&self.policy).select(&perspectives, &history);
        match &advocate {
            Some(selection) => {
                info!(
                    "Devil's advocate: {} (score {}, stance {})",
                    selection.participant, selection.score, selection.stance
                );
                if selection.used_fallback {
                    debug!("Every participant served recently; rotation window ignored");
                }
                history.record(selection.participant.clone());
            }
            None => debug!("No perspectives; no devil's advocate selected"),
        }
        progress.on_stage_complete(DeliberationStage::Advocate, usize::from(advocate.is_some()));

        // Stage 4: Synthesis
        progress.on_stage_start(DeliberationStage::Synthesis);
        if let Some(name) = params.synthesis.facilitator.as_deref() {
            if !perspectives.iter().any(|p| p.participant.is_named(name)) {
                warn!("Facilitator '{}' did not contribute; falling back", name);
            }
        }
        let mut inputs = ConfidenceInputs::new()
            .with_addressed_concerns(addressed_concerns)
            .with_conflicts(&conflicts);
        inputs.total_concerns = total_concerns;
        inputs.domain = params.domain.clone();
        let synthesis = SynthesisEngine::new(params.synthesis.clone())
            .synthesize_enhanced(&perspectives, &inputs);
        info!(
            "Decision ({}): {} [{} consensus, confidence {:.2}]",
            synthesis.strategy, synthesis.decision, synthesis.consensus_level, synthesis.confidence
        );
        progress.on_stage_complete(DeliberationStage::Synthesis, 1);

        // Stage 5: Tradeoffs (optional)
        let tradeoff_matrix = if options.is_empty() {
            debug!("No candidate options; skipping trade-off matrix");
            None
        } else {
            progress.on_stage_start(DeliberationStage::Tradeoffs);
            let matrix = TradeoffMatrix::build(&options, &perspectives);
            if let Some(top) = matrix.highest_risk() {
                debug!("Highest-risk option: {} ({})", top.option, top.risk);
            }
            progress.on_stage_complete(DeliberationStage::Tradeoffs, matrix.entries.len());
            Some(matrix)
        };

        Ok(DeliberationOutcome {
            proposal,
            perspectives,
            conflicts,
            advocate,
            history,
            synthesis,
            tradeoff_matrix,
        })
    }

    /// Attach catalog participants to raw records (by name, then role)
    pub fn resolve_records(
        &self,
        records: Vec<PerspectiveRecord>,
    ) -> Result<Vec<Perspective>, DeliberateError> {
        records
            .into_iter()
            .map(|record| {
                let participant = self.catalog.get(&record.participant).cloned().ok_or_else(|| {
                    DeliberateError::UnknownParticipant {
                        name: record.participant.clone(),
                    }
                })?;
                Ok(record.into_perspective(participant))
            })
            .collect()
    }

    fn stage_conflicts(
        &self,
        perspectives: &[Perspective],
        sensitivity: f64,
        progress: &dyn DeliberationProgress,
    ) -> Vec<Conflict> {
        progress.on_stage_start(DeliberationStage::Conflicts);

        let detected = ConflictDetector::new(&self.policy).detect(perspectives, sensitivity);
        let conflicts = ConflictResolver::new().process(detected);

        let open = unresolved(&conflicts).count();
        info!(
            "Detected {} conflict(s), {} unresolved (sensitivity {:.2})",
            conflicts.len(),
            open,
            sensitivity
        );
        for conflict in &conflicts {
            debug!(
                "{} {} conflict: {}",
                conflict.severity, conflict.conflict_type, conflict.description
            );
        }

        progress.on_stage_complete(DeliberationStage::Conflicts, conflicts.len());
        conflicts
    }
}
