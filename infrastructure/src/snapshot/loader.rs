//! JSON snapshot loader
//!
//! ```json
//! {
//!   "proposal": "Move sessions to Redis",
//!   "participants": [{ "name": "Sam", "role": "Security", "has_veto": true }],
//!   "perspectives": [{ "participant": "Sam", "position": "block", "content": "..." }],
//!   "advocate_history": { "selections": ["Sam"] },
//!   "options": ["Redis", "Postgres"],
//!   "addressed_concerns": 1
//! }
//! ```

use council_application::{DeliberationInput, DeliberationParams};
use council_domain::{HistoryInput, ParticipantCatalog, PerspectiveRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw snapshot document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliberationSnapshot {
    pub proposal: String,
    #[serde(default)]
    pub participants: ParticipantCatalog,
    #[serde(default)]
    pub perspectives: Vec<PerspectiveRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advocate_history: Option<HistoryInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub addressed_concerns: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_concerns: Option<usize>,
}

impl DeliberationSnapshot {
    /// Split into the catalog and the use case input
    pub fn into_parts(self, params: DeliberationParams) -> (ParticipantCatalog, DeliberationInput) {
        let mut input = DeliberationInput::new(self.proposal, self.perspectives)
            .with_params(params)
            .with_options(self.options)
            .with_addressed_concerns(self.addressed_concerns)
            .with_history(self.advocate_history.unwrap_or_default());
        input.total_concerns = self.total_concerns;
        (self.participants, input)
    }
}

/// Loads [`DeliberationSnapshot`]s from JSON files
pub struct JsonSnapshotLoader;

impl JsonSnapshotLoader {
    pub async fn load(path: &Path) -> Result<DeliberationSnapshot, SnapshotError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot = Self::parse(&raw)?;
        debug!(
            "Loaded snapshot {}: {} participant(s), {} perspective(s)",
            path.display(),
            snapshot.participants.len(),
            snapshot.perspectives.len()
        );
        Ok(snapshot)
    }

    pub fn parse(raw: &str) -> Result<DeliberationSnapshot, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }
}
