//! Conflict entities

use crate::core::error::DomainError;
use crate::perspective::Perspective;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// Blocking and approving positions on the same proposal
    Direct,
    /// "Must" vs "won't" on the same topic
    Priority,
    /// Incompatible timelines or coverage targets
    Scope,
    /// Opposing phrasing within the same concern area
    Semantic,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::Direct => "direct",
            ConflictType::Priority => "priority",
            ConflictType::Scope => "scope",
            ConflictType::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConflictType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(ConflictType::Direct),
            "priority" => Ok(ConflictType::Priority),
            "scope" => Ok(ConflictType::Scope),
            "semantic" => Ok(ConflictType::Semantic),
            _ => Err(DomainError::InvalidConflictType(s.to_string())),
        }
    }
}

/// Severity of a conflict, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Minor,
    Major,
    Critical,
}

impl ConflictSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Minor => "minor",
            ConflictSeverity::Major => "major",
            ConflictSeverity::Critical => "critical",
        }
    }

    /// Critical or major
    pub fn is_significant(&self) -> bool {
        *self >= ConflictSeverity::Major
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConflictSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Ok(ConflictSeverity::Minor),
            "major" => Ok(ConflictSeverity::Major),
            "critical" => Ok(ConflictSeverity::Critical),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

/// A detected disagreement
///
/// Created by the detector; only the resolver later touches `resolved`,
/// `resolution`, `suggested_resolution` and `suggestions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub severity: ConflictSeverity,
    pub description: String,
    pub participants: Vec<String>,
    pub perspectives: Vec<Perspective>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_resolution: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Set only on the per-participant veto conflicts of the direct pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veto_holder: Option<String>,
}

impl Conflict {
    pub fn new(
        conflict_type: ConflictType,
        severity: ConflictSeverity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("conflict-{}", Uuid::new_v4()),
            conflict_type,
            severity,
            description: description.into(),
            participants: Vec::new(),
            perspectives: Vec::new(),
            resolved: false,
            resolution: None,
            suggested_resolution: None,
            suggestions: Vec::new(),
            veto_holder: None,
        }
    }

    /// Link the perspectives involved; participant names follow their order
    /// with duplicates removed
    pub fn with_perspectives<'p, I>(mut self, perspectives: I) -> Self
    where
        I: IntoIterator<Item = &'p Perspective>,
    {
        for p in perspectives {
            if !self
                .participants
                .iter()
                .any(|n| n.to_lowercase() == p.name().to_lowercase())
            {
                self.participants.push(p.name().to_string());
            }
            self.perspectives.push(p.clone());
        }
        self
    }

    pub fn with_veto_holder(mut self, name: impl Into<String>) -> Self {
        self.veto_holder = Some(name.into());
        self
    }

    /// Whether a linked blocking perspective comes from a veto holder
    pub fn involves_veto_block(&self) -> bool {
        self.perspectives.iter().any(|p| p.is_veto_block())
    }

    pub fn is_veto_conflict(&self) -> bool {
        self.veto_holder.is_some()
    }

    /// Mark resolved with the given resolution text
    pub fn resolve(&mut self, resolution: impl Into<String>) {
        self.resolved = true;
        self.resolution = Some(resolution.into());
    }

    /// Equality ignoring the generated identifier
    pub fn same_shape(&self, other: &Conflict) -> bool {
        Conflict {
            id: String::new(),
            ..self.clone()
        } == Conflict {
            id: String::new(),
            ..other.clone()
        }
    }
}
