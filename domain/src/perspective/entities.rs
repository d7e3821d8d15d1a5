//! Perspective entities
//!
//! A [`Perspective`] is one participant's recorded input for a round. It is
//! created by the external collection process and never modified afterward.

use crate::core::error::DomainError;
use crate::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position a participant takes on the proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Approve,
    Block,
    Defer,
    #[default]
    Neutral,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Approve => "approve",
            Position::Block => "block",
            Position::Defer => "defer",
            Position::Neutral => "neutral",
        }
    }

    /// Blocking or deferring, i.e. not going along with the proposal
    pub fn is_dissent(&self) -> bool {
        matches!(self, Position::Block | Position::Defer)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Ok(Position::Approve),
            "block" | "blocked" => Ok(Position::Block),
            "defer" | "deferred" => Ok(Position::Defer),
            "neutral" | "abstain" => Ok(Position::Neutral),
            _ => Err(DomainError::InvalidPosition(s.to_string())),
        }
    }
}

/// One participant's input for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    pub participant: Participant,
    pub round: u32,
    pub content: String,
    pub position: Position,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Perspective {
    pub fn new(participant: Participant, position: Position, content: impl Into<String>) -> Self {
        Self {
            participant,
            round: 1,
            content: content.into(),
            position,
            concerns: Vec::new(),
            recommendations: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn with_concerns<I, S>(mut self, concerns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concerns = concerns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn name(&self) -> &str {
        &self.participant.name
    }

    /// A blocking perspective from a participant that holds veto power
    pub fn is_veto_block(&self) -> bool {
        self.position == Position::Block && self.participant.has_veto
    }
}

/// Raw perspective as delivered by the collection process
///
/// The participant is referenced by name (or role) and resolved against a
/// [`ParticipantCatalog`](crate::ParticipantCatalog) at the call boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveRecord {
    pub participant: String,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default)]
    pub content: String,
    pub position: Position,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_round() -> u32 {
    1
}

impl PerspectiveRecord {
    /// Attach the resolved participant
    pub fn into_perspective(self, participant: Participant) -> Perspective {
        Perspective {
            participant,
            round: self.round,
            content: self.content,
            position: self.position,
            concerns: self.concerns,
            recommendations: self.recommendations,
            timestamp: self.timestamp,
        }
    }
}

/// Tally of positions across a perspective set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTally {
    pub approve: usize,
    pub block: usize,
    pub defer: usize,
    pub neutral: usize,
}

impl PositionTally {
    pub fn from_perspectives(perspectives: &[Perspective]) -> Self {
        let mut tally = Self::default();
        for p in perspectives {
            match p.position {
                Position::Approve => tally.approve += 1,
                Position::Block => tally.block += 1,
                Position::Defer => tally.defer += 1,
                Position::Neutral => tally.neutral += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.approve + self.block + self.defer + self.neutral
    }

    /// Majority position used for expert alignment
    ///
    /// Approve whenever approvals are at least as many as blocks, including
    /// a set with neither, so in practice the result is approve or block.
    pub fn majority(&self) -> Position {
        if self.approve >= self.block {
            Position::Approve
        } else if self.block > 0 {
            Position::Block
        } else if self.defer > 0 {
            Position::Defer
        } else {
            Position::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_str() {
        assert_eq!("approve".parse::<Position>().ok(), Some(Position::Approve));
        assert_eq!("Blocked".parse::<Position>().ok(), Some(Position::Block));
        assert_eq!("defer".parse::<Position>().ok(), Some(Position::Defer));
        assert_eq!("abstain".parse::<Position>().ok(), Some(Position::Neutral));
        assert!("maybe".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_serde_lowercase() {
        let json = serde_json::to_string(&Position::Block).unwrap();
        assert_eq!(json, "\"block\"");
    }

    #[test]
    fn test_tally_majority() {
        let p = |pos| Perspective::new(Participant::new("x", "r"), pos, "");
        let set = vec![p(Position::Approve), p(Position::Block)];
        assert_eq!(PositionTally::from_perspectives(&set).majority(), Position::Approve);

        let set = vec![p(Position::Block), p(Position::Defer)];
        assert_eq!(PositionTally::from_perspectives(&set).majority(), Position::Block);

        let set = vec![p(Position::Defer), p(Position::Neutral)];
        assert_eq!(PositionTally::from_perspectives(&set).majority(), Position::Approve);

        assert_eq!(PositionTally::default().majority(), Position::Approve);
    }

    #[test]
    fn test_record_into_perspective() {
        let record: PerspectiveRecord = serde_json::from_str(
            r#"{"participant":"Kai","position":"approve","content":"ship it"}"#,
        )
        .unwrap();
        assert_eq!(record.round, 1);
        let perspective = record.into_perspective(Participant::new("Kai", "Engineer"));
        assert_eq!(perspective.name(), "Kai");
        assert_eq!(perspective.position, Position::Approve);
    }

    #[test]
    fn test_is_veto_block() {
        let veto = Participant::new("Sam", "Security").with_veto_power();
        assert!(Perspective::new(veto.clone(), Position::Block, "").is_veto_block());
        assert!(!Perspective::new(veto, Position::Defer, "").is_veto_block());
    }
}
