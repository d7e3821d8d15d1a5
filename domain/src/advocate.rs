//! Devil's advocate rotation
//!
//! Picks one participant per round to take the mandatory critical-review
//! role, favouring analytical voices and those who have served least.
//!
//! Selection only reads the [`AdvocateHistory`]; recording the pick is an
//! explicit, separate step ([`AdvocateHistory::record`]) owned by the caller.
//!
//! # Example
//!
//! ```
//! use council_domain::{AdvocateHistory, AdvocateSelector, HeuristicPolicy, Participant, Perspective, Position};
//!
//! let policy = HeuristicPolicy::default();
//! let selector = AdvocateSelector::new(&policy);
//! let perspectives = vec![Perspective::new(Participant::new("Kai", "Engineer"), Position::Approve, "ok")];
//!
//! let mut history = AdvocateHistory::new();
//! let pick = selector.select(&perspectives, &history).unwrap();
//! history.record(&pick.participant);
//! assert_eq!(history.count("Kai"), 1);
//! ```

use crate::core::string::normalize;
use crate::perspective::{Perspective, Position};
use crate::policy::HeuristicPolicy;
use crate::stance::{Stance, StanceAnalyzer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ANALYTICAL_BONUS: u32 = 10;
const ASSERTIVE_BONUS: u32 = 2;
const APPROVE_BONUS: u32 = 3;
const FAIRNESS_WEIGHT: u32 = 5;

/// Append-only record of past advocate selections
///
/// Counts are keyed by normalised name and always sum to the number of
/// selections. Deserialisation reads only the selection list and rebuilds
/// the counts from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct AdvocateHistory {
    selections: Vec<String>,
    counts: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct StoredHistory {
    #[serde(default)]
    selections: Vec<String>,
}

impl From<StoredHistory> for AdvocateHistory {
    fn from(stored: StoredHistory) -> Self {
        AdvocateHistory::from_selections(stored.selections)
    }
}

impl AdvocateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from an ordered list of past selections
    pub fn from_selections<I, S>(selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for name in selections {
            history.record(name);
        }
        history
    }

    /// Append a selection and bump its count
    pub fn record(&mut self, participant: impl Into<String>) {
        let participant = participant.into();
        *self.counts.entry(normalize(&participant)).or_insert(0) += 1;
        self.selections.push(participant);
    }

    pub fn selections(&self) -> &[String] {
        &self.selections
    }

    /// Times `participant` has served (case-insensitive)
    pub fn count(&self, participant: &str) -> usize {
        self.counts.get(&normalize(participant)).copied().unwrap_or(0)
    }

    /// Highest count of any participant (0 for an empty history)
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// The last `n` selections, oldest first
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.selections.len().saturating_sub(n);
        &self.selections[start..]
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// History as it arrives at the call boundary
///
/// Older callers hand over just the list of past selections; newer ones the
/// structured history. Either way it is converted once, up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryInput {
    /// Plain ordered list of selected participant names
    Selections(Vec<String>),
    /// Full history with counts
    Structured(AdvocateHistory),
}

impl Default for HistoryInput {
    fn default() -> Self {
        HistoryInput::Structured(AdvocateHistory::new())
    }
}

impl From<AdvocateHistory> for HistoryInput {
    fn from(history: AdvocateHistory) -> Self {
        HistoryInput::Structured(history)
    }
}

impl From<HistoryInput> for AdvocateHistory {
    fn from(input: HistoryInput) -> Self {
        match input {
            HistoryInput::Selections(names) => AdvocateHistory::from_selections(names),
            HistoryInput::Structured(history) => history,
        }
    }
}

/// The chosen advocate and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvocateSelection {
    pub participant: String,
    pub score: u32,
    pub stance: Stance,
    /// True when every participant served recently and the full set was used
    pub used_fallback: bool,
}

/// Fairness-weighted advocate rotation
pub struct AdvocateSelector<'a> {
    policy: &'a HeuristicPolicy,
}

impl<'a> AdvocateSelector<'a> {
    pub fn new(policy: &'a HeuristicPolicy) -> Self {
        Self { policy }
    }

    /// Choose an advocate, or `None` when there are no perspectives.
    ///
    /// Participants among the last `max(1, N - 1)` selections are skipped
    /// unless that leaves nobody, in which case everyone is eligible again.
    pub fn select(
        &self,
        perspectives: &[Perspective],
        history: &AdvocateHistory,
    ) -> Option<AdvocateSelection> {
        if perspectives.is_empty() {
            return None;
        }

        let window = perspectives.len().saturating_sub(1).max(1);
        let recent = history.recent(window);

        let eligible: Vec<&Perspective> = perspectives
            .iter()
            .filter(|p| !recent.iter().any(|name| p.participant.is_named(name)))
            .collect();
        let used_fallback = eligible.is_empty();
        let candidates: Vec<&Perspective> = if used_fallback {
            perspectives.iter().collect()
        } else {
            eligible
        };

        let analyzer = StanceAnalyzer::new(self.policy);
        let max_count = history.max_count();

        let mut best: Option<AdvocateSelection> = None;
        for p in candidates {
            let stance = analyzer.stance_of(&p.participant, Some(&p.content));
            let score = score(stance, p.position, max_count, history.count(p.name()));
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(AdvocateSelection {
                    participant: p.name().to_string(),
                    score,
                    stance,
                    used_fallback,
                });
            }
        }
        best
    }
}

fn score(stance: Stance, position: Position, max_count: usize, own_count: usize) -> u32 {
    let mut score = match stance {
        Stance::Analytical => ANALYTICAL_BONUS,
        Stance::Assertive => ASSERTIVE_BONUS,
        Stance::Collaborative => 0,
    };
    if position == Position::Approve {
        score += APPROVE_BONUS;
    }
    score + (max_count.saturating_sub(own_count) as u32) * FAIRNESS_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;

    fn view(name: &str, traits: &[&str], position: Position) -> Perspective {
        Perspective::new(
            Participant::new(name, "Engineer").with_traits(traits.iter().copied()),
            position,
            "",
        )
    }

    fn select(perspectives: &[Perspective], history: &AdvocateHistory) -> Option<AdvocateSelection> {
        let policy = HeuristicPolicy::default();
        AdvocateSelector::new(&policy).select(perspectives, history)
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(select(&[], &AdvocateHistory::new()).is_none());
    }

    #[test]
    fn test_single_perspective_always_selected() {
        let perspectives = vec![view("Solo", &[], Position::Block)];
        let history = AdvocateHistory::from_selections(["Solo", "Solo"]);
        let pick = select(&perspectives, &history).unwrap();
        assert_eq!(pick.participant, "Solo");
        assert!(pick.used_fallback);
    }

    #[test]
    fn test_analytical_preferred() {
        let perspectives = vec![
            view("A", &["collaborative"], Position::Approve),
            view("B", &["analytical"], Position::Block),
            view("C", &["decisive"], Position::Approve),
        ];
        let pick = select(&perspectives, &AdvocateHistory::new()).unwrap();
        assert_eq!(pick.participant, "B");
        assert_eq!(pick.score, 10);
        assert_eq!(pick.stance, Stance::Analytical);
    }

    #[test]
    fn test_recent_selection_excluded() {
        let perspectives = vec![
            view("A", &["analytical"], Position::Approve),
            view("B", &[], Position::Approve),
            view("C", &[], Position::Approve),
        ];
        // window = 2: A and B are excluded
        let history = AdvocateHistory::from_selections(["A", "B"]);
        let pick = select(&perspectives, &history).unwrap();
        assert_eq!(pick.participant, "C");
        // fairness: max count 1, own 0 => +5, approve +3
        assert_eq!(pick.score, 8);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let perspectives = vec![
            view("A", &[], Position::Neutral),
            view("B", &[], Position::Neutral),
        ];
        let pick = select(&perspectives, &AdvocateHistory::new()).unwrap();
        assert_eq!(pick.participant, "A");
    }

    #[test]
    fn test_selection_does_not_mutate_history() {
        let perspectives = vec![view("A", &[], Position::Approve)];
        let history = AdvocateHistory::new();
        let _ = select(&perspectives, &history);
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_counts_sum_to_len() {
        let mut history = AdvocateHistory::from_selections(["A", "B", "A"]);
        history.record("C");
        let total: usize = ["A", "B", "C"].iter().map(|n| history.count(n)).sum();
        assert_eq!(total, history.len());
        assert_eq!(history.max_count(), 2);
        assert_eq!(history.recent(2), ["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_history_input_legacy_list() {
        let input: HistoryInput = serde_json::from_str(r#"{"selections":["A","A","B"]}"#).unwrap();
        let history: AdvocateHistory = input.into();
        assert_eq!(history.count("A"), 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_structured_history_rebuilds_counts() {
        let input: HistoryInput = serde_json::from_str(
            r#"{"structured":{"selections":["A"],"counts":{"A":5,"B":3}}}"#,
        )
        .unwrap();
        let history: AdvocateHistory = input.into();
        assert_eq!(history.len(), 1);
        assert_eq!(history.count("A"), 1);
        assert_eq!(history.count("B"), 0);
        assert_eq!(history.max_count(), 1);
    }

    #[test]
    fn test_history_serializes_and_reloads() {
        let history = AdvocateHistory::from_selections(["A", "B", "A"]);
        let json = serde_json::to_string(&history).unwrap();
        let reloaded: AdvocateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, history);
    }

    #[test]
    fn test_counts_ignore_name_case() {
        let history = AdvocateHistory::from_selections(["alice", "Alice", "ALICE "]);
        assert_eq!(history.count("Alice"), 3);
        assert_eq!(history.max_count(), 3);
    }

    #[test]
    fn test_lowercase_history_still_counts_toward_fairness() {
        let perspectives = vec![
            view("Alice", &["analytical"], Position::Approve),
            view("Bob", &[], Position::Approve),
            view("Cy", &[], Position::Approve),
        ];
        // window = 2 excludes bob and cy, leaving only Alice
        let history = AdvocateHistory::from_selections(["alice", "alice", "alice", "bob", "cy"]);
        let pick = select(&perspectives, &history).unwrap();
        assert_eq!(pick.participant, "Alice");
        assert_eq!(history.count("Alice"), 3);
        // analytical 10 + approve 3, no fairness bonus for the most-served
        assert_eq!(pick.score, 13);
    }

    #[test]
    fn test_result_is_member_of_current_set() {
        let perspectives = vec![view("X", &[], Position::Defer), view("Y", &[], Position::Block)];
        let history = AdvocateHistory::from_selections(["Ghost", "Ghost", "X"]);
        let pick = select(&perspectives, &history).unwrap();
        assert!(perspectives.iter().any(|p| p.name() == pick.participant));
    }
}
