//! Stance analysis
//!
//! Derives a coarse communication posture for a participant from their
//! personality traits, optional free text, and veto power. The stance is a
//! weighting signal for conflict severity and advocate selection, never a
//! business rule on its own.

use crate::core::string::contains_ci;
use crate::participant::Participant;
use crate::policy::HeuristicPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Communication posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    #[default]
    Collaborative,
    Assertive,
    Analytical,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Collaborative => "collaborative",
            Stance::Assertive => "assertive",
            Stance::Analytical => "analytical",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw per-category scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceScores {
    pub collaborative: u32,
    pub assertive: u32,
    pub analytical: u32,
}

impl StanceScores {
    /// Resolve scores to a stance.
    ///
    /// Priority on ties: analytical, then assertive, then collaborative.
    pub fn resolve(&self) -> Stance {
        let max = self.collaborative.max(self.assertive).max(self.analytical);
        if self.analytical > 0 && self.analytical == max {
            Stance::Analytical
        } else if self.assertive > 0 && self.assertive == max {
            Stance::Assertive
        } else {
            Stance::Collaborative
        }
    }
}

/// Result of analysing one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceAnalysis {
    pub stance: Stance,
    pub scores: StanceScores,
    /// Which signals fired, for audit only
    pub indicators: Vec<String>,
}

/// Scores participants against the policy's trait groups and text markers
pub struct StanceAnalyzer<'a> {
    policy: &'a HeuristicPolicy,
}

impl<'a> StanceAnalyzer<'a> {
    pub fn new(policy: &'a HeuristicPolicy) -> Self {
        Self { policy }
    }

    pub fn analyze(&self, participant: &Participant, text: Option<&str>) -> StanceAnalysis {
        let mut scores = StanceScores::default();
        let mut indicators = Vec::new();

        let groups = [
            (Stance::Collaborative, &self.policy.collaborative_traits),
            (Stance::Assertive, &self.policy.assertive_traits),
            (Stance::Analytical, &self.policy.analytical_traits),
        ];
        for (stance, keywords) in groups {
            for t in &participant.traits {
                if keywords.iter().any(|k| contains_ci(t, k)) {
                    *score_mut(&mut scores, stance) += 1;
                    indicators.push(format!("trait:{}:{}", stance, t));
                }
            }
        }

        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            let lower = text.to_lowercase();
            let markers = [
                (Stance::Collaborative, &self.policy.collaborative_markers),
                (Stance::Assertive, &self.policy.assertive_markers),
                (Stance::Analytical, &self.policy.analytical_markers),
            ];
            for (stance, keywords) in markers {
                if let Some(hit) = keywords.iter().find(|k| lower.contains(&k.to_lowercase())) {
                    *score_mut(&mut scores, stance) += 1;
                    indicators.push(format!("text:{}:{}", stance, hit));
                }
            }
        }

        if participant.has_veto {
            scores.assertive += 2;
            indicators.push("veto".to_string());
        }

        StanceAnalysis {
            stance: scores.resolve(),
            scores,
            indicators,
        }
    }

    /// Shorthand when only the stance is needed
    pub fn stance_of(&self, participant: &Participant, text: Option<&str>) -> Stance {
        self.analyze(participant, text).stance
    }
}

fn score_mut(scores: &mut StanceScores, stance: Stance) -> &mut u32 {
    match stance {
        Stance::Collaborative => &mut scores.collaborative,
        Stance::Assertive => &mut scores.assertive,
        Stance::Analytical => &mut scores.analytical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(participant: &Participant, text: Option<&str>) -> StanceAnalysis {
        let policy = HeuristicPolicy::default();
        StanceAnalyzer::new(&policy).analyze(participant, text)
    }

    #[test]
    fn test_default_is_collaborative() {
        let p = Participant::new("Kai", "Engineer");
        let analysis = analyze(&p, None);
        assert_eq!(analysis.stance, Stance::Collaborative);
        assert_eq!(analysis.scores, StanceScores::default());
        assert!(analysis.indicators.is_empty());
    }

    #[test]
    fn test_trait_matches_stack() {
        let p = Participant::new("Kai", "Engineer").with_traits(["Decisive", "very direct"]);
        let analysis = analyze(&p, None);
        assert_eq!(analysis.scores.assertive, 2);
        assert_eq!(analysis.stance, Stance::Assertive);
    }

    #[test]
    fn test_text_contributes_at_most_one_per_category() {
        let p = Participant::new("Kai", "Engineer");
        let analysis = analyze(&p, Some("We must, we should, we require it"));
        assert_eq!(analysis.scores.assertive, 1);
        assert_eq!(analysis.stance, Stance::Assertive);
    }

    #[test]
    fn test_analytical_wins_ties() {
        let p = Participant::new("Kai", "Engineer").with_traits(["analytical", "assertive"]);
        assert_eq!(analyze(&p, None).stance, Stance::Analytical);
    }

    #[test]
    fn test_assertive_beats_collaborative_on_tie() {
        let p = Participant::new("Kai", "Engineer").with_traits(["collaborative", "decisive"]);
        assert_eq!(analyze(&p, None).stance, Stance::Assertive);
    }

    #[test]
    fn test_veto_adds_two_assertive() {
        let p = Participant::new("Sam", "Security")
            .with_traits(["analytical"])
            .with_veto_power();
        let analysis = analyze(&p, None);
        assert_eq!(analysis.scores.assertive, 2);
        assert_eq!(analysis.stance, Stance::Assertive);
        assert!(analysis.indicators.iter().any(|i| i == "veto"));
    }

    #[test]
    fn test_collaborative_text_marker() {
        let p = Participant::new("Kai", "Engineer");
        let analysis = analyze(&p, Some("Perhaps we could phase it"));
        assert_eq!(analysis.scores.collaborative, 1);
        assert_eq!(analysis.stance, Stance::Collaborative);
    }
}
