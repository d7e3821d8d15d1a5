//! Trade-off views
//!
//! Two flavours: short summary lines embedded in every synthesis result,
//! and a detailed per-option risk matrix built on request.

use crate::core::string::{contains_ci, normalize};
use crate::perspective::{Perspective, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

const BLOCK_WEIGHT: u32 = 2;
const DEFER_WEIGHT: u32 = 1;
const HIGH_RISK: f64 = 0.5;
const MEDIUM_RISK: f64 = 0.25;

/// One line per distinct dissenting concern, weighed against the approvers
pub fn tradeoff_summaries(perspectives: &[Perspective]) -> Vec<String> {
    let approvers: Vec<&str> = perspectives
        .iter()
        .filter(|p| p.position == Position::Approve)
        .map(|p| p.name())
        .collect();

    let mut seen = Vec::new();
    let mut lines = Vec::new();
    for p in perspectives.iter().filter(|p| p.position.is_dissent()) {
        for concern in &p.concerns {
            let key = normalize(concern);
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            let support = if approvers.is_empty() {
                "no approving participants".to_string()
            } else {
                format!("support from {}", approvers.join(", "))
            };
            lines.push(format!(
                "{} ({} {}) vs {}",
                concern.trim(),
                p.name(),
                p.position,
                support
            ));
        }
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK {
            RiskLevel::High
        } else if score >= MEDIUM_RISK {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Support and opposition for one candidate option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffEntry {
    pub option: String,
    pub support: u32,
    pub opposition: u32,
    pub advocates: Vec<String>,
    pub opponents: Vec<String>,
    /// opposition / (support + opposition), 0 when nobody mentions the option
    pub risk_score: f64,
    pub risk: RiskLevel,
}

/// Options ranked by risk, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeoffMatrix {
    pub entries: Vec<TradeoffEntry>,
}

impl TradeoffMatrix {
    /// Score each option by who mentions it in their content, concerns or
    /// recommendations. Blockers count double, deferrers once, approvers
    /// support once; neutral mentions are ignored.
    pub fn build<S: AsRef<str>>(options: &[S], perspectives: &[Perspective]) -> Self {
        let mut entries: Vec<TradeoffEntry> = options
            .iter()
            .map(|option| score_option(option.as_ref(), perspectives))
            .collect();
        entries.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        Self { entries }
    }

    pub fn highest_risk(&self) -> Option<&TradeoffEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn score_option(option: &str, perspectives: &[Perspective]) -> TradeoffEntry {
    let mut support = 0;
    let mut opposition = 0;
    let mut advocates = Vec::new();
    let mut opponents = Vec::new();

    for p in perspectives.iter().filter(|p| mentions(p, option)) {
        match p.position {
            Position::Approve => {
                support += 1;
                advocates.push(p.name().to_string());
            }
            Position::Block => {
                opposition += BLOCK_WEIGHT;
                opponents.push(p.name().to_string());
            }
            Position::Defer => {
                opposition += DEFER_WEIGHT;
                opponents.push(p.name().to_string());
            }
            Position::Neutral => {}
        }
    }

    let total = support + opposition;
    let risk_score = if total > 0 {
        opposition as f64 / total as f64
    } else {
        0.0
    };

    TradeoffEntry {
        option: option.to_string(),
        support,
        opposition,
        advocates,
        opponents,
        risk_score,
        risk: RiskLevel::from_score(risk_score),
    }
}

fn mentions(perspective: &Perspective, option: &str) -> bool {
    let option = option.trim();
    !option.is_empty()
        && (contains_ci(&perspective.content, option)
            || perspective.concerns.iter().any(|c| contains_ci(c, option))
            || perspective
                .recommendations
                .iter()
                .any(|r| contains_ci(r, option)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;

    fn view(name: &str, position: Position, content: &str) -> Perspective {
        Perspective::new(Participant::new(name, "Engineer"), position, content)
    }

    #[test]
    fn test_matrix_scores_and_sorts() {
        let perspectives = vec![
            view("A", Position::Approve, "Postgres is fine, Redis too"),
            view("B", Position::Block, "postgres will not scale"),
            view("C", Position::Defer, "unsure about redis"),
            view("D", Position::Approve, "redis please"),
        ];
        let matrix = TradeoffMatrix::build(&["Redis", "Postgres", "Kafka"], &perspectives);
        let options: Vec<&str> = matrix.entries.iter().map(|e| e.option.as_str()).collect();
        assert_eq!(options, vec!["Postgres", "Redis", "Kafka"]);

        let postgres = &matrix.entries[0];
        assert_eq!(postgres.support, 1);
        assert_eq!(postgres.opposition, 2);
        assert_eq!(postgres.risk, RiskLevel::High);
        assert_eq!(postgres.opponents, vec!["B".to_string()]);

        let redis = &matrix.entries[1];
        assert_eq!((redis.support, redis.opposition), (2, 1));
        assert_eq!(redis.risk, RiskLevel::Medium);

        assert_eq!(matrix.entries[2].risk, RiskLevel::Low);
        assert_eq!(matrix.entries[2].risk_score, 0.0);
    }

    #[test]
    fn test_summaries_one_per_distinct_concern() {
        let perspectives = vec![
            view("A", Position::Approve, ""),
            view("B", Position::Block, "").with_concerns(["Cost", "latency"]),
            view("C", Position::Defer, "").with_concerns(["cost "]),
        ];
        let lines = tradeoff_summaries(&perspectives);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Cost (B block) vs support from A");
    }

    #[test]
    fn test_summaries_without_approvers() {
        let perspectives = vec![view("B", Position::Block, "").with_concerns(["cost"])];
        assert_eq!(
            tradeoff_summaries(&perspectives),
            vec!["cost (B block) vs no approving participants".to_string()]
        );
    }
}
