//! Heuristic keyword tables
//!
//! Every text heuristic in the council is driven by ordered data rather than
//! inline conditionals: trait keyword groups and free-text markers for the
//! stance analyzer, priority buckets for the priority pass, and phrase-pair
//! groups for the semantic pass. [`HeuristicPolicy::default`] carries the
//! built-in tables; a `[heuristics]` config section can replace any of them.
//!
//! Order matters: priority buckets are tested first-to-last and the first
//! match wins; phrase lists are scanned in order and the first hit counts.

use crate::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// MoSCoW priority of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Must,
    Should,
    Could,
    Wont,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Must => "must",
            Priority::Should => "should",
            Priority::Could => "could",
            Priority::Wont => "won't",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keywords that put a recommendation into one priority bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityBucket {
    pub priority: Priority,
    pub keywords: Vec<String>,
}

/// A pair of opposing phrase lists (e.g. "urgent" vs "can wait")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseGroup {
    pub name: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl PhraseGroup {
    pub fn new(name: &str, positive: &[&str], negative: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            positive: to_owned(positive),
            negative: to_owned(negative),
        }
    }
}

/// All keyword tables consumed by the analyzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicPolicy {
    pub collaborative_traits: Vec<String>,
    pub assertive_traits: Vec<String>,
    pub analytical_traits: Vec<String>,
    pub collaborative_markers: Vec<String>,
    pub assertive_markers: Vec<String>,
    pub analytical_markers: Vec<String>,
    pub priority_buckets: Vec<PriorityBucket>,
    pub phrase_groups: Vec<PhraseGroup>,
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            collaborative_traits: to_owned(&[
                "collaborative",
                "cooperative",
                "diplomatic",
                "supportive",
                "empathetic",
                "consensus",
            ]),
            assertive_traits: to_owned(&[
                "assertive",
                "decisive",
                "direct",
                "confident",
                "opinionated",
                "demanding",
            ]),
            analytical_traits: to_owned(&[
                "analytical",
                "data-driven",
                "methodical",
                "logical",
                "detail-oriented",
                "systematic",
            ]),
            collaborative_markers: to_owned(&[
                "we could",
                "perhaps",
                "consider",
                "maybe",
                "what if",
                "together",
            ]),
            assertive_markers: to_owned(&["must", "should", "require", "need to", "insist"]),
            analytical_markers: to_owned(&[
                "analyze",
                "analysis",
                "data",
                "evidence",
                "metric",
                "measure",
            ]),
            priority_buckets: vec![
                PriorityBucket {
                    priority: Priority::Must,
                    keywords: to_owned(&["must", "required", "mandatory"]),
                },
                PriorityBucket {
                    priority: Priority::Should,
                    keywords: to_owned(&["should", "important"]),
                },
                PriorityBucket {
                    priority: Priority::Could,
                    keywords: to_owned(&["could", "nice to have", "optional"]),
                },
                PriorityBucket {
                    priority: Priority::Wont,
                    keywords: to_owned(&["won't", "wont", "will not", "out of scope", "not needed"]),
                },
            ],
            phrase_groups: vec![
                PhraseGroup::new(
                    "requirement-strength",
                    &["must have", "essential", "mandatory", "non-negotiable"],
                    &["nice to have", "optional", "not essential", "can skip"],
                ),
                PhraseGroup::new(
                    "urgency",
                    &["urgent", "immediately", "asap", "right away"],
                    &["can wait", "no rush", "later phase", "not urgent"],
                ),
                PhraseGroup::new(
                    "methodology",
                    &["agile", "iterative", "incremental"],
                    &["waterfall", "big bang", "upfront design"],
                ),
                PhraseGroup::new(
                    "rigor",
                    &["comprehensive testing", "thorough", "rigorous"],
                    &["minimal testing", "quick and dirty", "good enough"],
                ),
            ],
        }
    }
}

impl HeuristicPolicy {
    /// Priority of a recommendation: first bucket with a keyword contained
    /// in the lowercased text
    pub fn priority_of(&self, recommendation: &str) -> Option<Priority> {
        let lower = recommendation.to_lowercase();
        self.priority_buckets
            .iter()
            .find(|bucket| {
                bucket
                    .keywords
                    .iter()
                    .any(|k| lower.contains(&k.to_lowercase()))
            })
            .map(|bucket| bucket.priority)
    }

    /// Report tables that are empty and would silently disable a heuristic
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let tables: [(&str, bool); 8] = [
            ("collaborative_traits", self.collaborative_traits.is_empty()),
            ("assertive_traits", self.assertive_traits.is_empty()),
            ("analytical_traits", self.analytical_traits.is_empty()),
            ("collaborative_markers", self.collaborative_markers.is_empty()),
            ("assertive_markers", self.assertive_markers.is_empty()),
            ("analytical_markers", self.analytical_markers.is_empty()),
            ("priority_buckets", self.priority_buckets.is_empty()),
            ("phrase_groups", self.phrase_groups.is_empty()),
        ];

        let mut issues: Vec<ConfigIssue> = tables
            .iter()
            .filter(|(_, empty)| *empty)
            .map(|(table, _)| {
                ConfigIssue::warning(
                    ConfigIssueCode::EmptyTable {
                        table: table.to_string(),
                    },
                    format!("heuristics.{}: table is empty, its heuristic never fires", table),
                )
            })
            .collect();

        for group in &self.phrase_groups {
            if group.positive.is_empty() || group.negative.is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyTable {
                        table: format!("phrase_groups.{}", group.name),
                    },
                    format!(
                        "heuristics.phrase_groups: group '{}' needs both positive and negative phrases",
                        group.name
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_first_bucket_wins() {
        let policy = HeuristicPolicy::default();
        assert_eq!(
            policy.priority_of("This feature is MUST have for launch"),
            Some(Priority::Must)
        );
        assert_eq!(
            policy.priority_of("this feature is out of scope for v1"),
            Some(Priority::Wont)
        );
        // "must" is tested before "won't"
        assert_eq!(
            policy.priority_of("we must say it won't ship"),
            Some(Priority::Must)
        );
        assert_eq!(policy.priority_of("add a dashboard"), None);
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(HeuristicPolicy::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_empty_tables() {
        let policy = HeuristicPolicy {
            analytical_traits: Vec::new(),
            phrase_groups: vec![PhraseGroup::new("urgency", &["urgent"], &[])],
            ..Default::default()
        };
        let issues = policy.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::EmptyTable { table } if table == "analytical_traits"
        )));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let policy: HeuristicPolicy =
            serde_json::from_str(r#"{"analytical_traits":["quant"]}"#).unwrap();
        assert_eq!(policy.analytical_traits, vec!["quant"]);
        assert_eq!(policy.priority_buckets.len(), 4);
    }
}
