//! Conflict detection
//!
//! Four independent passes run over the same read-only perspective snapshot:
//!
//! - **direct**: blocking vs approving positions, plus one conflict per
//!   veto-holding blocker
//! - **priority**: "must" vs "won't" recommendations on the same topic
//! - **scope**: diverging timeline estimates and coverage targets
//! - **semantic**: opposing phrasing within a phrase-pair group
//!
//! The passes share nothing but the snapshot and the keyword tables, so
//! their order only affects the order of the concatenated output.

use super::entities::{Conflict, ConflictSeverity, ConflictType};
use crate::core::string::window;
use crate::perspective::{Perspective, Position};
use crate::policy::{HeuristicPolicy, Priority};
use crate::stance::{Stance, StanceAnalyzer};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// At or above this sensitivity only critical/major conflicts are kept
pub const SENSITIVITY_THRESHOLD: f64 = 0.5;

/// Characters of context quoted before a semantic match
const EXCERPT_BEFORE: usize = 30;
/// Characters of context quoted after a semantic match
const EXCERPT_AFTER: usize = 50;

static WEEKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*weeks?\b").expect("valid weeks pattern"));
static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*days?\b").expect("valid days pattern"));
static HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)\b").expect("valid hours pattern")
});
static COVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s*%\s*(?:[a-z]+\s+)?coverage").expect("valid coverage pattern")
});

/// Runs the four detection passes
pub struct ConflictDetector<'a> {
    policy: &'a HeuristicPolicy,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(policy: &'a HeuristicPolicy) -> Self {
        Self { policy }
    }

    /// Run every pass and apply the sensitivity gate.
    ///
    /// Below [`SENSITIVITY_THRESHOLD`] everything is kept; at or above it
    /// only critical and major conflicts survive.
    pub fn detect(&self, perspectives: &[Perspective], sensitivity: f64) -> Vec<Conflict> {
        if perspectives.is_empty() {
            return Vec::new();
        }

        let mut conflicts = self.detect_direct(perspectives);
        conflicts.extend(self.detect_priority(perspectives));
        conflicts.extend(self.detect_scope(perspectives));
        conflicts.extend(self.detect_semantic(perspectives));

        filter_by_sensitivity(conflicts, sensitivity)
    }

    /// Blocking vs approving positions.
    pub fn detect_direct(&self, perspectives: &[Perspective]) -> Vec<Conflict> {
        let blockers: Vec<&Perspective> = perspectives
            .iter()
            .filter(|p| p.position == Position::Block)
            .collect();
        let approvers: Vec<&Perspective> = perspectives
            .iter()
            .filter(|p| p.position == Position::Approve)
            .collect();

        let mut conflicts = Vec::new();

        if !blockers.is_empty() && !approvers.is_empty() {
            let mut severity =
                direct_severity(&self.stances(&blockers), &self.stances(&approvers));
            if blockers.iter().any(|p| p.participant.has_veto) {
                severity = ConflictSeverity::Critical;
            }

            let description = format!(
                "Direct conflict: {} block while {} approve",
                join_names(&blockers),
                join_names(&approvers)
            );
            conflicts.push(
                Conflict::new(ConflictType::Direct, severity, description)
                    .with_perspectives(blockers.iter().chain(approvers.iter()).copied()),
            );
        }

        for p in blockers.iter().filter(|p| p.participant.has_veto) {
            let description = match &p.participant.veto_criteria {
                Some(criteria) => format!(
                    "Veto: {} ({}) blocks the proposal under veto criteria: {}",
                    p.name(),
                    p.participant.role,
                    criteria
                ),
                None => format!(
                    "Veto: {} ({}) blocks the proposal with veto power",
                    p.name(),
                    p.participant.role
                ),
            };
            conflicts.push(
                Conflict::new(ConflictType::Direct, ConflictSeverity::Critical, description)
                    .with_perspectives([*p])
                    .with_veto_holder(p.name()),
            );
        }

        conflicts
    }

    fn stances(&self, side: &[&Perspective]) -> Vec<Stance> {
        let analyzer = StanceAnalyzer::new(self.policy);
        side.iter()
            .map(|p| analyzer.stance_of(&p.participant, Some(&p.content)))
            .collect()
    }

    /// "Must" vs "won't" recommendations sharing a topic key.
    pub fn detect_priority(&self, perspectives: &[Perspective]) -> Vec<Conflict> {
        let mut topics: BTreeMap<String, Vec<(Priority, &Perspective)>> = BTreeMap::new();

        for p in perspectives {
            for recommendation in &p.recommendations {
                let Some(priority) = self.policy.priority_of(recommendation) else {
                    continue;
                };
                let topic = topic_key(recommendation);
                if topic.is_empty() {
                    continue;
                }
                topics.entry(topic).or_default().push((priority, p));
            }
        }

        let mut conflicts = Vec::new();
        for (topic, entries) in &topics {
            let musts: Vec<&Perspective> = side_of(entries, Priority::Must);
            let wonts: Vec<&Perspective> = side_of(entries, Priority::Wont);

            let clash = musts
                .iter()
                .any(|m| wonts.iter().any(|w| !w.participant.is_named(m.name())));
            if !clash {
                continue;
            }

            let description = format!(
                "Priority conflict on \"{}\": {} treat it as must-have while {} rule it out",
                topic,
                join_names(&musts),
                join_names(&wonts)
            );
            conflicts.push(
                Conflict::new(ConflictType::Priority, ConflictSeverity::Major, description)
                    .with_perspectives(unique(musts.iter().chain(wonts.iter()).copied())),
            );
        }
        conflicts
    }

    /// Timeline and coverage disagreements.
    pub fn detect_scope(&self, perspectives: &[Perspective]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        let estimates: Vec<(f64, &Perspective)> = perspectives
            .iter()
            .filter_map(|p| weeks_estimate(&p.content).map(|w| (w, p)))
            .filter(|(w, _)| *w > 0.0)
            .collect();

        if estimates.len() >= 2 {
            let (mut min, mut max) = (estimates[0], estimates[0]);
            for &entry in &estimates[1..] {
                if entry.0 < min.0 {
                    min = entry;
                }
                if entry.0 > max.0 {
                    max = entry;
                }
            }
            if max.0 > 2.0 * min.0 {
                let description = format!(
                    "Timeline conflict: {} estimates {:.1} weeks while {} estimates {:.1} weeks",
                    min.1.name(),
                    min.0,
                    max.1.name(),
                    max.0
                );
                conflicts.push(
                    Conflict::new(ConflictType::Scope, ConflictSeverity::Major, description)
                        .with_perspectives([min.1, max.1]),
                );
            }
        }

        let mut coverage: Vec<(u32, &Perspective)> = Vec::new();
        for p in perspectives {
            let lower = p.content.to_lowercase();
            for caps in COVERAGE.captures_iter(&lower) {
                if let Ok(value) = caps[1].parse::<u32>() {
                    coverage.push((value, p));
                }
            }
        }

        if coverage.len() >= 2 {
            let low = coverage.iter().map(|(v, _)| *v).min().unwrap_or(0);
            let high = coverage.iter().map(|(v, _)| *v).max().unwrap_or(0);
            if high - low >= 20 {
                let description = format!(
                    "Coverage conflict: targets range from {}% to {}%",
                    low, high
                );
                conflicts.push(
                    Conflict::new(ConflictType::Scope, ConflictSeverity::Minor, description)
                        .with_perspectives(unique(coverage.iter().map(|(_, p)| *p))),
                );
            }
        }

        conflicts
    }

    /// Opposing phrases within each phrase-pair group.
    pub fn detect_semantic(&self, perspectives: &[Perspective]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for group in &self.policy.phrase_groups {
            let mut positives: Vec<PhraseHit> = Vec::new();
            let mut negatives: Vec<PhraseHit> = Vec::new();

            for p in perspectives {
                let lower = p.content.to_lowercase();
                if !positives.iter().any(|h| h.perspective.participant.is_named(p.name())) {
                    if let Some(hit) = first_phrase(p, &lower, &group.positive, &group.negative) {
                        positives.push(hit);
                    }
                }
                if !negatives.iter().any(|h| h.perspective.participant.is_named(p.name())) {
                    if let Some(hit) = first_phrase(p, &lower, &group.negative, &group.positive) {
                        negatives.push(hit);
                    }
                }
            }

            let pair = positives.iter().find_map(|pos| {
                negatives
                    .iter()
                    .find(|neg| !neg.perspective.participant.is_named(pos.perspective.name()))
                    .map(|neg| (pos, neg))
            });

            if let Some((pos, neg)) = pair {
                let description = format!(
                    "Semantic conflict ({}): {} says \"{}\" (\"...{}...\") while {} says \"{}\" (\"...{}...\")",
                    group.name,
                    pos.perspective.name(),
                    pos.phrase,
                    pos.excerpt,
                    neg.perspective.name(),
                    neg.phrase,
                    neg.excerpt
                );
                conflicts.push(
                    Conflict::new(ConflictType::Semantic, ConflictSeverity::Major, description)
                        .with_perspectives([pos.perspective, neg.perspective]),
                );
            }
        }

        conflicts
    }
}

/// Apply the binary sensitivity gate
pub fn filter_by_sensitivity(conflicts: Vec<Conflict>, sensitivity: f64) -> Vec<Conflict> {
    if sensitivity < SENSITIVITY_THRESHOLD {
        conflicts
    } else {
        conflicts
            .into_iter()
            .filter(|c| c.severity.is_significant())
            .collect()
    }
}

/// Severity of the aggregate direct conflict from both sides' stances
fn direct_severity(blockers: &[Stance], approvers: &[Stance]) -> ConflictSeverity {
    let has = |side: &[Stance], stance: Stance| side.contains(&stance);

    if has(blockers, Stance::Assertive) && has(approvers, Stance::Assertive) {
        ConflictSeverity::Critical
    } else if has(blockers, Stance::Analytical) || has(approvers, Stance::Analytical) {
        ConflictSeverity::Major
    } else if blockers
        .iter()
        .chain(approvers)
        .all(|s| *s == Stance::Collaborative)
    {
        ConflictSeverity::Major
    } else {
        ConflictSeverity::Critical
    }
}

/// First three lowercased words
fn topic_key(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Week-equivalent duration from the first matching unit (weeks, days, hours)
fn weeks_estimate(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    let units: [(&Regex, f64); 3] = [(&*WEEKS, 1.0), (&*DAYS, 5.0), (&*HOURS, 40.0)];
    for (pattern, divisor) in units {
        if let Some(caps) = pattern.captures(&lower) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return Some(value / divisor);
            }
        }
    }
    None
}

struct PhraseHit<'p> {
    perspective: &'p Perspective,
    phrase: String,
    excerpt: String,
}

/// First phrase found in `lower`, skipping any occurrence that sits inside
/// an occurrence of an opposing phrase ("urgent" within "not urgent").
fn first_phrase<'p>(
    perspective: &'p Perspective,
    lower: &str,
    phrases: &[String],
    opposing: &[String],
) -> Option<PhraseHit<'p>> {
    let covered: Vec<(usize, usize)> = opposing
        .iter()
        .map(|phrase| phrase.to_lowercase())
        .filter(|needle| !needle.is_empty())
        .flat_map(|needle| {
            lower
                .match_indices(needle.as_str())
                .map(|(start, _)| (start, start + needle.len()))
                .collect::<Vec<_>>()
        })
        .collect();

    phrases.iter().find_map(|phrase| {
        let needle = phrase.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let start = lower
            .match_indices(needle.as_str())
            .map(|(start, _)| start)
            .find(|&start| {
                let end = start + needle.len();
                !covered.iter().any(|&(lo, hi)| lo <= start && end <= hi)
            })?;
        Some(PhraseHit {
            perspective,
            phrase: phrase.clone(),
            excerpt: window(lower, start, start + needle.len(), EXCERPT_BEFORE, EXCERPT_AFTER)
                .to_string(),
        })
    })
}

fn side_of<'p>(entries: &[(Priority, &'p Perspective)], priority: Priority) -> Vec<&'p Perspective> {
    entries
        .iter()
        .filter(|(p, _)| *p == priority)
        .map(|(_, perspective)| *perspective)
        .collect()
}

/// Remove repeated references to the same perspective, keeping order
fn unique<'p, I>(perspectives: I) -> Vec<&'p Perspective>
where
    I: IntoIterator<Item = &'p Perspective>,
{
    let mut out: Vec<&Perspective> = Vec::new();
    for p in perspectives {
        if !out.iter().any(|seen| std::ptr::eq(*seen, p)) {
            out.push(p);
        }
    }
    out
}

fn join_names(perspectives: &[&Perspective]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for p in perspectives {
        if !names.iter().any(|n| p.participant.is_named(n)) {
            names.push(p.name());
        }
    }
    names.join(", ")
}
