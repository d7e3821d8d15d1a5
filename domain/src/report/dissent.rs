//! Minority-opinion report

use crate::core::string::{dedup_ci, normalize};
use crate::perspective::{Perspective, Position};
use serde::{Deserialize, Serialize};

const TOP_CONCERNS: usize = 3;

/// A blocking or deferring participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dissenter {
    pub participant: String,
    pub role: String,
    pub position: Position,
    pub concerns: Vec<String>,
    pub expertise: Vec<String>,
    pub has_veto: bool,
}

/// Who dissented, about what, in one summary line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissentReport {
    pub dissenters: Vec<Dissenter>,
    /// Distinct concerns across all dissenters (case-insensitive)
    pub concerns: Vec<String>,
    pub summary: String,
}

impl DissentReport {
    /// `None` when nobody blocked or deferred
    pub fn build(perspectives: &[Perspective]) -> Option<Self> {
        let dissenting: Vec<&Perspective> = perspectives
            .iter()
            .filter(|p| p.position.is_dissent())
            .collect();
        if dissenting.is_empty() {
            return None;
        }

        let dissenters: Vec<Dissenter> = dissenting
            .iter()
            .map(|p| Dissenter {
                participant: p.name().to_string(),
                role: p.participant.role.clone(),
                position: p.position,
                concerns: p.concerns.clone(),
                expertise: p.participant.expertise.clone(),
                has_veto: p.participant.has_veto,
            })
            .collect();
        let concerns = dedup_ci(dissenting.iter().flat_map(|p| p.concerns.iter()));
        let summary = summarize(&dissenters);

        Some(Self {
            dissenters,
            concerns,
            summary,
        })
    }

    pub fn has_veto(&self) -> bool {
        self.dissenters.iter().any(|d| d.has_veto)
    }
}

fn summarize(dissenters: &[Dissenter]) -> String {
    let vetoes: Vec<&str> = dissenters
        .iter()
        .filter(|d| d.has_veto)
        .map(|d| d.participant.as_str())
        .collect();
    if !vetoes.is_empty() {
        return format!(
            "Veto active: {} hold(s) veto power and dissent",
            vetoes.join(", ")
        );
    }

    if dissenters.iter().all(|d| d.position == Position::Defer) {
        let names: Vec<&str> = dissenters.iter().map(|d| d.participant.as_str()).collect();
        return format!("Deferred by {}", names.join(", "));
    }

    let blocking = dissenters
        .iter()
        .filter(|d| d.position == Position::Block)
        .count();
    let deferring = dissenters.len() - blocking;
    let mut summary = format!("{} blocking, {} deferring", blocking, deferring);
    let top = top_concerns(dissenters);
    if !top.is_empty() {
        summary.push_str(&format!("; top concerns: {}", top.join(", ")));
    }
    summary
}

/// Most frequent concerns; ties keep first-seen order
fn top_concerns(dissenters: &[Dissenter]) -> Vec<String> {
    let mut counts: Vec<(String, String, usize)> = Vec::new();
    for concern in dissenters.iter().flat_map(|d| d.concerns.iter()) {
        let key = normalize(concern);
        if key.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(k, _, _)| *k == key) {
            Some(entry) => entry.2 += 1,
            None => counts.push((key, concern.trim().to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.2.cmp(&a.2));
    counts
        .into_iter()
        .take(TOP_CONCERNS)
        .map(|(_, text, _)| text)
        .collect()
}
