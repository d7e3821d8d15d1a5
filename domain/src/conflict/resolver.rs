//! Conflict resolution suggestions
//!
//! Pure post-processing over an already detected list. Every conflict gets
//! the canned suggestions for its type; only minor scope conflicts are
//! closed automatically; everything else waits for a human decision.

use super::entities::{Conflict, ConflictSeverity, ConflictType};

const DIRECT_SUGGESTIONS: [&str; 3] = [
    "Hold a focused session between blocking and approving participants to surface the core objection",
    "Identify the smallest change to the proposal that addresses the blocking concerns",
    "Escalate to the decision owner if positions remain unchanged after one more round",
];

const PRIORITY_SUGGESTIONS: [&str; 3] = [
    "Re-run MoSCoW prioritisation for the disputed item with all stakeholders present",
    "Split the item into a must-have core and a deferrable extension",
    "Tie the priority to an explicit, measurable launch criterion",
];

const SCOPE_SUGGESTIONS: [&str; 3] = [
    "Agree on a shared definition of done before comparing estimates",
    "Break the work into phases and estimate each phase separately",
    "Adopt the conservative target for planning and track the variance explicitly",
];

const AUTO_RESOLUTION: &str =
    "Auto-resolved: minor scope difference, adopt the more conservative target and revisit at the next milestone";

/// Canned suggestions for a conflict type (none for semantic conflicts)
pub fn suggestions_for(conflict_type: ConflictType) -> &'static [&'static str] {
    match conflict_type {
        ConflictType::Direct => &DIRECT_SUGGESTIONS,
        ConflictType::Priority => &PRIORITY_SUGGESTIONS,
        ConflictType::Scope => &SCOPE_SUGGESTIONS,
        ConflictType::Semantic => &[],
    }
}

/// Attaches suggestions and auto-resolves low-risk conflicts
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    pub fn new() -> Self {
        Self
    }

    /// Annotate every conflict in place
    pub fn resolve_all(&self, conflicts: &mut [Conflict]) {
        for conflict in conflicts.iter_mut() {
            self.resolve(conflict);
        }
    }

    /// Annotate one conflict
    pub fn resolve(&self, conflict: &mut Conflict) {
        let suggestions = suggestions_for(conflict.conflict_type);
        conflict.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        conflict.suggested_resolution = suggestions.first().map(|s| s.to_string());

        if conflict.conflict_type == ConflictType::Direct
            && conflict.severity == ConflictSeverity::Critical
            && conflict.involves_veto_block()
        {
            conflict.suggested_resolution = Some(veto_message(conflict));
        }

        if conflict.conflict_type == ConflictType::Scope
            && conflict.severity == ConflictSeverity::Minor
        {
            conflict.resolve(AUTO_RESOLUTION);
        }
    }

    /// Consume a list and return it annotated
    pub fn process(&self, mut conflicts: Vec<Conflict>) -> Vec<Conflict> {
        self.resolve_all(&mut conflicts);
        conflicts
    }
}

/// Conflicts still waiting for a decision
pub fn unresolved(conflicts: &[Conflict]) -> impl Iterator<Item = &Conflict> {
    conflicts.iter().filter(|c| !c.resolved)
}

fn veto_message(conflict: &Conflict) -> String {
    let holders: Vec<String> = conflict
        .perspectives
        .iter()
        .filter(|p| p.is_veto_block())
        .map(|p| match &p.participant.veto_criteria {
            Some(criteria) => format!("{} ({})", p.name(), criteria),
            None => p.name().to_string(),
        })
        .collect();
    format!(
        "Veto exercised by {}: the veto criteria must be satisfied or formally waived before the proposal can proceed",
        holders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;
    use crate::perspective::{Perspective, Position};

    fn perspective(name: &str, position: Position) -> Perspective {
        Perspective::new(Participant::new(name, "Engineer"), position, "")
    }

    #[test]
    fn test_direct_gets_three_suggestions() {
        let mut conflict = Conflict::new(ConflictType::Direct, ConflictSeverity::Major, "d")
            .with_perspectives([&perspective("A", Position::Approve)]);
        ConflictResolver::new().resolve(&mut conflict);
        assert_eq!(conflict.suggestions.len(), 3);
        assert_eq!(
            conflict.suggested_resolution.as_deref(),
            Some(DIRECT_SUGGESTIONS[0])
        );
        assert!(!conflict.resolved);
    }

    #[test]
    fn test_semantic_has_no_suggestion() {
        let mut conflict = Conflict::new(ConflictType::Semantic, ConflictSeverity::Major, "s");
        ConflictResolver::new().resolve(&mut conflict);
        assert!(conflict.suggestions.is_empty());
        assert!(conflict.suggested_resolution.is_none());
        assert!(!conflict.resolved);
    }

    #[test]
    fn test_veto_override() {
        let sam = Participant::new("Sam", "Security").with_veto("No plaintext secrets");
        let blocker = Perspective::new(sam, Position::Block, "");
        let mut conflict = Conflict::new(ConflictType::Direct, ConflictSeverity::Critical, "v")
            .with_perspectives([&blocker]);
        ConflictResolver::new().resolve(&mut conflict);
        let suggested = conflict.suggested_resolution.unwrap();
        assert!(suggested.starts_with("Veto exercised by Sam (No plaintext secrets)"));
        assert_eq!(conflict.suggestions.len(), 3);
    }

    #[test]
    fn test_minor_scope_is_auto_resolved() {
        let conflicts = vec![
            Conflict::new(ConflictType::Scope, ConflictSeverity::Minor, "coverage"),
            Conflict::new(ConflictType::Scope, ConflictSeverity::Major, "timeline"),
        ];
        let conflicts = ConflictResolver::new().process(conflicts);
        assert!(conflicts[0].resolved);
        assert_eq!(conflicts[0].resolution.as_deref(), Some(AUTO_RESOLUTION));
        assert!(!conflicts[1].resolved);
        assert_eq!(unresolved(&conflicts).count(), 1);
    }
}
