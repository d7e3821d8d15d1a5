//! Participant entity

use crate::core::string::contains_ci;
use serde::{Deserialize, Serialize};

/// A council participant (agent) as described by the external catalog
///
/// # Example
///
/// ```
/// use council_domain::Participant;
///
/// let security = Participant::new("Sam", "Security Architect")
///     .with_expertise(["security", "threat modeling"])
///     .with_traits(["analytical", "skeptical"])
///     .with_veto("Blocks anything that stores plaintext credentials");
///
/// assert!(security.has_veto);
/// assert!(security.is_expert_in("Security"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub role: String,
    /// Ordered expertise tags
    #[serde(default)]
    pub expertise: Vec<String>,
    /// Ordered personality traits
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub has_veto: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veto_criteria: Option<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            expertise: Vec::new(),
            traits: Vec::new(),
            has_veto: false,
            veto_criteria: None,
        }
    }

    pub fn with_expertise<I, S>(mut self, expertise: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise = expertise.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    /// Grant veto power with the criteria under which it is exercised
    pub fn with_veto(mut self, criteria: impl Into<String>) -> Self {
        self.has_veto = true;
        self.veto_criteria = Some(criteria.into());
        self
    }

    /// Grant veto power without stated criteria
    pub fn with_veto_power(mut self) -> Self {
        self.has_veto = true;
        self
    }

    /// Whether any expertise tag or the role mentions `domain` (case-insensitive)
    pub fn is_expert_in(&self, domain: &str) -> bool {
        let domain = domain.trim();
        if domain.is_empty() {
            return false;
        }
        self.expertise.iter().any(|tag| contains_ci(tag, domain)) || contains_ci(&self.role, domain)
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expert_matches_role_or_tag() {
        let p = Participant::new("Riley", "Database Administrator").with_expertise(["postgres"]);
        assert!(p.is_expert_in("database"));
        assert!(p.is_expert_in("Postgres"));
        assert!(!p.is_expert_in("frontend"));
        assert!(!p.is_expert_in("  "));
    }

    #[test]
    fn test_is_named_ignores_case() {
        let p = Participant::new("Ana", "QA");
        assert!(p.is_named("ana"));
        assert!(p.is_named(" ANA "));
        assert!(!p.is_named("anna"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let p: Participant =
            serde_json::from_str(r#"{"name":"Kai","role":"Engineer"}"#).unwrap();
        assert!(p.expertise.is_empty());
        assert!(!p.has_veto);
        assert!(p.veto_criteria.is_none());
    }
}
