use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An HR policy with ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub category: PolicyCategory,
    pub summary: String,
    /// Roles this policy applies to. Empty means every role.
    pub applicable_roles: Vec<String>,
    pub last_updated: NaiveDate,
    pub sections: Vec<PolicySection>,
}

impl Policy {
    pub fn applies_to_role(&self, role_id: &str) -> bool {
        applies(Some(&self.applicable_roles), role_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_locations: Option<Vec<String>>,
    pub tags: Vec<String>,
}

impl PolicySection {
    pub fn applies_to_role(&self, role_id: &str) -> bool {
        applies(self.applicable_roles.as_ref(), role_id)
    }

    pub fn applies_to_location(&self, location: &str) -> bool {
        applies(self.applicable_locations.as_ref(), location)
    }
}

/// An absent or empty applicability list matches everything.
fn applies(list: Option<&Vec<String>>, value: &str) -> bool {
    match list {
        None => true,
        Some(values) => values.is_empty() || values.iter().any(|v| v == value),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyCategory {
    Pto,
    Expense,
    RemoteWork,
    Security,
    Benefits,
    Conduct,
}

impl PolicyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pto => "pto",
            Self::Expense => "expense",
            Self::RemoteWork => "remote-work",
            Self::Security => "security",
            Self::Benefits => "benefits",
            Self::Conduct => "conduct",
        }
    }
}

/// How strongly a question matched a policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// `high` from two keyword hits up, `medium` for one, `low` for none.
    pub fn from_hits(hits: usize) -> Self {
        match hits {
            0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Result of matching a free-text question against the policy keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAnswer {
    pub policy: Option<Policy>,
    /// Sections of `policy` that apply to the asking role.
    pub sections: Vec<PolicySection>,
    pub confidence: Confidence,
}

impl PolicyAnswer {
    pub fn no_match() -> Self {
        Self {
            policy: None,
            sections: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}

/// A policy with only the sections that passed a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMatch {
    pub policy: Policy,
    pub sections: Vec<PolicySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    pub policy_id: String,
    pub name: String,
    pub category: PolicyCategory,
    pub summary: String,
}

impl From<&Policy> for PolicySummary {
    fn from(policy: &Policy) -> Self {
        Self {
            policy_id: policy.id.clone(),
            name: policy.name.clone(),
            category: policy.category,
            summary: policy.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(roles: Option<Vec<&str>>) -> PolicySection {
        PolicySection {
            id: "s".into(),
            title: "S".into(),
            content: "c".into(),
            applicable_roles: roles.map(|r| r.into_iter().map(String::from).collect()),
            applicable_locations: None,
            tags: vec![],
        }
    }

    #[test]
    fn missing_or_empty_role_list_applies_to_everyone() {
        assert!(section(None).applies_to_role("anyone"));
        assert!(section(Some(vec![])).applies_to_role("anyone"));
    }

    #[test]
    fn role_list_restricts_sections() {
        let s = section(Some(vec!["software-engineer"]));
        assert!(s.applies_to_role("software-engineer"));
        assert!(!s.applies_to_role("product-manager"));
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(Confidence::from_hits(0), Confidence::Low);
        assert_eq!(Confidence::from_hits(1), Confidence::Medium);
        assert_eq!(Confidence::from_hits(2), Confidence::High);
        assert_eq!(Confidence::from_hits(6), Confidence::High);
    }
}
