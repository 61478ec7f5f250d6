use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::{contains_ci, Store};
use crate::models::*;

/// Trigger phrases per policy, in priority order for tie-breaking.
///
/// A question scores one point per phrase it contains (case-insensitive
/// substring). The first policy to reach the highest score wins.
pub const POLICY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "remote-work-policy",
        &[
            "remote",
            "work from home",
            "wfh",
            "home office",
            "equipment",
            "stipend",
            "remote work",
        ],
    ),
    (
        "expense-policy",
        &["expense", "reimbursement", "conference", "travel", "meal", "receipt"],
    ),
    (
        "pto-policy",
        &["pto", "vacation", "time off", "holiday", "sick", "leave"],
    ),
    (
        "security-data-handling",
        &["security", "data", "pii", "password", "access", "privacy"],
    ),
    (
        "benefits-overview",
        &["benefit", "insurance", "health", "401k", "retirement", "equity"],
    ),
];

/// Best-scoring policy for `question` and its keyword hit count.
/// Returns `None` when no keyword hits.
pub(crate) fn best_keyword_match(question: &str) -> Option<(&'static str, usize)> {
    let question = question.to_lowercase();
    let mut best: Option<(&'static str, usize)> = None;

    for (policy_id, keywords) in POLICY_KEYWORDS {
        let hits = keywords.iter().filter(|k| question.contains(*k)).count();
        if hits > best.map_or(0, |(_, h)| h) {
            best = Some((*policy_id, hits));
        }
    }

    best
}

impl Store {
    // ============================================================
    // Policy operations
    // ============================================================

    pub fn get_all_policies(&self) -> &[Policy] {
        &self.data.policies
    }

    pub fn get_policy(&self, id: &str) -> Option<&Policy> {
        self.data.policies.iter().find(|p| p.id == id)
    }

    pub fn get_policies_by_category(&self, category: PolicyCategory) -> Vec<&Policy> {
        self.data
            .policies
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Universal policies plus those naming `role_id`.
    pub fn get_policies_by_role(&self, role_id: &str) -> Vec<&Policy> {
        self.data
            .policies
            .iter()
            .filter(|p| p.applies_to_role(role_id))
            .collect()
    }

    /// Sections of a policy visible to a role. With no role, all sections.
    /// Unknown policies have no sections.
    pub fn get_policy_sections_for_role(
        &self,
        policy_id: &str,
        role_id: Option<&str>,
    ) -> Vec<PolicySection> {
        let Some(policy) = self.get_policy(policy_id) else {
            return Vec::new();
        };

        match role_id {
            None => policy.sections.clone(),
            Some(role_id) => policy
                .sections
                .iter()
                .filter(|s| s.applies_to_role(role_id))
                .cloned()
                .collect(),
        }
    }

    fn policies_for(&self, role_id: Option<&str>) -> Vec<&Policy> {
        self.data
            .policies
            .iter()
            .filter(|p| role_id.map_or(true, |r| p.applies_to_role(r)))
            .collect()
    }

    /// Policies whose name, summary, or any section title or content contains `query`.
    pub fn search_policies(&self, query: &str, role_id: Option<&str>) -> Vec<&Policy> {
        let query = query.to_lowercase();
        self.policies_for(role_id)
            .into_iter()
            .filter(|p| {
                contains_ci(&p.name, &query)
                    || contains_ci(&p.summary, &query)
                    || p.sections.iter().any(|s| {
                        contains_ci(&s.title, &query) || contains_ci(&s.content, &query)
                    })
            })
            .collect()
    }

    /// Sections carrying a tag that contains `tag`, grouped by policy.
    pub fn search_policy_sections_by_tag(
        &self,
        tag: &str,
        role_id: Option<&str>,
    ) -> Vec<PolicyMatch> {
        let tag = tag.to_lowercase();
        self.policies_for(role_id)
            .into_iter()
            .filter_map(|p| {
                let sections: Vec<PolicySection> = p
                    .sections
                    .iter()
                    .filter(|s| s.tags.iter().any(|t| contains_ci(t, &tag)))
                    .cloned()
                    .collect();
                (!sections.is_empty()).then(|| PolicyMatch {
                    policy: p.clone(),
                    sections,
                })
            })
            .collect()
    }

    /// Sections that apply in `location`, grouped by policy. Policies with
    /// no applicable section are left out.
    pub fn get_policies_by_location(&self, location: &str) -> Vec<PolicyMatch> {
        self.data
            .policies
            .iter()
            .filter_map(|p| {
                let sections: Vec<PolicySection> = p
                    .sections
                    .iter()
                    .filter(|s| s.applies_to_location(location))
                    .cloned()
                    .collect();
                (!sections.is_empty()).then(|| PolicyMatch {
                    policy: p.clone(),
                    sections,
                })
            })
            .collect()
    }

    /// Policies updated within `threshold_days` of `now`.
    pub fn get_recently_updated_policies(
        &self,
        threshold_days: i64,
        now: DateTime<Utc>,
    ) -> Vec<&Policy> {
        let threshold = now - Duration::days(threshold_days);
        self.data
            .policies
            .iter()
            .filter(|p| {
                p.last_updated
                    .and_hms_opt(0, 0, 0)
                    .is_some_and(|d| d.and_utc() >= threshold)
            })
            .collect()
    }

    pub fn get_policy_summary_for_role(&self, role_id: &str) -> Vec<PolicySummary> {
        self.get_policies_by_role(role_id)
            .into_iter()
            .map(PolicySummary::from)
            .collect()
    }

    /// Number of policies per category. Categories without policies are absent.
    pub fn get_policy_count_by_category(&self) -> BTreeMap<PolicyCategory, usize> {
        let mut counts = BTreeMap::new();
        for policy in &self.data.policies {
            *counts.entry(policy.category).or_default() += 1;
        }
        counts
    }

    // ============================================================
    // Question matching
    // ============================================================

    /// Match a free-text question to a policy using the keyword table.
    ///
    /// Returns the winning policy, its sections visible to `role_id`, and a
    /// confidence derived from the number of keyword hits.
    pub fn answer_policy_question(&self, question: &str, role_id: &str) -> PolicyAnswer {
        let Some((policy_id, hits)) = best_keyword_match(question) else {
            tracing::debug!(question, "No policy keywords matched");
            return PolicyAnswer::no_match();
        };

        let Some(policy) = self.get_policy(policy_id) else {
            tracing::warn!(policy_id, "Keyword table names a policy missing from the dataset");
            return PolicyAnswer::no_match();
        };

        tracing::debug!(policy_id, hits, role_id, "Matched policy question");

        PolicyAnswer {
            policy: Some(policy.clone()),
            sections: self.get_policy_sections_for_role(policy_id, Some(role_id)),
            confidence: Confidence::from_hits(hits),
        }
    }

    /// First role-visible section of the matched policy.
    pub fn get_most_relevant_section(&self, question: &str, role_id: &str) -> Option<PolicySection> {
        let answer = self.answer_policy_question(question, role_id);
        if answer.policy.is_none() {
            return None;
        }
        answer.sections.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_means_no_match() {
        assert_eq!(best_keyword_match("xyz completely unrelated gibberish"), None);
        assert_eq!(best_keyword_match(""), None);
    }

    #[test]
    fn counts_every_distinct_keyword_hit() {
        assert_eq!(
            best_keyword_match("What's the remote work policy?"),
            Some(("remote-work-policy", 2))
        );
        assert_eq!(
            best_keyword_match("How do I expense a conference?"),
            Some(("expense-policy", 2))
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(best_keyword_match("PTO"), Some(("pto-policy", 1)));
        assert_eq!(best_keyword_match("My 401K"), Some(("benefits-overview", 1)));
    }

    #[test]
    fn ties_go_to_the_earlier_policy() {
        // one hit each for expense ("travel") and pto ("vacation")
        assert_eq!(
            best_keyword_match("vacation travel"),
            Some(("expense-policy", 1))
        );
        // one hit each for remote-work ("stipend") and benefits ("health")
        assert_eq!(
            best_keyword_match("health stipend"),
            Some(("remote-work-policy", 1))
        );
        // "remote work" counts on top of "remote", so remote-work ties
        // security ("security", "data") at two and wins as the earlier policy
        assert_eq!(
            best_keyword_match("remote work data security"),
            Some(("remote-work-policy", 2))
        );
    }

    #[test]
    fn a_later_policy_wins_only_with_strictly_more_hits() {
        // security: "security", "password", "access" vs remote: "remote"
        assert_eq!(
            best_keyword_match("remote security password access"),
            Some(("security-data-handling", 3))
        );
    }
}
