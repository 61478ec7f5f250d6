use std::collections::BTreeMap;

use super::{contains_ci, Store};
use crate::models::*;

impl Store {
    // ============================================================
    // People directory operations
    // ============================================================

    pub fn get_all_people(&self) -> &[Person] {
        &self.data.people
    }

    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.data.people.iter().find(|p| p.id == id)
    }

    pub fn get_people_by_department(&self, department: &str) -> Vec<&Person> {
        self.filter_people(|p| p.department == department)
    }

    pub fn get_people_by_team(&self, team: &str) -> Vec<&Person> {
        self.filter_people(|p| p.team == team)
    }

    /// People whose role title equals `role`.
    pub fn get_people_by_role(&self, role: &str) -> Vec<&Person> {
        self.filter_people(|p| p.role == role)
    }

    pub fn get_people_in_location(&self, location: &str) -> Vec<&Person> {
        self.filter_people(|p| p.location == location)
    }

    pub fn get_people_in_timezone(&self, timezone: &str) -> Vec<&Person> {
        self.filter_people(|p| p.timezone == timezone)
    }

    pub fn search_people_by_name(&self, query: &str) -> Vec<&Person> {
        let query = query.to_lowercase();
        self.filter_people(|p| contains_ci(&p.name, &query))
    }

    pub fn search_people_by_expertise(&self, expertise: &str) -> Vec<&Person> {
        let expertise = expertise.to_lowercase();
        self.filter_people(|p| p.expertise.iter().any(|e| contains_ci(e, &expertise)))
    }

    fn filter_people(&self, predicate: impl Fn(&Person) -> bool) -> Vec<&Person> {
        self.data.people.iter().filter(|&p| predicate(p)).collect()
    }

    // ============================================================
    // Recommendations
    // ============================================================

    /// People the role should meet, ordered by priority (stable for ties).
    pub fn get_recommended_people(&self, role_id: &str) -> Vec<RecommendedPerson> {
        let Some(entry) = self
            .data
            .recommendations
            .iter()
            .find(|r| r.for_role == role_id)
        else {
            return Vec::new();
        };

        let mut people: Vec<RecommendedPerson> = entry
            .recommended_people
            .iter()
            .filter_map(|rule| {
                let person = self.get_person(&rule.person_id)?;
                Some(RecommendedPerson {
                    person: person.clone(),
                    relationship: rule.relationship,
                    priority: rule.priority,
                    reason: rule.reason.clone(),
                    suggested_timing: rule.suggested_timing,
                })
            })
            .collect();

        people.sort_by_key(|p| p.priority);
        people
    }

    pub fn get_recommended_people_by_timing(
        &self,
        role_id: &str,
        timing: SuggestedTiming,
    ) -> Vec<RecommendedPerson> {
        self.filter_recommended(role_id, |r| r.suggested_timing == timing)
    }

    pub fn get_recommended_people_by_relationship(
        &self,
        role_id: &str,
        relationship: Relationship,
    ) -> Vec<RecommendedPerson> {
        self.filter_recommended(role_id, |r| r.relationship == relationship)
    }

    /// Recommendations with `priority <= max_priority`.
    pub fn get_high_priority_people(
        &self,
        role_id: &str,
        max_priority: u32,
    ) -> Vec<RecommendedPerson> {
        self.filter_recommended(role_id, |r| r.priority <= max_priority)
    }

    pub fn get_manager_recommendation(&self, role_id: &str) -> Option<RecommendedPerson> {
        self.get_recommended_people_by_relationship(role_id, Relationship::Manager)
            .into_iter()
            .next()
    }

    pub fn get_buddy_recommendation(&self, role_id: &str) -> Option<RecommendedPerson> {
        self.get_recommended_people_by_relationship(role_id, Relationship::Buddy)
            .into_iter()
            .next()
    }

    pub fn get_peer_recommendations(&self, role_id: &str) -> Vec<RecommendedPerson> {
        self.get_recommended_people_by_relationship(role_id, Relationship::Peer)
    }

    pub fn get_cross_functional_recommendations(&self, role_id: &str) -> Vec<RecommendedPerson> {
        self.get_recommended_people_by_relationship(role_id, Relationship::CrossFunctional)
    }

    /// How many recommendations fall in each timing bucket. All buckets are present.
    pub fn get_recommendation_counts_by_timing(
        &self,
        role_id: &str,
    ) -> BTreeMap<SuggestedTiming, usize> {
        let mut counts: BTreeMap<SuggestedTiming, usize> =
            SuggestedTiming::ALL.into_iter().map(|t| (t, 0)).collect();
        for rec in self.get_recommended_people(role_id) {
            *counts.entry(rec.suggested_timing).or_default() += 1;
        }
        counts
    }

    fn filter_recommended(
        &self,
        role_id: &str,
        predicate: impl Fn(&RecommendedPerson) -> bool,
    ) -> Vec<RecommendedPerson> {
        self.get_recommended_people(role_id)
            .into_iter()
            .filter(|r| predicate(r))
            .collect()
    }
}
