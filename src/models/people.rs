use serde::{Deserialize, Serialize};

/// An entry in the people directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub title: String,
    pub role: String,
    pub department: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub bio: String,
    pub expertise: Vec<String>,
    pub start_date: String,
    pub location: String,
    pub timezone: String,
}

/// How a recommended person relates to the new hire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    Manager,
    Buddy,
    Peer,
    CrossFunctional,
    Mentor,
}

/// When the new hire should reach out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestedTiming {
    #[serde(rename = "week-1")]
    Week1,
    #[serde(rename = "week-2")]
    Week2,
    #[serde(rename = "month-1")]
    Month1,
    Flexible,
}

impl SuggestedTiming {
    pub const ALL: [SuggestedTiming; 4] = [Self::Week1, Self::Week2, Self::Month1, Self::Flexible];
}

/// A per-role rule pointing at a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRule {
    pub person_id: String,
    pub relationship: Relationship,
    /// Lower numbers are more important.
    pub priority: u32,
    pub reason: String,
    pub suggested_timing: SuggestedTiming,
}

/// All recommendation rules for one role, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecommendations {
    pub for_role: String,
    pub recommended_people: Vec<RecommendationRule>,
}

/// A recommendation rule joined with its person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedPerson {
    pub person: Person,
    pub relationship: Relationship,
    pub priority: u32,
    pub reason: String,
    pub suggested_timing: SuggestedTiming,
}
