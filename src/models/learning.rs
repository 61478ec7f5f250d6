use serde::{Deserialize, Serialize};

/// A training course from the learning catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub provider: CourseProvider,
    /// Length in minutes.
    pub duration: u32,
    pub format: CourseFormat,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CourseProvider {
    Internal,
    #[serde(rename = "LinkedIn Learning")]
    LinkedInLearning,
    Coursera,
    #[serde(rename = "SHRM")]
    Shrm,
    Reforge,
}

impl CourseProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::LinkedInLearning => "LinkedIn Learning",
            Self::Coursera => "Coursera",
            Self::Shrm => "SHRM",
            Self::Reforge => "Reforge",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CourseFormat {
    Video,
    Interactive,
    Reading,
    Workshop,
}

/// One entry of a role's learning path as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    pub course_id: String,
    /// Free-text deadline such as "Day 7" or "Week 2".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub reason: String,
}

/// Stored learning path for one role, before hydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathRecord {
    pub role_id: String,
    pub required: Vec<LearningItem>,
    pub recommended: Vec<LearningItem>,
}

/// A learning item joined with its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItemWithCourse {
    #[serde(flatten)]
    pub item: LearningItem,
    pub course: Course,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub role_id: String,
    pub required: Vec<LearningItemWithCourse>,
    pub recommended: Vec<LearningItemWithCourse>,
}

impl LearningPath {
    /// Required items followed by recommended ones.
    pub fn all(&self) -> impl Iterator<Item = &LearningItemWithCourse> {
        self.required.iter().chain(self.recommended.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub total_courses: usize,
    /// Number of completed IDs supplied by the caller.
    pub completed_courses: usize,
    pub percentage: u32,
    pub required_completed: usize,
    pub required_total: usize,
}
