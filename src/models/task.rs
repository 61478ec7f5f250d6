use serde::{Deserialize, Serialize};

/// A single onboarding checklist item for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub timeline: TaskTimeline,
    /// Estimated effort in minutes.
    pub estimated_time: u32,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<TaskLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// What kind of work a task is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    Admin,
    Technical,
    Social,
    Learning,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [Self::Admin, Self::Technical, Self::Social, Self::Learning];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Technical => "technical",
            Self::Social => "social",
            Self::Learning => "learning",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Onboarding phase a task belongs to.
///
/// Variants are declared in chronological order, so `Ord` follows the
/// onboarding timeline: `day-1 < week-1 < week-2 < month-1 < month-2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskTimeline {
    #[serde(rename = "day-1")]
    Day1,
    #[serde(rename = "week-1")]
    Week1,
    #[serde(rename = "week-2")]
    Week2,
    #[serde(rename = "month-1")]
    Month1,
    #[serde(rename = "month-2")]
    Month2,
}

impl TaskTimeline {
    pub const ALL: [TaskTimeline; 5] = [
        Self::Day1,
        Self::Week1,
        Self::Week2,
        Self::Month1,
        Self::Month2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "day-1",
            Self::Week1 => "week-1",
            Self::Week2 => "week-2",
            Self::Month1 => "month-1",
            Self::Month2 => "month-2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Completion summary over a role's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    pub total: usize,
    /// Number of completed IDs supplied by the caller.
    pub completed: usize,
    pub percentage: u32,
    pub required_completed: usize,
    pub required_total: usize,
}

/// Onboarding phase derived from days since start. `Complete` once past month two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingPhase {
    #[serde(rename = "day-1")]
    Day1,
    #[serde(rename = "week-1")]
    Week1,
    #[serde(rename = "week-2")]
    Week2,
    #[serde(rename = "month-1")]
    Month1,
    #[serde(rename = "month-2")]
    Month2,
    Complete,
}

impl OnboardingPhase {
    /// Phase for an employee `days` after their start date.
    pub fn from_days(days: i64) -> Self {
        match days {
            1 => Self::Day1,
            d if d <= 7 => Self::Week1,
            d if d <= 14 => Self::Week2,
            d if d <= 30 => Self::Month1,
            d if d <= 60 => Self::Month2,
            _ => Self::Complete,
        }
    }

    /// The task bucket matching this phase, if onboarding is still running.
    pub fn timeline(&self) -> Option<TaskTimeline> {
        match self {
            Self::Day1 => Some(TaskTimeline::Day1),
            Self::Week1 => Some(TaskTimeline::Week1),
            Self::Week2 => Some(TaskTimeline::Week2),
            Self::Month1 => Some(TaskTimeline::Month1),
            Self::Month2 => Some(TaskTimeline::Month2),
            Self::Complete => None,
        }
    }
}
