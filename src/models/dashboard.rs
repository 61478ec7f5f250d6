use serde::{Deserialize, Serialize};

use super::{
    Employee, LearningItemWithCourse, LearningProgress, PolicySummary, RecommendedPerson, Role,
    Task, TaskProgress, TaskTimeline,
};

/// Everything the dashboard page shows for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub employee: Employee,
    pub role: Role,
    pub stats: QuickStats,
    pub checklist: ChecklistWidget,
    pub policies: Vec<PolicySummary>,
    pub people: Vec<RecommendedPerson>,
    pub learning: LearningWidget,
    pub example_prompts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub tasks: TaskProgress,
    pub learning: LearningProgress,
    pub people_to_meet: usize,
    /// Weighted blend of task and learning completion.
    pub overall_progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistWidget {
    pub timeline: TaskTimeline,
    /// Tasks in the timeline; `tasks` holds only the first few.
    pub total_tasks: usize,
    pub tasks: Vec<Task>,
    pub completed_task_ids: Vec<String>,
    pub next_task: Option<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningWidget {
    pub courses: Vec<LearningItemWithCourse>,
    pub progress: LearningProgress,
}
