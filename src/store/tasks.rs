use std::collections::BTreeMap;

use super::Store;
use crate::models::*;

impl Store {
    // ============================================================
    // Task operations
    // ============================================================

    /// The role's checklist in file order. Unknown roles have no tasks.
    pub fn get_tasks_by_role(&self, role_id: &str) -> &[Task] {
        self.data
            .tasks_by_role
            .get(role_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_tasks_by_timeline(&self, role_id: &str, timeline: TaskTimeline) -> Vec<&Task> {
        self.get_tasks_by_role(role_id)
            .iter()
            .filter(|t| t.timeline == timeline)
            .collect()
    }

    pub fn get_tasks_by_category(&self, role_id: &str, category: TaskCategory) -> Vec<&Task> {
        self.get_tasks_by_role(role_id)
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    pub fn get_required_tasks(&self, role_id: &str) -> Vec<&Task> {
        self.get_tasks_by_role(role_id)
            .iter()
            .filter(|t| t.required)
            .collect()
    }

    pub fn get_optional_tasks(&self, role_id: &str) -> Vec<&Task> {
        self.get_tasks_by_role(role_id)
            .iter()
            .filter(|t| !t.required)
            .collect()
    }

    pub fn get_task(&self, role_id: &str, task_id: &str) -> Option<&Task> {
        self.get_tasks_by_role(role_id)
            .iter()
            .find(|t| t.id == task_id)
    }

    /// Completion of the role's checklist given the caller's completed IDs.
    ///
    /// `completed` counts the supplied IDs as given; callers pass IDs drawn
    /// from the role's own task list.
    pub fn calculate_progress(&self, role_id: &str, completed_ids: &[String]) -> TaskProgress {
        let tasks = self.get_tasks_by_role(role_id);
        let required = self.get_required_tasks(role_id);

        let total = tasks.len();
        let completed = completed_ids.len();

        TaskProgress {
            total,
            completed,
            percentage: percentage(completed, total),
            required_completed: required
                .iter()
                .filter(|t| completed_ids.contains(&t.id))
                .count(),
            required_total: required.len(),
        }
    }

    /// The next task to work on: the first incomplete required task, falling
    /// back to the first incomplete optional task. `phase` narrows the search
    /// to one timeline bucket.
    pub fn get_next_task(
        &self,
        role_id: &str,
        completed_ids: &[String],
        phase: Option<TaskTimeline>,
    ) -> Option<&Task> {
        let candidates: Vec<&Task> = self
            .get_tasks_by_role(role_id)
            .iter()
            .filter(|t| phase.map_or(true, |p| t.timeline == p))
            .filter(|t| !completed_ids.contains(&t.id))
            .collect();

        candidates
            .iter()
            .find(|t| t.required)
            .or_else(|| candidates.iter().find(|t| !t.required))
            .copied()
    }

    /// Minutes of work left across incomplete tasks.
    pub fn get_estimated_time_remaining(&self, role_id: &str, completed_ids: &[String]) -> u32 {
        self.get_tasks_by_role(role_id)
            .iter()
            .filter(|t| !completed_ids.contains(&t.id))
            .map(|t| t.estimated_time)
            .sum()
    }

    /// Tasks bucketed by timeline. Every bucket is present, in timeline order.
    pub fn get_tasks_grouped_by_timeline(
        &self,
        role_id: &str,
    ) -> BTreeMap<TaskTimeline, Vec<Task>> {
        let mut grouped: BTreeMap<TaskTimeline, Vec<Task>> =
            TaskTimeline::ALL.into_iter().map(|t| (t, Vec::new())).collect();
        for task in self.get_tasks_by_role(role_id) {
            grouped.entry(task.timeline).or_default().push(task.clone());
        }
        grouped
    }

    /// Tasks bucketed by category. Every category is present.
    pub fn get_tasks_grouped_by_category(
        &self,
        role_id: &str,
    ) -> BTreeMap<TaskCategory, Vec<Task>> {
        let mut grouped: BTreeMap<TaskCategory, Vec<Task>> =
            TaskCategory::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        for task in self.get_tasks_by_role(role_id) {
            grouped.entry(task.category).or_default().push(task.clone());
        }
        grouped
    }

    /// Completion percentage per category; empty categories report 0.
    pub fn get_progress_by_category(
        &self,
        role_id: &str,
        completed_ids: &[String],
    ) -> BTreeMap<TaskCategory, u32> {
        self.get_tasks_grouped_by_category(role_id)
            .into_iter()
            .map(|(category, tasks)| {
                let done = tasks
                    .iter()
                    .filter(|t| completed_ids.contains(&t.id))
                    .count();
                (category, percentage(done, tasks.len()))
            })
            .collect()
    }

    pub fn are_required_tasks_complete(&self, role_id: &str, completed_ids: &[String]) -> bool {
        self.get_required_tasks(role_id)
            .iter()
            .all(|t| completed_ids.contains(&t.id))
    }
}
