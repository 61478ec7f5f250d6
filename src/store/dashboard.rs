use super::Store;
use crate::models::*;

/// The checklist widget always shows the first week.
pub const CHECKLIST_TIMELINE: TaskTimeline = TaskTimeline::Week1;
/// The checklist widget lists at most this many of those tasks.
pub const CHECKLIST_WIDGET_TASKS: usize = 5;
/// The policy widget previews this many of the role's policies.
pub const POLICY_WIDGET_POLICIES: usize = 4;
/// The people widget lists recommendations up to this priority.
pub const PEOPLE_WIDGET_MAX_PRIORITY: u32 = 4;
/// The learning widget previews this many required courses.
pub const LEARNING_WIDGET_COURSES: usize = 3;

const SOFTWARE_ENGINEER_PROMPTS: &[&str] = &[
    "What's the remote work policy for engineers?",
    "How do I expense a conference?",
    "What security training do I need to complete?",
    "Can I work from anywhere in the US?",
];

const PRODUCT_MANAGER_PROMPTS: &[&str] = &[
    "What's the remote work policy for PMs?",
    "How do I request PTO?",
    "What are the required training courses?",
    "What benefits does Airbnb offer?",
];

const HR_COORDINATOR_PROMPTS: &[&str] = &[
    "What's the remote work policy?",
    "How do I handle employee PTO requests?",
    "What GDPR training do I need?",
    "What are Airbnb's benefits?",
];

/// Suggested chat questions for a role. Unknown roles get the engineering set.
pub fn example_prompts(role_id: &str) -> &'static [&'static str] {
    match role_id {
        "product-manager" => PRODUCT_MANAGER_PROMPTS,
        "hr-coordinator" => HR_COORDINATOR_PROMPTS,
        _ => SOFTWARE_ENGINEER_PROMPTS,
    }
}

impl Store {
    // ============================================================
    // Dashboard assembly
    // ============================================================

    /// Headline numbers for the stats row.
    ///
    /// Overall progress weighs tasks and learning at 40% each and gives a flat
    /// 20 points (at 20% weight) when the role has anyone to meet.
    pub fn get_quick_stats(
        &self,
        role_id: &str,
        completed_task_ids: &[String],
        completed_course_ids: &[String],
    ) -> QuickStats {
        let tasks = self.calculate_progress(role_id, completed_task_ids);
        let learning = self.calculate_learning_progress(role_id, completed_course_ids);
        let people_to_meet = self.get_recommended_people(role_id).len();

        let people_points = if people_to_meet > 0 { 20.0 } else { 0.0 };
        let overall = f64::from(tasks.percentage) * 0.4
            + f64::from(learning.percentage) * 0.4
            + people_points * 0.2;

        QuickStats {
            tasks,
            learning,
            people_to_meet,
            overall_progress: overall.round() as u32,
        }
    }

    /// Everything the dashboard renders for `role_id`.
    ///
    /// Returns `None` when the role is unknown or no employee holds it.
    pub fn get_dashboard(
        &self,
        role_id: &str,
        completed_task_ids: &[String],
        completed_course_ids: &[String],
    ) -> Option<Dashboard> {
        let role = self.get_role(role_id)?;
        let employee = self.get_employee_by_role(role_id)?;

        let timeline_tasks = self.get_tasks_by_timeline(role_id, CHECKLIST_TIMELINE);
        let checklist = ChecklistWidget {
            timeline: CHECKLIST_TIMELINE,
            total_tasks: timeline_tasks.len(),
            tasks: timeline_tasks
                .into_iter()
                .take(CHECKLIST_WIDGET_TASKS)
                .cloned()
                .collect(),
            completed_task_ids: completed_task_ids.to_vec(),
            next_task: self
                .get_next_task(role_id, completed_task_ids, Some(CHECKLIST_TIMELINE))
                .cloned(),
        };

        let learning = LearningWidget {
            courses: self
                .get_required_courses(role_id)
                .into_iter()
                .take(LEARNING_WIDGET_COURSES)
                .collect(),
            progress: self.calculate_learning_progress(role_id, completed_course_ids),
        };

        Some(Dashboard {
            employee: employee.clone(),
            role: role.clone(),
            stats: self.get_quick_stats(role_id, completed_task_ids, completed_course_ids),
            checklist,
            policies: self
                .get_policy_summary_for_role(role_id)
                .into_iter()
                .take(POLICY_WIDGET_POLICIES)
                .collect(),
            people: self.get_high_priority_people(role_id, PEOPLE_WIDGET_MAX_PRIORITY),
            learning,
            example_prompts: example_prompts(role_id)
                .iter()
                .map(|p| p.to_string())
                .collect(),
        })
    }
}
