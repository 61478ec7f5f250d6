//! Plain-text rendering of checklists and progress for the CLI.

use std::collections::BTreeMap;

use crate::models::{QuickStats, Subtask, Task, TaskTimeline};

const DONE: char = '●';
const REQUIRED: char = '○';
const OPTIONAL: char = '◇';
const SUBTASK_DONE: char = '✓';
const SUBTASK_OPEN: char = '·';

fn task_symbol(task: &Task, completed: &[String]) -> char {
    if completed.contains(&task.id) {
        DONE
    } else if task.required {
        REQUIRED
    } else {
        OPTIONAL
    }
}

fn subtask_symbol(subtask: &Subtask) -> char {
    if subtask.completed {
        SUBTASK_DONE
    } else {
        SUBTASK_OPEN
    }
}

pub fn timeline_label(timeline: TaskTimeline) -> &'static str {
    match timeline {
        TaskTimeline::Day1 => "Day 1",
        TaskTimeline::Week1 => "Week 1",
        TaskTimeline::Week2 => "Week 2",
        TaskTimeline::Month1 => "Month 1",
        TaskTimeline::Month2 => "Month 2",
    }
}

/// Render tasks grouped by timeline as an ASCII tree. Empty buckets are skipped.
///
/// Example output:
/// ```text
/// Week 1 (1/3)
/// ├── ● Complete security training
/// ├── ○ Set up development environment
/// │   ├── ✓ Install toolchain
/// │   └── · Clone the monorepo
/// └── ◇ Read the engineering handbook
/// ```
pub fn render_checklist(grouped: &BTreeMap<TaskTimeline, Vec<Task>>, completed: &[String]) -> String {
    let mut output = String::new();
    for (timeline, tasks) in grouped {
        if tasks.is_empty() {
            continue;
        }
        let done = tasks.iter().filter(|t| completed.contains(&t.id)).count();
        output.push_str(&format!(
            "{} ({}/{})\n",
            timeline_label(*timeline),
            done,
            tasks.len()
        ));

        for (i, task) in tasks.iter().enumerate() {
            let is_last = i == tasks.len() - 1;
            render_task(&mut output, task, completed, is_last);
        }
    }
    output
}

fn render_task(output: &mut String, task: &Task, completed: &[String], is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push(task_symbol(task, completed));
    output.push(' ');
    output.push_str(&task.title);
    output.push('\n');

    let Some(subtasks) = &task.subtasks else {
        return;
    };
    let prefix = if is_last { "    " } else { "│   " };
    for (i, subtask) in subtasks.iter().enumerate() {
        let branch = if i == subtasks.len() - 1 { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push(subtask_symbol(subtask));
        output.push(' ');
        output.push_str(&subtask.title);
        output.push('\n');
    }
}

/// One-line-per-metric progress summary.
pub fn render_stats(stats: &QuickStats) -> String {
    format!(
        "Tasks:    {}/{} ({}%), required {}/{}\n\
         Learning: {}/{} ({}%), required {}/{}\n\
         People:   {} to meet\n\
         Overall:  {}%\n",
        stats.tasks.completed,
        stats.tasks.total,
        stats.tasks.percentage,
        stats.tasks.required_completed,
        stats.tasks.required_total,
        stats.learning.completed_courses,
        stats.learning.total_courses,
        stats.learning.percentage,
        stats.learning.required_completed,
        stats.learning.required_total,
        stats.people_to_meet,
        stats.overall_progress,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskCategory;

    fn make_task(id: &str, title: &str, required: bool, subtasks: Option<Vec<Subtask>>) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: TaskCategory::Admin,
            timeline: TaskTimeline::Week1,
            estimated_time: 30,
            required,
            links: None,
            subtasks,
        }
    }

    fn subtask(title: &str, completed: bool) -> Subtask {
        Subtask {
            id: title.to_lowercase(),
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn test_empty_buckets_are_skipped() {
        let mut grouped = BTreeMap::new();
        grouped.insert(TaskTimeline::Day1, vec![]);
        assert_eq!(render_checklist(&grouped, &[]), "");
    }

    #[test]
    fn test_symbols_follow_completion_and_required() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            TaskTimeline::Week1,
            vec![
                make_task("a", "Security training", true, None),
                make_task("b", "Dev environment", true, None),
                make_task("c", "Handbook", false, None),
            ],
        );
        let output = render_checklist(&grouped, &["a".to_string()]);
        assert_eq!(
            output,
            "Week 1 (1/3)\n├── ● Security training\n├── ○ Dev environment\n└── ◇ Handbook\n"
        );
    }

    #[test]
    fn test_subtasks_nest_under_their_task() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            TaskTimeline::Day1,
            vec![
                make_task(
                    "a",
                    "Laptop",
                    true,
                    Some(vec![subtask("Unbox", true), subtask("Enroll", false)]),
                ),
                make_task("b", "Badge", true, Some(vec![subtask("Photo", false)])),
            ],
        );
        let output = render_checklist(&grouped, &[]);
        let expected = concat!(
            "Day 1 (0/2)\n",
            "├── ○ Laptop\n",
            "│   ├── ✓ Unbox\n",
            "│   └── · Enroll\n",
            "└── ○ Badge\n",
            "    └── · Photo\n",
        );
        assert_eq!(output, expected);
    }
}
