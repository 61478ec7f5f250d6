use super::{contains_ci, Store};
use crate::models::*;

impl Store {
    // ============================================================
    // Learning operations
    // ============================================================

    pub fn get_all_courses(&self) -> &[Course] {
        &self.data.courses
    }

    pub fn get_course(&self, id: &str) -> Option<&Course> {
        self.data.courses.iter().find(|c| c.id == id)
    }

    /// The role's learning path with every item joined to its course.
    pub fn get_learning_path(&self, role_id: &str) -> Option<LearningPath> {
        let record = self.data.learning_paths.get(role_id)?;
        Some(LearningPath {
            role_id: record.role_id.clone(),
            required: self.hydrate(&record.required),
            recommended: self.hydrate(&record.recommended),
        })
    }

    // Course references were checked at load, so nothing is dropped here.
    fn hydrate(&self, items: &[LearningItem]) -> Vec<LearningItemWithCourse> {
        items
            .iter()
            .filter_map(|item| {
                self.get_course(&item.course_id)
                    .map(|course| LearningItemWithCourse {
                        item: item.clone(),
                        course: course.clone(),
                    })
            })
            .collect()
    }

    pub fn get_required_courses(&self, role_id: &str) -> Vec<LearningItemWithCourse> {
        self.get_learning_path(role_id)
            .map(|p| p.required)
            .unwrap_or_default()
    }

    pub fn get_recommended_courses(&self, role_id: &str) -> Vec<LearningItemWithCourse> {
        self.get_learning_path(role_id)
            .map(|p| p.recommended)
            .unwrap_or_default()
    }

    /// Required then recommended items.
    pub fn get_all_courses_for_role(&self, role_id: &str) -> Vec<LearningItemWithCourse> {
        self.get_learning_path(role_id)
            .map(|p| p.all().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_courses_by_provider(&self, provider: CourseProvider) -> Vec<&Course> {
        self.data
            .courses
            .iter()
            .filter(|c| c.provider == provider)
            .collect()
    }

    pub fn get_courses_by_format(&self, format: CourseFormat) -> Vec<&Course> {
        self.data
            .courses
            .iter()
            .filter(|c| c.format == format)
            .collect()
    }

    /// Exact tag match.
    pub fn get_courses_by_tag(&self, tag: &str) -> Vec<&Course> {
        self.data
            .courses
            .iter()
            .filter(|c| c.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn search_courses(&self, query: &str) -> Vec<&Course> {
        let query = query.to_lowercase();
        self.data
            .courses
            .iter()
            .filter(|c| contains_ci(&c.title, &query) || contains_ci(&c.description, &query))
            .collect()
    }

    /// Minutes of required training for the role.
    pub fn get_total_required_time(&self, role_id: &str) -> u32 {
        self.get_required_courses(role_id)
            .iter()
            .map(|i| i.course.duration)
            .sum()
    }

    pub fn get_total_recommended_time(&self, role_id: &str) -> u32 {
        self.get_recommended_courses(role_id)
            .iter()
            .map(|i| i.course.duration)
            .sum()
    }

    /// Required items whose deadline is phrased in days or weeks.
    pub fn get_courses_with_upcoming_deadlines(&self, role_id: &str) -> Vec<LearningItemWithCourse> {
        self.get_required_courses(role_id)
            .into_iter()
            .filter(|i| {
                i.item.deadline.as_deref().is_some_and(|d| {
                    let d = d.to_lowercase();
                    d.contains("day") || d.contains("week")
                })
            })
            .collect()
    }

    pub fn calculate_learning_progress(
        &self,
        role_id: &str,
        completed_course_ids: &[String],
    ) -> LearningProgress {
        let all = self.get_all_courses_for_role(role_id);
        let required = self.get_required_courses(role_id);

        let total_courses = all.len();
        let completed_courses = completed_course_ids.len();

        LearningProgress {
            total_courses,
            completed_courses,
            percentage: percentage(completed_courses, total_courses),
            required_completed: required
                .iter()
                .filter(|i| completed_course_ids.contains(&i.course.id))
                .count(),
            required_total: required.len(),
        }
    }

    pub fn is_required_training_complete(
        &self,
        role_id: &str,
        completed_course_ids: &[String],
    ) -> bool {
        self.get_required_courses(role_id)
            .iter()
            .all(|i| completed_course_ids.contains(&i.course.id))
    }

    /// First incomplete required course, then first incomplete recommended one.
    pub fn get_next_course(
        &self,
        role_id: &str,
        completed_course_ids: &[String],
    ) -> Option<LearningItemWithCourse> {
        let path = self.get_learning_path(role_id)?;
        path.required
            .into_iter()
            .chain(path.recommended)
            .find(|i| !completed_course_ids.contains(&i.course.id))
    }
}
