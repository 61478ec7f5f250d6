use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::AppState;
use crate::models::*;
use crate::store::Store;

// ============================================================
// Error Handling
// ============================================================

/// An error rendered as `{"error": message}` with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub const MISSING_CHAT_FIELDS: &str = "Missing message or roleId";
pub const CHAT_UPSTREAM_FAILED: &str = "Failed to get response from Claude";
pub const NO_ROLE_SELECTED: &str = "No role selected";
pub const ROLE_NOT_FOUND: &str = "Role not found";

fn require_role(store: &Store, role_id: &str) -> Result<(), ApiError> {
    if store.role_exists(role_id) {
        Ok(())
    } else {
        Err(ApiError::not_found(ROLE_NOT_FOUND))
    }
}

/// Split a comma-separated ID list, dropping blanks.
fn id_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse an optional query value into one of the serde-named enums.
fn enum_param<T: DeserializeOwned>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map(Some)
        .map_err(|_| ApiError::bad_request(format!("Invalid {name}: {raw}")))
}

/// Items of `base` that also appear (by identity) in `other`.
fn intersect<'a, T>(base: Vec<&'a T>, other: &[&'a T]) -> Vec<&'a T> {
    base.into_iter()
        .filter(|b| other.iter().any(|o| std::ptr::eq(*b, *o)))
        .collect()
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|v| !v.trim().is_empty())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Chat
// ============================================================

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected chat body: {}", rejection);
            return Err(ApiError::bad_request(MISSING_CHAT_FIELDS));
        }
    };
    let Some((message, role_id)) = request.fields() else {
        return Err(ApiError::bad_request(MISSING_CHAT_FIELDS));
    };

    state
        .assistant
        .answer(message, role_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Claude API error: {}", e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, CHAT_UPSTREAM_FAILED)
        })
}

// ============================================================
// Dashboard
// ============================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub role: Option<String>,
    pub completed_tasks: Option<String>,
    pub completed_courses: Option<String>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    let role_id = non_empty(&query.role).ok_or_else(|| ApiError::not_found(NO_ROLE_SELECTED))?;
    let completed_tasks = id_list(query.completed_tasks.as_deref());
    let completed_courses = id_list(query.completed_courses.as_deref());

    state
        .store
        .get_dashboard(role_id, &completed_tasks, &completed_courses)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ROLE_NOT_FOUND))
}

// ============================================================
// Roles
// ============================================================

pub async fn list_roles(State(state): State<AppState>) -> Json<Vec<Role>> {
    Json(state.store.get_all_roles().to_vec())
}

pub async fn list_role_options(State(state): State<AppState>) -> Json<Vec<SelectOption>> {
    Json(state.store.get_roles_as_options())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetail {
    pub role: Role,
    pub display: RoleDisplay,
    pub required_training: Vec<Course>,
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoleDetail>, ApiError> {
    let store = &state.store;
    let role = store
        .get_role(&id)
        .ok_or_else(|| ApiError::not_found(ROLE_NOT_FOUND))?;
    let display = store
        .get_role_display(&id)
        .ok_or_else(|| ApiError::not_found(ROLE_NOT_FOUND))?;

    Ok(Json(RoleDetail {
        role: role.clone(),
        display,
        required_training: store
            .get_required_training(&id)
            .iter()
            .filter_map(|course_id| store.get_course(course_id))
            .cloned()
            .collect(),
    }))
}

// ============================================================
// Tasks
// ============================================================

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub timeline: Option<String>,
    pub category: Option<String>,
}

pub async fn list_role_tasks(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let store = &state.store;
    require_role(store, &role_id)?;
    let timeline: Option<TaskTimeline> = enum_param("timeline", query.timeline.as_deref())?;
    let category: Option<TaskCategory> = enum_param("category", query.category.as_deref())?;

    let tasks = match timeline {
        Some(timeline) => store.get_tasks_by_timeline(&role_id, timeline),
        None => store.get_tasks_by_role(&role_id).iter().collect(),
    };
    let tasks = match category {
        Some(category) => intersect(tasks, &store.get_tasks_by_category(&role_id, category)),
        None => tasks,
    };

    Ok(Json(tasks.into_iter().cloned().collect()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTasks {
    pub by_timeline: BTreeMap<TaskTimeline, Vec<Task>>,
    pub by_category: BTreeMap<TaskCategory, Vec<Task>>,
}

pub async fn get_grouped_tasks(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Json<GroupedTasks>, ApiError> {
    require_role(&state.store, &role_id)?;
    Ok(Json(GroupedTasks {
        by_timeline: state.store.get_tasks_grouped_by_timeline(&role_id),
        by_category: state.store.get_tasks_grouped_by_category(&role_id),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CompletedQuery {
    pub completed: Option<String>,
    pub phase: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgressReport {
    pub progress: TaskProgress,
    pub by_category: BTreeMap<TaskCategory, u32>,
    pub estimated_minutes_remaining: u32,
    pub required_complete: bool,
}

pub async fn get_task_progress(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Query(query): Query<CompletedQuery>,
) -> Result<Json<TaskProgressReport>, ApiError> {
    let store = &state.store;
    require_role(store, &role_id)?;
    let completed = id_list(query.completed.as_deref());

    Ok(Json(TaskProgressReport {
        progress: store.calculate_progress(&role_id, &completed),
        by_category: store.get_progress_by_category(&role_id, &completed),
        estimated_minutes_remaining: store.get_estimated_time_remaining(&role_id, &completed),
        required_complete: store.are_required_tasks_complete(&role_id, &completed),
    }))
}

pub async fn get_next_task(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Query(query): Query<CompletedQuery>,
) -> Result<Json<Option<Task>>, ApiError> {
    require_role(&state.store, &role_id)?;
    let completed = id_list(query.completed.as_deref());
    let phase: Option<TaskTimeline> = enum_param("phase", query.phase.as_deref())?;

    Ok(Json(
        state
            .store
            .get_next_task(&role_id, &completed, phase)
            .cloned(),
    ))
}

// ============================================================
// Policies
// ============================================================

pub async fn list_role_policies(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Json<Vec<PolicySummary>>, ApiError> {
    require_role(&state.store, &role_id)?;
    Ok(Json(state.store.get_policy_summary_for_role(&role_id)))
}

#[derive(Debug, Deserialize)]
pub struct PolicyQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub role: Option<String>,
}

pub async fn list_policies(
    State(state): State<AppState>,
    Query(query): Query<PolicyQuery>,
) -> Result<Json<Vec<Policy>>, ApiError> {
    let store = &state.store;
    let category: Option<PolicyCategory> = enum_param("category", query.category.as_deref())?;
    let role = non_empty(&query.role);

    let policies = match (non_empty(&query.q), role) {
        (Some(q), role) => store.search_policies(q, role),
        (None, Some(role)) => store.get_policies_by_role(role),
        (None, None) => store.get_all_policies().iter().collect(),
    };
    let policies = match category {
        Some(category) => intersect(policies, &store.get_policies_by_category(category)),
        None => policies,
    };

    Ok(Json(policies.into_iter().cloned().collect()))
}

#[derive(Debug, Deserialize)]
pub struct RoleFilter {
    pub role: Option<String>,
}

/// A single policy; with `?role=` only the sections visible to that role.
pub async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RoleFilter>,
) -> Result<Json<Policy>, ApiError> {
    let store = &state.store;
    let mut policy = store
        .get_policy(&id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Policy not found"))?;
    policy.sections = store.get_policy_sections_for_role(&id, non_empty(&query.role));
    Ok(Json(policy))
}

// ============================================================
// People
// ============================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub timing: Option<String>,
    pub relationship: Option<String>,
    pub max_priority: Option<String>,
}

pub async fn list_role_people(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<RecommendedPerson>>, ApiError> {
    let store = &state.store;
    require_role(store, &role_id)?;
    let timing: Option<SuggestedTiming> = enum_param("timing", query.timing.as_deref())?;
    let relationship: Option<Relationship> =
        enum_param("relationship", query.relationship.as_deref())?;
    let max_priority = match non_empty(&query.max_priority) {
        Some(raw) => Some(
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ApiError::bad_request(format!("Invalid maxPriority: {raw}")))?,
        ),
        None => None,
    };

    let mut people = match max_priority {
        Some(max) => store.get_high_priority_people(&role_id, max),
        None => store.get_recommended_people(&role_id),
    };
    if let Some(timing) = timing {
        people.retain(|p| p.suggested_timing == timing);
    }
    if let Some(relationship) = relationship {
        people.retain(|p| p.relationship == relationship);
    }

    Ok(Json(people))
}

#[derive(Debug, Deserialize)]
pub struct PeopleQuery {
    pub q: Option<String>,
    pub expertise: Option<String>,
}

pub async fn list_people(
    State(state): State<AppState>,
    Query(query): Query<PeopleQuery>,
) -> Json<Vec<Person>> {
    let store = &state.store;
    let people = match non_empty(&query.q) {
        Some(q) => store.search_people_by_name(q),
        None => store.get_all_people().iter().collect(),
    };
    let people = match non_empty(&query.expertise) {
        Some(expertise) => intersect(people, &store.search_people_by_expertise(expertise)),
        None => people,
    };

    Json(people.into_iter().cloned().collect())
}

// ============================================================
// Learning
// ============================================================

pub async fn get_role_learning(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Json<LearningPath>, ApiError> {
    require_role(&state.store, &role_id)?;
    state
        .store
        .get_learning_path(&role_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Learning path not found"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgressReport {
    pub progress: LearningProgress,
    pub required_complete: bool,
    pub next_course: Option<LearningItemWithCourse>,
    pub upcoming_deadlines: Vec<LearningItemWithCourse>,
    pub total_required_minutes: u32,
    pub total_recommended_minutes: u32,
}

pub async fn get_learning_progress(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Query(query): Query<CompletedQuery>,
) -> Result<Json<LearningProgressReport>, ApiError> {
    let store = &state.store;
    require_role(store, &role_id)?;
    let completed = id_list(query.completed.as_deref());

    Ok(Json(LearningProgressReport {
        progress: store.calculate_learning_progress(&role_id, &completed),
        required_complete: store.is_required_training_complete(&role_id, &completed),
        next_course: store.get_next_course(&role_id, &completed),
        upcoming_deadlines: store.get_courses_with_upcoming_deadlines(&role_id),
        total_required_minutes: store.get_total_required_time(&role_id),
        total_recommended_minutes: store.get_total_recommended_time(&role_id),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    pub provider: Option<String>,
    pub format: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let store = &state.store;
    let provider: Option<CourseProvider> = enum_param("provider", query.provider.as_deref())?;
    let format: Option<CourseFormat> = enum_param("format", query.format.as_deref())?;

    let mut courses = match non_empty(&query.q) {
        Some(q) => store.search_courses(q),
        None => store.get_all_courses().iter().collect(),
    };
    if let Some(provider) = provider {
        courses = intersect(courses, &store.get_courses_by_provider(provider));
    }
    if let Some(format) = format {
        courses = intersect(courses, &store.get_courses_by_format(format));
    }
    if let Some(tag) = non_empty(&query.tag) {
        courses = intersect(courses, &store.get_courses_by_tag(tag));
    }

    Ok(Json(courses.into_iter().cloned().collect()))
}

// ============================================================
// Employees
// ============================================================

#[derive(Debug, Deserialize)]
pub struct EmployeeQuery {
    pub q: Option<String>,
}

pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> Json<Vec<Employee>> {
    let employees = match non_empty(&query.q) {
        Some(q) => state.store.search_employees_by_name(q),
        None => state.store.get_all_employees().iter().collect(),
    };
    Json(employees.into_iter().cloned().collect())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub employee: Employee,
    pub manager: Option<Employee>,
    pub onboarding_buddy: Option<Employee>,
    pub direct_reports: Vec<Employee>,
    pub days_since_start: Option<i64>,
    pub phase: Option<OnboardingPhase>,
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeProfile>, ApiError> {
    let store = &state.store;
    let employee = store
        .get_employee(&id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;
    let now = Utc::now();

    Ok(Json(EmployeeProfile {
        manager: store.get_manager(&id).cloned(),
        onboarding_buddy: store.get_onboarding_buddy(&id).cloned(),
        direct_reports: store.get_direct_reports(&id).into_iter().cloned().collect(),
        days_since_start: store.days_since_start(&id, now),
        phase: store.get_onboarding_phase(&id, now),
        employee,
    }))
}
