use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A directory record for an employee.
///
/// `manager` and `onboarding_buddy` are references by ID; the referenced
/// employee may or may not be present in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Display title, e.g. "Software Engineer".
    pub role: String,
    pub role_id: String,
    pub department: String,
    pub team: String,
    pub level: String,
    pub start_date: NaiveDate,
    pub location: String,
    pub work_type: WorkType,
    pub timezone: String,
    pub manager: EmployeeRef,
    pub onboarding_buddy: EmployeeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
}
