//! In-memory onboarding dataset and the read-only queries over it.
//!
//! The dataset is loaded once, validated, and shared behind an [`Arc`]. Every
//! query borrows from it; nothing mutates it after [`Store::load`] returns.
//! Progress (completed task and course IDs) is always passed in by the caller.

mod dashboard;
mod employees;
mod learning;
mod people;
mod policies;
mod roles;
mod schema;
mod tasks;
mod validate;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::models::*;

pub use dashboard::{
    example_prompts, CHECKLIST_TIMELINE, CHECKLIST_WIDGET_TASKS, LEARNING_WIDGET_COURSES,
    PEOPLE_WIDGET_MAX_PRIORITY, POLICY_WIDGET_POLICIES,
};
pub use policies::POLICY_KEYWORDS;
pub use schema::{DataFile, DATA_FILES};

/// Errors raised while loading or validating the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} does not match the expected shape: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {collection} id: {id}")]
    DuplicateId { collection: String, id: String },

    #[error("{owner} references unknown {kind} {id}")]
    UnknownReference {
        owner: String,
        kind: &'static str,
        id: String,
    },
}

/// Where the JSON documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Copies compiled into the binary.
    Builtin,
    /// A directory holding the same file names.
    Directory(PathBuf),
}

pub(crate) struct Dataset {
    employees: Vec<Employee>,
    roles: Vec<Role>,
    policies: Vec<Policy>,
    people: Vec<Person>,
    recommendations: Vec<RoleRecommendations>,
    courses: Vec<Course>,
    learning_paths: BTreeMap<String, LearningPathRecord>,
    tasks_by_role: BTreeMap<String, Vec<Task>>,
}

/// Shared handle to the validated dataset. Cloning is cheap.
pub struct Store {
    data: Arc<Dataset>,
}

impl Store {
    /// Load and validate the dataset from `source`.
    pub fn load(source: &DataSource) -> Result<Self, DataError> {
        let data = schema::read_dataset(source)?;
        validate::check(&data)?;

        tracing::info!(
            employees = data.employees.len(),
            roles = data.roles.len(),
            policies = data.policies.len(),
            people = data.people.len(),
            courses = data.courses.len(),
            "Loaded onboarding dataset"
        );

        Ok(Self {
            data: Arc::new(data),
        })
    }

    /// The dataset compiled into the binary.
    pub fn builtin() -> Result<Self, DataError> {
        Self::load(&DataSource::Builtin)
    }

    /// Load from a directory of JSON files.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::load(&DataSource::Directory(dir.as_ref().to_path_buf()))
    }

    /// Collection sizes, for startup logs and the `check` command.
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            employees: self.data.employees.len(),
            roles: self.data.roles.len(),
            policies: self.data.policies.len(),
            people: self.data.people.len(),
            courses: self.data.courses.len(),
            tasks: self.data.tasks_by_role.values().map(Vec::len).sum(),
        }
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("counts", &self.counts())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DatasetCounts {
    pub employees: usize,
    pub roles: usize,
    pub policies: usize,
    pub people: usize,
    pub courses: usize,
    pub tasks: usize,
}

/// Case-insensitive substring test used by every free-text search.
fn contains_ci(haystack: &str, lower_needle: &str) -> bool {
    haystack.to_lowercase().contains(lower_needle)
}
