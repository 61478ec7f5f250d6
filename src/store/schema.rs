use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{DataError, DataSource, Dataset};
use crate::models::*;

/// A JSON document that makes up part of the dataset.
pub struct DataFile {
    pub name: &'static str,
    builtin: &'static str,
}

const EMPLOYEES: DataFile = DataFile {
    name: "employees.json",
    builtin: include_str!("../../data/employees.json"),
};

const ROLES: DataFile = DataFile {
    name: "roles.json",
    builtin: include_str!("../../data/roles.json"),
};

const POLICIES: DataFile = DataFile {
    name: "policies.json",
    builtin: include_str!("../../data/policies.json"),
};

const PEOPLE: DataFile = DataFile {
    name: "people-directory.json",
    builtin: include_str!("../../data/people-directory.json"),
};

const LEARNING: DataFile = DataFile {
    name: "learning-paths.json",
    builtin: include_str!("../../data/learning-paths.json"),
};

const TASKS: DataFile = DataFile {
    name: "onboarding-tasks.json",
    builtin: include_str!("../../data/onboarding-tasks.json"),
};

/// Every file the loader expects, in load order.
pub const DATA_FILES: &[&DataFile] = &[&EMPLOYEES, &ROLES, &POLICIES, &PEOPLE, &LEARNING, &TASKS];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeesDoc {
    employees: Vec<Employee>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RolesDoc {
    roles: Vec<Role>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoliciesDoc {
    policies: Vec<Policy>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeopleDoc {
    people: Vec<Person>,
    recommendations: Vec<RoleRecommendations>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LearningDoc {
    courses: Vec<Course>,
    paths_by_role: BTreeMap<String, LearningPathRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksDoc {
    tasks_by_role: BTreeMap<String, RoleTasks>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleTasks {
    role_id: String,
    tasks: Vec<Task>,
}

fn read<T: DeserializeOwned>(file: &DataFile, source: &DataSource) -> Result<T, DataError> {
    let parsed = match source {
        DataSource::Builtin => serde_json::from_str(file.builtin),
        DataSource::Directory(dir) => {
            let path = dir.join(file.name);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| DataError::Io { path, source })?;
            serde_json::from_str(&text)
        }
    };

    parsed.map_err(|source| DataError::Parse {
        file: file.name,
        source,
    })
}

pub(super) fn read_dataset(source: &DataSource) -> Result<Dataset, DataError> {
    let employees: EmployeesDoc = read(&EMPLOYEES, source)?;
    let roles: RolesDoc = read(&ROLES, source)?;
    let policies: PoliciesDoc = read(&POLICIES, source)?;
    let people: PeopleDoc = read(&PEOPLE, source)?;
    let learning: LearningDoc = read(&LEARNING, source)?;
    let tasks: TasksDoc = read(&TASKS, source)?;

    let mut tasks_by_role = BTreeMap::new();
    for (key, entry) in tasks.tasks_by_role {
        if key != entry.role_id {
            return Err(DataError::UnknownReference {
                owner: format!("tasksByRole.{}", key),
                kind: "role",
                id: entry.role_id,
            });
        }
        tasks_by_role.insert(key, entry.tasks);
    }

    for (key, path) in &learning.paths_by_role {
        if *key != path.role_id {
            return Err(DataError::UnknownReference {
                owner: format!("pathsByRole.{}", key),
                kind: "role",
                id: path.role_id.clone(),
            });
        }
    }

    Ok(Dataset {
        employees: employees.employees,
        roles: roles.roles,
        policies: policies.policies,
        people: people.people,
        recommendations: people.recommendations,
        courses: learning.courses,
        learning_paths: learning.paths_by_role,
        tasks_by_role,
    })
}
