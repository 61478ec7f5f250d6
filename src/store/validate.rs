//! Cross-document consistency checks run once at load time.
//!
//! Serde already enforces the shape of each document; these checks catch
//! dangling references between documents, which the fixtures never expect.

use std::collections::HashSet;

use super::{DataError, Dataset, POLICY_KEYWORDS};

pub(super) fn check(data: &Dataset) -> Result<(), DataError> {
    unique("employee", data.employees.iter().map(|e| e.id.as_str()))?;
    unique("role", data.roles.iter().map(|r| r.id.as_str()))?;
    unique("policy", data.policies.iter().map(|p| p.id.as_str()))?;
    unique("person", data.people.iter().map(|p| p.id.as_str()))?;
    unique("course", data.courses.iter().map(|c| c.id.as_str()))?;

    for policy in &data.policies {
        unique(
            &format!("section of {}", policy.id),
            policy.sections.iter().map(|s| s.id.as_str()),
        )?;
    }

    let roles: HashSet<&str> = data.roles.iter().map(|r| r.id.as_str()).collect();
    let policies: HashSet<&str> = data.policies.iter().map(|p| p.id.as_str()).collect();
    let courses: HashSet<&str> = data.courses.iter().map(|c| c.id.as_str()).collect();
    let people: HashSet<&str> = data.people.iter().map(|p| p.id.as_str()).collect();

    for (policy_id, _) in POLICY_KEYWORDS {
        known(&policies, "policy keyword table", "policy", policy_id)?;
    }

    for role in &data.roles {
        for course_id in &role.required_training {
            known(&courses, &format!("role {}", role.id), "course", course_id)?;
        }
    }

    for (role_id, path) in &data.learning_paths {
        let owner = format!("learning path {}", role_id);
        known(&roles, &owner, "role", role_id)?;
        for item in path.required.iter().chain(path.recommended.iter()) {
            known(&courses, &owner, "course", &item.course_id)?;
        }
    }

    for (role_id, tasks) in &data.tasks_by_role {
        known(&roles, "onboarding tasks", "role", role_id)?;
        unique(
            &format!("task of {}", role_id),
            tasks.iter().map(|t| t.id.as_str()),
        )?;
    }

    for entry in &data.recommendations {
        let owner = format!("recommendations for {}", entry.for_role);
        known(&roles, &owner, "role", &entry.for_role)?;
        for rule in &entry.recommended_people {
            known(&people, &owner, "person", &rule.person_id)?;
        }
    }

    Ok(())
}

fn unique<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::DuplicateId {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn known(set: &HashSet<&str>, owner: &str, kind: &'static str, id: &str) -> Result<(), DataError> {
    if set.contains(id) {
        Ok(())
    } else {
        Err(DataError::UnknownReference {
            owner: owner.to_string(),
            kind,
            id: id.to_string(),
        })
    }
}
