use super::{contains_ci, Store};
use crate::models::*;

impl Store {
    // ============================================================
    // Role operations
    // ============================================================

    pub fn get_all_roles(&self) -> &[Role] {
        &self.data.roles
    }

    pub fn get_role(&self, id: &str) -> Option<&Role> {
        self.data.roles.iter().find(|r| r.id == id)
    }

    pub fn role_exists(&self, id: &str) -> bool {
        self.get_role(id).is_some()
    }

    pub fn get_roles_by_category(&self, category: RoleCategory) -> Vec<&Role> {
        self.data
            .roles
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn get_roles_by_department(&self, department: &str) -> Vec<&Role> {
        self.data
            .roles
            .iter()
            .filter(|r| r.department == department)
            .collect()
    }

    /// Name of the assistant skill that handles questions for this role.
    pub fn get_role_skill_name(&self, role_id: &str) -> Option<&str> {
        self.get_role(role_id).map(|r| r.skill_name.as_str())
    }

    pub fn get_required_training(&self, role_id: &str) -> &[String] {
        self.get_role(role_id)
            .map(|r| r.required_training.as_slice())
            .unwrap_or_default()
    }

    pub fn get_common_teams(&self, role_id: &str) -> &[String] {
        self.get_role(role_id)
            .map(|r| r.common_teams.as_slice())
            .unwrap_or_default()
    }

    pub fn get_typical_levels(&self, role_id: &str) -> &[String] {
        self.get_role(role_id)
            .map(|r| r.typical_level.as_slice())
            .unwrap_or_default()
    }

    pub fn get_roles_as_options(&self) -> Vec<SelectOption> {
        self.data.roles.iter().map(SelectOption::from).collect()
    }

    /// Roles whose title, description or department contains `query`.
    pub fn search_roles(&self, query: &str) -> Vec<&Role> {
        let query = query.to_lowercase();
        self.data
            .roles
            .iter()
            .filter(|r| {
                contains_ci(&r.title, &query)
                    || contains_ci(&r.description, &query)
                    || contains_ci(&r.department, &query)
            })
            .collect()
    }

    pub fn get_role_display(&self, role_id: &str) -> Option<RoleDisplay> {
        self.get_role(role_id).map(RoleDisplay::from)
    }
}
