use chrono::{DateTime, Utc};

use super::{contains_ci, Store};
use crate::models::*;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

impl Store {
    // ============================================================
    // Employee operations
    // ============================================================

    pub fn get_all_employees(&self) -> &[Employee] {
        &self.data.employees
    }

    pub fn get_employee(&self, id: &str) -> Option<&Employee> {
        self.data.employees.iter().find(|e| e.id == id)
    }

    /// First employee holding `role_id`. The dashboard shows this employee.
    pub fn get_employee_by_role(&self, role_id: &str) -> Option<&Employee> {
        self.data.employees.iter().find(|e| e.role_id == role_id)
    }

    pub fn get_employees_by_role(&self, role_id: &str) -> Vec<&Employee> {
        self.data
            .employees
            .iter()
            .filter(|e| e.role_id == role_id)
            .collect()
    }

    pub fn get_employees_by_department(&self, department: &str) -> Vec<&Employee> {
        self.data
            .employees
            .iter()
            .filter(|e| e.department == department)
            .collect()
    }

    pub fn get_employees_by_team(&self, team: &str) -> Vec<&Employee> {
        self.data
            .employees
            .iter()
            .filter(|e| e.team == team)
            .collect()
    }

    /// The employee's manager, when the manager is in the dataset.
    pub fn get_manager(&self, employee_id: &str) -> Option<&Employee> {
        let employee = self.get_employee(employee_id)?;
        self.get_employee(&employee.manager.id)
    }

    pub fn get_onboarding_buddy(&self, employee_id: &str) -> Option<&Employee> {
        let employee = self.get_employee(employee_id)?;
        self.get_employee(&employee.onboarding_buddy.id)
    }

    pub fn get_direct_reports(&self, manager_id: &str) -> Vec<&Employee> {
        self.data
            .employees
            .iter()
            .filter(|e| e.manager.id == manager_id)
            .collect()
    }

    pub fn search_employees_by_name(&self, query: &str) -> Vec<&Employee> {
        let query = query.to_lowercase();
        self.data
            .employees
            .iter()
            .filter(|e| contains_ci(&e.name, &query))
            .collect()
    }

    /// Whole days between the start date (midnight UTC) and `now`, rounded up.
    pub fn days_since_start(&self, employee_id: &str, now: DateTime<Utc>) -> Option<i64> {
        let employee = self.get_employee(employee_id)?;
        let start = employee.start_date.and_hms_opt(0, 0, 0)?.and_utc();
        let elapsed_ms = (now - start).num_milliseconds().abs() as f64;
        Some((elapsed_ms / MS_PER_DAY).ceil() as i64)
    }

    pub fn get_onboarding_phase(
        &self,
        employee_id: &str,
        now: DateTime<Utc>,
    ) -> Option<OnboardingPhase> {
        self.days_since_start(employee_id, now)
            .map(OnboardingPhase::from_days)
    }
}
