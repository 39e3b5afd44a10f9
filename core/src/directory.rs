//! Staff directory — read-only roster lookup.
//!
//! RULE: the core never creates or edits employees.
//! It only references entries loaded from configuration.

use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id:   EmployeeId,
    pub name: String,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    staff: Vec<Employee>,
}

impl StaffDirectory {
    /// Build from a roster. Duplicate ids keep their first occurrence.
    pub fn new(roster: Vec<Employee>) -> Self {
        let mut staff: Vec<Employee> = Vec::with_capacity(roster.len());
        for employee in roster {
            if staff.iter().any(|e| e.id == employee.id) {
                log::warn!("directory: duplicate employee id {} ignored", employee.id);
                continue;
            }
            staff.push(employee);
        }
        Self { staff }
    }

    /// Case-insensitive substring match on name, substring match on id.
    /// An empty (or all-whitespace) query returns the whole roster in
    /// insertion order. Never fails; no match is an empty vec.
    pub fn search(&self, query: &str) -> Vec<Employee> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.staff.clone();
        }
        self.staff
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&q) || e.id.to_lowercase().contains(&q))
            .cloned()
            .collect()
    }

    /// Exact id lookup.
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.staff.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize       { self.staff.len() }
    pub fn is_empty(&self) -> bool   { self.staff.is_empty() }
}
