//! Role assignments — who covers which role.
//!
//! RULE: a slot for a role that is no longer active is dropped, not hidden.
//! Reactivating the role starts from an empty slot.

use crate::{
    directory::Employee,
    error::{KioskError, KioskResult},
    role::Role,
    selection::{SelectionChange, StaffingMode},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role → employee mapping. Under Solo only `solo` is populated;
/// under Multi only `roles` is. Both empty under Unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleAssignment {
    pub solo:  Option<Employee>,
    pub roles: BTreeMap<Role, Employee>,
}

impl RoleAssignment {
    pub fn is_empty(&self) -> bool {
        self.solo.is_none() && self.roles.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentState {
    current: RoleAssignment,
}

impl AssignmentState {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> &RoleAssignment { &self.current }

    pub fn assign_solo(&mut self, mode: &StaffingMode, employee: Employee) -> KioskResult<()> {
        if *mode != StaffingMode::Solo {
            return Err(KioskError::NotSolo);
        }
        self.current.solo = Some(employee);
        Ok(())
    }

    pub fn assign_role(
        &mut self,
        mode: &StaffingMode,
        role: Role,
        employee: Employee,
    ) -> KioskResult<()> {
        match mode {
            StaffingMode::Multi(roles) if roles.contains(&role) => {
                self.current.roles.insert(role, employee);
                Ok(())
            }
            _ => Err(KioskError::RoleInactive { role }),
        }
    }

    /// Apply the fallout of a selection transition.
    pub fn apply(&mut self, change: &SelectionChange) {
        match change {
            SelectionChange::ModeChanged => self.clear(),
            SelectionChange::RoleDeactivated(role) => {
                self.current.roles.remove(role);
            }
            SelectionChange::RoleActivated(_) => {}
        }
    }

    /// The employee covering `role` under `mode`, if any.
    pub fn resolve(&self, mode: &StaffingMode, role: Role) -> Option<&Employee> {
        match mode {
            StaffingMode::Unset => None,
            StaffingMode::Solo  => self.current.solo.as_ref(),
            StaffingMode::Multi(roles) if roles.contains(&role) => self.current.roles.get(&role),
            StaffingMode::Multi(_) => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = RoleAssignment::default();
    }
}
