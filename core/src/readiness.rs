//! Readiness — may a shift start with the current staffing?
//!
//! Pure functions of (mode, assignment). No I/O, no clock.

use crate::{assignment::RoleAssignment, role::Role, selection::StaffingMode};

pub fn is_ready(mode: &StaffingMode, assignment: &RoleAssignment) -> bool {
    match mode {
        StaffingMode::Unset => false,
        StaffingMode::Solo  => assignment.solo.is_some(),
        StaffingMode::Multi(roles) => {
            !roles.is_empty() && roles.iter().all(|r| assignment.roles.contains_key(r))
        }
    }
}

/// Active roles that still need an employee, in role order.
/// Under Solo the single slot is reported as every role.
pub fn missing_roles(mode: &StaffingMode, assignment: &RoleAssignment) -> Vec<Role> {
    match mode {
        StaffingMode::Unset => Vec::new(),
        StaffingMode::Solo if assignment.solo.is_some() => Vec::new(),
        StaffingMode::Solo => Role::ALL.to_vec(),
        StaffingMode::Multi(roles) => roles
            .iter()
            .filter(|r| !assignment.roles.contains_key(r))
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Employee;
    use std::collections::BTreeSet;

    fn alex() -> Employee { Employee::new("1001", "Alex Kim") }

    #[test]
    fn unset_is_never_ready() {
        let mut assignment = RoleAssignment::default();
        assignment.solo = Some(alex());
        assert!(!is_ready(&StaffingMode::Unset, &assignment));
    }

    #[test]
    fn roles_outside_the_active_set_are_ignored() {
        let mode = StaffingMode::Multi(BTreeSet::from([Role::Runner]));
        let mut assignment = RoleAssignment::default();
        assignment.roles.insert(Role::Packer, alex());
        assert!(!is_ready(&mode, &assignment));
        assert_eq!(missing_roles(&mode, &assignment), vec![Role::Runner]);

        assignment.roles.insert(Role::Runner, alex());
        assert!(is_ready(&mode, &assignment));
        assert!(missing_roles(&mode, &assignment).is_empty());
    }

    #[test]
    fn empty_multi_is_not_ready() {
        let mode = StaffingMode::Multi(BTreeSet::new());
        assert!(!is_ready(&mode, &RoleAssignment::default()));
    }
}
