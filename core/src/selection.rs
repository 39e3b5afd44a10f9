//! Role selection — the staffing mode state machine.
//!
//!   Unset ──select_solo──▶ Solo
//!   Unset ──toggle(r)────▶ Multi({r})
//!   Solo  ──toggle(r)────▶ Multi({r})        (solo assignment discarded)
//!   Multi ──toggle(r)────▶ Multi(roles ^ r)  or Unset when emptied
//!   any   ──reset────────▶ Unset
//!
//! RULE: Solo and a non-empty Multi set are never observable together.
//! Multi is never observable with an empty set.

use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "roles", rename_all = "snake_case")]
pub enum StaffingMode {
    #[default]
    Unset,
    Solo,
    Multi(BTreeSet<Role>),
}

impl StaffingMode {
    /// Stable tag used in records, logs and the snapshot.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Unset    => "unset",
            Self::Solo     => "solo",
            Self::Multi(_) => "multi",
        }
    }

    /// Roles that need covering. Solo covers every role.
    pub fn active_roles(&self) -> Vec<Role> {
        match self {
            Self::Unset        => Vec::new(),
            Self::Solo         => Role::ALL.to_vec(),
            Self::Multi(roles) => roles.iter().copied().collect(),
        }
    }

    pub fn is_active(&self, role: Role) -> bool {
        match self {
            Self::Unset        => false,
            Self::Solo         => true,
            Self::Multi(roles) => roles.contains(&role),
        }
    }
}

/// What a selection transition did to the roles that carry assignments.
/// The assignment state applies this so nothing stale survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The previous mode's assignments are all void.
    ModeChanged,
    /// Still Multi; only this role's slot must be dropped.
    RoleDeactivated(Role),
    /// A role was switched on; existing slots stay.
    RoleActivated(Role),
}

#[derive(Debug, Clone, Default)]
pub struct RoleSelectionState {
    mode: StaffingMode,
}

impl RoleSelectionState {
    pub fn new() -> Self { Self::default() }

    pub fn mode(&self) -> &StaffingMode { &self.mode }

    pub fn select_solo(&mut self) -> SelectionChange {
        self.mode = StaffingMode::Solo;
        SelectionChange::ModeChanged
    }

    /// Flip one role. Leaving Solo goes through an empty Multi first, so the
    /// toggled role always lands alone. The intermediate is never stored.
    pub fn toggle_role(&mut self, role: Role) -> SelectionChange {
        let (mut roles, left_other_mode) = match std::mem::take(&mut self.mode) {
            StaffingMode::Multi(roles) => (roles, false),
            StaffingMode::Solo         => (BTreeSet::new(), true),
            StaffingMode::Unset        => (BTreeSet::new(), false),
        };

        let activated = !roles.remove(&role);
        if activated {
            roles.insert(role);
        }

        self.mode = if roles.is_empty() {
            StaffingMode::Unset
        } else {
            StaffingMode::Multi(roles)
        };

        if left_other_mode || matches!(self.mode, StaffingMode::Unset) {
            SelectionChange::ModeChanged
        } else if activated {
            SelectionChange::RoleActivated(role)
        } else {
            SelectionChange::RoleDeactivated(role)
        }
    }

    pub fn reset(&mut self) {
        self.mode = StaffingMode::Unset;
    }
}
