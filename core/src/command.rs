use crate::{role::Role, types::EmployeeId};
use serde::{Deserialize, Serialize};

/// Every intent the presentation layer can forward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum KioskCommand {
    // ── Staffing ──────────────────────────────────
    SelectSolo,
    ToggleRole { role: Role },
    AssignSolo { employee_id: EmployeeId },
    AssignRole { role: Role, employee_id: EmployeeId },
    Reset,

    // ── Session ───────────────────────────────────
    Start,
    ChangeStaffing,
    ClockOut,

    // ── Ambient ───────────────────────────────────
    SetOnline { online: bool },
    NextTip,
    Tick,
}

impl KioskCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSolo        => "select_solo",
            Self::ToggleRole { .. } => "toggle_role",
            Self::AssignSolo { .. } => "assign_solo",
            Self::AssignRole { .. } => "assign_role",
            Self::Reset             => "reset",
            Self::Start             => "start",
            Self::ChangeStaffing    => "change_staffing",
            Self::ClockOut          => "clock_out",
            Self::SetOnline { .. }  => "set_online",
            Self::NextTip           => "next_tip",
            Self::Tick              => "tick",
        }
    }

    /// Commands that edit staffing, and so are locked while on shift.
    pub fn mutates_staffing(&self) -> bool {
        matches!(
            self,
            Self::SelectSolo
                | Self::ToggleRole { .. }
                | Self::AssignSolo { .. }
                | Self::AssignRole { .. }
                | Self::Reset
        )
    }
}
