//! Kiosk events — everything the engine reports back.
//!
//! RULE: every state transition emits at least one event.
//! Rejected intents emit none; they return an error instead.

use crate::{
    directory::Employee,
    role::Role,
    session::ShiftRecord,
    types::{SessionId, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KioskEvent {
    // ── Staffing ───────────────────────────────────
    ModeChanged {
        mode: String,
        active_roles: Vec<Role>,
    },
    SoloAssigned {
        employee: Employee,
    },
    RoleAssigned {
        role: Role,
        employee: Employee,
    },
    StaffingReset,

    // ── Session lifecycle ──────────────────────────
    ShiftStarted {
        session_id: SessionId,
        clock_in_at: Timestamp,
    },
    /// Staffing was re-confirmed while already on shift; clock kept.
    ShiftResumed {
        session_id: SessionId,
        clock_in_at: Timestamp,
    },
    ShiftAbandoned {
        session_id: SessionId,
        at: Timestamp,
    },
    ShiftCompleted {
        record: ShiftRecord,
        delivered: bool,
    },

    // ── Ambient ────────────────────────────────────
    ConnectivityChanged {
        online: bool,
    },
    ElapsedRefreshed {
        session_id: SessionId,
        elapsed: String,
    },
    TipRotated {
        index: usize,
    },
}

impl KioskEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ModeChanged { .. }         => "mode_changed",
            Self::SoloAssigned { .. }        => "solo_assigned",
            Self::RoleAssigned { .. }        => "role_assigned",
            Self::StaffingReset              => "staffing_reset",
            Self::ShiftStarted { .. }        => "shift_started",
            Self::ShiftResumed { .. }        => "shift_resumed",
            Self::ShiftAbandoned { .. }      => "shift_abandoned",
            Self::ShiftCompleted { .. }      => "shift_completed",
            Self::ConnectivityChanged { .. } => "connectivity_changed",
            Self::ElapsedRefreshed { .. }    => "elapsed_refreshed",
            Self::TipRotated { .. }          => "tip_rotated",
        }
    }

    /// Display-only events are not written to the event log.
    pub fn is_audited(&self) -> bool {
        !matches!(self, Self::ElapsedRefreshed { .. } | Self::TipRotated { .. })
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub device_id:  String,
    pub session_id: Option<SessionId>,
    pub event_type: String,
    pub payload:    String, // JSON-serialized KioskEvent
    pub created_at: Timestamp,
}
