//! Shift session — clock-in snapshot through clock-out record.
//!
//! A session is created only from a ready staffing snapshot and is never
//! edited afterwards. Clock-out consumes it and yields a ShiftRecord that
//! owns deep copies of everything it reports.

use crate::{
    assignment::RoleAssignment,
    directory::Employee,
    role::Role,
    selection::StaffingMode,
    types::{SessionId, Timestamp},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftSession {
    pub session_id:  SessionId,
    pub staffing:    StaffingMode,
    pub assignment:  RoleAssignment,
    pub clock_in_at: Timestamp,
}

impl ShiftSession {
    pub fn start(staffing: StaffingMode, assignment: RoleAssignment, clock_in_at: Timestamp) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            staffing,
            assignment,
            clock_in_at,
        }
    }

    /// Time on shift. A `now` before clock-in clamps to zero.
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        (now - self.clock_in_at).max(Duration::zero())
    }

    /// Who covers each role, in role order.
    pub fn roster(&self) -> BTreeMap<Role, Employee> {
        match &self.staffing {
            StaffingMode::Solo => match &self.assignment.solo {
                Some(e) => Role::ALL.iter().map(|r| (*r, e.clone())).collect(),
                None    => BTreeMap::new(),
            },
            _ => self.assignment.roles.clone(),
        }
    }

    /// One-line staffing summary for the idle screen:
    /// "Solo: Alex Kim" or "Runner: Maria Lopez • Packer: Omar Hassan".
    pub fn summary(&self) -> String {
        match (&self.staffing, &self.assignment.solo) {
            (StaffingMode::Solo, Some(e)) => format!("Solo: {}", e.name),
            _ => self
                .assignment
                .roles
                .iter()
                .map(|(role, e)| format!("{role}: {}", e.name))
                .collect::<Vec<_>>()
                .join(" • "),
        }
    }

    /// Close the session. Consumes it so nothing can touch it afterwards.
    pub fn finish(
        self,
        clock_out_at: Timestamp,
        device_id: &str,
        location_id: &str,
    ) -> ShiftRecord {
        let (solo, roles) = match self.staffing {
            StaffingMode::Solo => (self.assignment.solo, BTreeMap::new()),
            _ => (None, self.assignment.roles),
        };
        ShiftRecord {
            session_id: self.session_id,
            mode: self.staffing.tag().to_string(),
            solo,
            roles,
            clock_in_at: self.clock_in_at,
            clock_out_at,
            device_id: device_id.to_string(),
            location_id: location_id.to_string(),
        }
    }
}

/// Completion record handed to the sink exactly once per shift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftRecord {
    pub session_id:   SessionId,
    pub mode:         String, // "solo" | "multi"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solo:         Option<Employee>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roles:        BTreeMap<Role, Employee>,
    pub clock_in_at:  Timestamp,
    pub clock_out_at: Timestamp,
    pub device_id:    String,
    pub location_id:  String,
}

impl ShiftRecord {
    pub fn duration(&self) -> Duration {
        (self.clock_out_at - self.clock_in_at).max(Duration::zero())
    }
}

/// "HH:MM:SS". Hours keep counting past 24; negative input reads as zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
