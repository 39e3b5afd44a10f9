//! Read-only view of the kiosk for the presentation layer.
//!
//! Everything here is derived; the renderer never mutates engine state.

use crate::{
    directory::Employee,
    role::Role,
    types::{SessionId, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KioskSnapshot {
    pub device_id:     String,
    pub location_id:   String,
    pub online:        bool,
    pub online_label:  String,
    pub mode:          String,
    pub active_roles:  Vec<Role>,
    pub solo:          Option<Employee>,
    pub assignments:   BTreeMap<Role, Employee>,
    pub ready:         bool,
    pub missing_roles: Vec<Role>,
    pub session:       Option<SessionView>,
    pub tip:           Option<String>,
    pub tip_progress:  usize,
    pub tip_count:     usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionView {
    pub session_id:  SessionId,
    pub summary:     String,
    pub clock_in_at: Timestamp,
    pub elapsed:     String, // HH:MM:SS
}

pub fn online_label(online: bool) -> &'static str {
    if online { "Online" } else { "Offline (queued)" }
}
