//! Shared primitive types used across the kiosk core.

use chrono::{DateTime, Utc};

/// A wall-clock instant. Every timestamp in the kiosk is UTC.
pub type Timestamp = DateTime<Utc>;

/// Opaque employee identifier as printed on the badge ("1001").
pub type EmployeeId = String;

/// Unique identifier of one shift session (uuid v4, hyphenated).
pub type SessionId = String;
