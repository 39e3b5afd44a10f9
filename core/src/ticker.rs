//! Session ticker — the periodic timer behind the active-session view.
//!
//! RULE: a ticker exists only while a session is active. The engine
//! acquires one at start and drops it at clock-out or change-staffing.
//! There are no free-running timers anywhere else.
//!
//! The ticker never sleeps or spawns. The host feeds it instants through
//! `on_tick`; it reports what is due since the last call.

use crate::types::Timestamp;
use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The elapsed-time display should re-render.
    pub refresh: bool,
    /// Number of tip rotations that came due.
    pub tip_rotations: u32,
}

#[derive(Debug)]
pub struct SessionTicker {
    refresh_interval: Duration,
    tip_interval:     Duration,
    last_refresh:     Timestamp,
    last_rotation:    Timestamp,
}

impl SessionTicker {
    pub fn acquire(now: Timestamp, refresh_interval: Duration, tip_interval: Duration) -> Self {
        log::debug!("ticker: acquired at {now}");
        Self {
            refresh_interval,
            tip_interval,
            last_refresh: now,
            last_rotation: now,
        }
    }

    pub fn on_tick(&mut self, now: Timestamp) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if now - self.last_refresh >= self.refresh_interval {
            outcome.refresh = true;
            self.last_refresh = now;
        }

        let interval_ms = self.tip_interval.num_milliseconds();
        if interval_ms > 0 {
            let due = (now - self.last_rotation).num_milliseconds() / interval_ms;
            if due > 0 {
                self.last_rotation += Duration::milliseconds(due * interval_ms);
                outcome.tip_rotations = u32::try_from(due).unwrap_or(u32::MAX);
            }
        }

        outcome
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        log::debug!("ticker: released");
    }
}
