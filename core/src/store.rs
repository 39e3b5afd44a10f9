//! SQLite event log.
//!
//! RULE: Only store.rs talks to the database.
//! The log is an audit trail of kiosk events; shift records themselves
//! go to the completion sink.

use rusqlite::{Connection, params};
use crate::{
    error::KioskResult,
    event::EventLogEntry,
};

pub struct KioskStore {
    conn: Connection,
}

impl KioskStore {
    /// Open (or create) the event log database at `path`.
    pub fn open(path: &str) -> KioskResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> KioskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> KioskResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_event_log.sql"))?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> KioskResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (device_id, session_id, event_type, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.device_id,
                entry.session_id,
                entry.event_type,
                entry.payload,
                entry.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_session(&self, session_id: &str) -> KioskResult<Vec<EventLogEntry>> {
        self.query_events(
            "SELECT id, device_id, session_id, event_type, payload, created_at
             FROM event_log WHERE session_id = ?1
             ORDER BY id ASC",
            params![session_id],
        )
    }

    pub fn events_of_type(&self, event_type: &str) -> KioskResult<Vec<EventLogEntry>> {
        self.query_events(
            "SELECT id, device_id, session_id, event_type, payload, created_at
             FROM event_log WHERE event_type = ?1
             ORDER BY id ASC",
            params![event_type],
        )
    }

    pub fn event_count(&self) -> KioskResult<i64> {
        let n = self.conn.query_row("SELECT COUNT(*) FROM event_log", [], |row| row.get(0))?;
        Ok(n)
    }

    fn query_events(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
    ) -> KioskResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt.query_map(args, |row| {
            Ok(EventLogEntry {
                id:         Some(row.get(0)?),
                device_id:  row.get(1)?,
                session_id: row.get(2)?,
                event_type: row.get(3)?,
                payload:    row.get(4)?,
                created_at: row.get(5)?,
            })
        })?.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
