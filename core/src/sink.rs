//! Completion sinks — where finished shift records go.
//!
//! The engine's contract ends at handing each record over once.
//! Delivery failures belong to the sink; the engine only logs them.

use crate::session::ShiftRecord;
use std::sync::{Arc, Mutex};

pub trait CompletionSink: Send {
    fn name(&self) -> &'static str;

    fn deliver(&mut self, record: &ShiftRecord) -> anyhow::Result<()>;
}

/// Writes each record as JSON through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl CompletionSink for LogSink {
    fn name(&self) -> &'static str { "log" }

    fn deliver(&mut self, record: &ShiftRecord) -> anyhow::Result<()> {
        log::info!("shift completed: {}", serde_json::to_string(record)?);
        Ok(())
    }
}

/// Collects records in memory. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ShiftRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn records(&self) -> Vec<ShiftRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl CompletionSink for MemorySink {
    fn name(&self) -> &'static str { "memory" }

    fn deliver(&mut self, record: &ShiftRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }
}
