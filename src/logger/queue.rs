//! FIFO of log calls captured while the logger is paused.

use std::collections::VecDeque;

use consol_config::LogLevel;
use serde_json::Value;

/// A log call deferred while paused. The message is stringified and
/// formatted only when the entry is replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLogEntry {
    pub level: LogLevel,
    pub args: Vec<Value>,
}

#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<PendingLogEntry>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: LogLevel, args: Vec<Value>) {
        self.entries.push_back(PendingLogEntry { level, args });
    }

    /// Remove and return every entry in enqueue order.
    pub fn drain(&mut self) -> Vec<PendingLogEntry> {
        self.entries.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingLogEntry> {
        self.entries.iter()
    }
}
