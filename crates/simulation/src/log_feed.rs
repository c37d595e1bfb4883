//! Ring-buffer feed of human-readable session messages.
//!
//! The [`LogFeed`] keeps only the most recent few lines (6 by default) and is
//! purely presentational: nothing in the simulation reads it back. The
//! telemetry panel renders it as the "Network Feed".

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Severity / colour class of a feed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic within one feed; stable key for UI rows.
    pub id: u64,
    pub message: String,
    pub kind: LogKind,
}

/// Bounded log of the most recent entries. Pushing past capacity evicts the
/// oldest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogFeed {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for LogFeed {
    fn default() -> Self {
        Self::with_capacity(6)
    }
}

impl LogFeed {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id: self.next_id,
            message: message.into(),
            kind,
        });
        self.next_id += 1;
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Whether any retained entry has exactly this message.
    pub fn contains(&self, message: &str) -> bool {
        self.entries.iter().any(|e| e.message == message)
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

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
