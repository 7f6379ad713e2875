//! Log capture: the sanctioned side channel for action handlers.
//!
//! Handlers are pure state transformers; the one observable side effect they
//! may have is emitting audit/debug messages through a [`LogSink`]. The sink
//! is an explicit capability threaded through the dispatch chain by the
//! caller - the engine holds no ambient global log state.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_LOG_CAPACITY: usize = 4096;

/// Severity of a captured log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single captured log entry.
///
/// `seq` is a per-buffer monotonic counter. The engine has no clock;
/// ordering is the contract, not wall time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub message: String,
}

/// Capability handed to handlers for emitting audit/debug messages.
pub trait LogSink {
    fn append(&mut self, level: LogLevel, message: String);

    fn info(&mut self, message: String) {
        self.append(LogLevel::Info, message);
    }

    fn warning(&mut self, message: String) {
        self.append(LogLevel::Warning, message);
    }

    fn error(&mut self, message: String) {
        self.append(LogLevel::Error, message);
    }
}

/// Bounded in-memory sink backing the inspector's log view.
///
/// Oldest entries are evicted once `capacity` is reached; evictions are
/// counted so the view can report truncation. Sequence numbers keep
/// increasing across evictions and `clear`.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
    evicted: u64,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            next_seq: 1,
            evicted: 0,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
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

    /// Number of entries dropped to stay within capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for LogBuffer {
    fn append(&mut self, level: LogLevel, message: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(LogEntry {
            seq,
            level,
            message,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
    }
}

/// Discards everything. Used where log output must not be observable,
/// e.g. construction-time fixture verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn append(&mut self, _level: LogLevel, _message: String) {}
}
