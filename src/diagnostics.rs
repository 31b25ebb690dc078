//! Session diagnostics.
//!
//! Counts how sessions ended and keeps the last few outcomes in a
//! fixed-capacity ring (no heap).  Updated by the session controller after
//! cleanup, outside any timing-critical window.

use heapless::HistoryBuffer;

use crate::error::Error;

const HISTORY_SLOTS: usize = 8;

/// How a single session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Completed,
    Abandoned,
    Fault(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub session: u32,
    pub kind: RecordKind,
    pub nibbles_sent: u8,
}

/// Counters plus a short history of recent sessions.
#[derive(Debug, Default)]
pub struct SessionStats {
    completed: u32,
    abandoned: u32,
    faulted: u32,
    history: HistoryBuffer<SessionRecord, HISTORY_SLOTS>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: SessionRecord) {
        match record.kind {
            RecordKind::Completed => self.completed = self.completed.wrapping_add(1),
            RecordKind::Abandoned => self.abandoned = self.abandoned.wrapping_add(1),
            RecordKind::Fault(_) => self.faulted = self.faulted.wrapping_add(1),
        }
        self.history.write(record);
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn abandoned(&self) -> u32 {
        self.abandoned
    }

    pub fn faulted(&self) -> u32 {
        self.faulted
    }

    pub fn total(&self) -> u32 {
        self.completed
            .wrapping_add(self.abandoned)
            .wrapping_add(self.faulted)
    }

    pub fn last(&self) -> Option<&SessionRecord> {
        self.history.recent()
    }

    /// Recent sessions, oldest first (at most 8).
    pub fn recent(&self) -> impl Iterator<Item = &SessionRecord> {
        self.history.oldest_ordered()
    }
}
