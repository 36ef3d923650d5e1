//! Bounded undo history.
//!
//! Holds schedule snapshots taken just before each committed mutation.
//! When the stack is full the oldest snapshot is dropped.

use std::collections::VecDeque;

use crate::models::{Schedule, ScheduledRound};

/// Default number of undo steps kept.
pub const HISTORY_LIMIT: usize = 20;

/// Undo stack of prior schedules.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Schedule>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates an empty history holding up to [`HISTORY_LIMIT`] snapshots.
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Creates an empty history with a custom capacity. Zero means the default.
    pub fn with_limit(limit: usize) -> Self {
        let limit = if limit == 0 { HISTORY_LIMIT } else { limit };
        Self {
            snapshots: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Records a snapshot, evicting the oldest beyond the limit.
    pub fn push(&mut self, snapshot: Schedule) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }
    }

    /// Takes the most recent snapshot.
    pub fn pop(&mut self) -> Option<Schedule> {
        self.snapshots.pop_back()
    }

    /// Most recent snapshot without removing it.
    pub fn peek(&self) -> Option<&Schedule> {
        self.snapshots.back()
    }

    /// Drops entries failing the predicate from every snapshot.
    pub fn retain_entries(&mut self, mut f: impl FnMut(&ScheduledRound) -> bool) {
        for snapshot in &mut self.snapshots {
            snapshot.retain(&mut f);
        }
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum number of snapshots kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forgets all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
