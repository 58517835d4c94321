//! Bounded undo/redo history of layer deltas.

use crate::layer::Layer;
use std::collections::VecDeque;

/// Maximum number of undo entries kept by default.
pub const MAX_UNDO: usize = 50;

/// A committed change: the delta that was applied and the delta that reverts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub forward: Layer,
    pub undo: Layer,
}

/// Fixed-capacity ring of history entries.
///
/// Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_UNDO)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Record a new change. Clears the redo stack.
    pub fn push(&mut self, forward: Layer, undo: Layer) {
        self.redo.clear();
        self.push_entry(HistoryEntry { forward, undo });
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(entry);
    }

    /// Take the newest entry to undo; the caller hands it back via [`History::undone`].
    pub fn take_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop_back()
    }

    /// Park an undone entry on the redo stack.
    pub fn undone(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    /// Take the newest undone entry to re-apply; the caller hands it back via [`History::redone`].
    pub fn take_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    /// Return a re-applied entry to the undo ring without clearing redo.
    pub fn redone(&mut self, entry: HistoryEntry) {
        self.push_entry(entry);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
