//! Undo/redo history
//!
//! A record bundles the buffer operations of one user action with the full
//! cursor state before and after it. Replaying restores the stored state
//! rather than re-deriving cursor positions.

use serde::{Deserialize, Serialize};

use super::state::EditorState;
use crate::text::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOperationType {
    Add,
    Delete,
}

/// One buffer change: `text` was added at, or deleted from, `start..end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoOperation {
    pub text: String,
    pub start: Coordinates,
    pub end: Coordinates,
    pub kind: UndoOperationType,
}

impl UndoOperation {
    pub fn add(text: String, start: Coordinates, end: Coordinates) -> Self {
        debug_assert!(start <= end, "undo operation out of order");
        Self {
            text,
            start,
            end,
            kind: UndoOperationType::Add,
        }
    }

    pub fn delete(text: String, start: Coordinates, end: Coordinates) -> Self {
        debug_assert!(start <= end, "undo operation out of order");
        Self {
            text,
            start,
            end,
            kind: UndoOperationType::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub operations: Vec<UndoOperation>,
    pub before: EditorState,
    pub after: EditorState,
}

impl UndoRecord {
    pub fn new(operations: Vec<UndoOperation>, before: EditorState, after: EditorState) -> Self {
        Self {
            operations,
            before,
            after,
        }
    }
}

/// Linear history with a cursor into it
///
/// Records `[0, index)` can be undone and `[index, len)` redone. Pushing
/// discards everything at or past `index`.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    records: Vec<UndoRecord>,
    index: usize,
    /// Maximum records kept; 0 keeps everything
    limit: usize,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.truncate(self.index);
        self.records.push(record);
        self.index = self.records.len();
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        if self.limit == 0 || self.records.len() <= self.limit {
            return;
        }
        let excess = self.records.len() - self.limit;
        self.records.drain(..excess);
        self.index = self.index.saturating_sub(excess);
        tracing::trace!("undo history trimmed by {}", excess);
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }

    /// Step back, returning the record to revert
    pub fn step_undo(&mut self) -> Option<&UndoRecord> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.records.get(self.index)
    }

    /// Step forward, returning the record to reapply
    pub fn step_redo(&mut self) -> Option<&UndoRecord> {
        let record = self.records.get(self.index)?;
        self.index += 1;
        Some(record)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
    }

    pub fn undo_count(&self) -> usize {
        self.index
    }

    pub fn redo_count(&self) -> usize {
        self.records.len() - self.index
    }
}
