//! Cursor and multi-cursor state
//!
//! Every cursor is an (interactive start, interactive end) pair: the start
//! stays put while selecting and the end follows the caret. The selection is
//! the ordered pair of the two.

use serde::{Deserialize, Serialize};

use crate::text::Coordinates;

/// A caret plus its (possibly empty) selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// Fixed end of the selection
    pub interactive_start: Coordinates,
    /// Moving end of the selection (the caret)
    pub interactive_end: Coordinates,
}

impl Cursor {
    /// A cursor with no selection
    pub const fn at(pos: Coordinates) -> Self {
        Self {
            interactive_start: pos,
            interactive_end: pos,
        }
    }

    pub const fn new(start: Coordinates, end: Coordinates) -> Self {
        Self {
            interactive_start: start,
            interactive_end: end,
        }
    }

    #[inline]
    pub fn selection_start(&self) -> Coordinates {
        self.interactive_start.min(self.interactive_end)
    }

    #[inline]
    pub fn selection_end(&self) -> Coordinates {
        self.interactive_start.max(self.interactive_end)
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.interactive_start != self.interactive_end
    }

    /// Whether the caret sits before the anchor
    pub fn is_reversed(&self) -> bool {
        self.interactive_end < self.interactive_start
    }

    /// Drop the selection, keeping the caret where the selection ends
    pub fn collapse_to_end(&mut self) {
        let end = self.selection_end();
        *self = Cursor::at(end);
    }

    pub fn collapse_to_start(&mut self) {
        let start = self.selection_start();
        *self = Cursor::at(start);
    }

    /// Place the caret, optionally dropping the selection
    pub fn set_position(&mut self, pos: Coordinates, clear_selection: bool) {
        if clear_selection {
            self.interactive_start = pos;
        }
        self.interactive_end = pos;
    }
}

/// The ordered cursor set. Never empty.
///
/// The current cursor is always the last one; `last_added` tracks the most
/// recently created cursor through sorting and merging so occurrence search
/// can continue from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    cursors: Vec<Cursor>,
    last_added: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            cursors: vec![Cursor::default()],
            last_added: 0,
        }
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn cursors_mut(&mut self) -> &mut [Cursor] {
        &mut self.cursors
    }

    #[inline]
    pub fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    #[inline]
    pub fn has_multiple_cursors(&self) -> bool {
        self.cursors.len() > 1
    }

    /// Index of the current cursor
    #[inline]
    pub fn current_index(&self) -> usize {
        self.cursors.len() - 1
    }

    pub fn current(&self) -> &Cursor {
        &self.cursors[self.current_index()]
    }

    pub fn current_mut(&mut self) -> &mut Cursor {
        let idx = self.current_index();
        &mut self.cursors[idx]
    }

    pub fn cursor(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    pub fn cursor_mut(&mut self, index: usize) -> Option<&mut Cursor> {
        self.cursors.get_mut(index)
    }

    /// Index of the most recently added cursor
    pub fn last_added_index(&self) -> usize {
        if self.last_added < self.cursors.len() {
            self.last_added
        } else {
            0
        }
    }

    pub fn last_added(&self) -> &Cursor {
        &self.cursors[self.last_added_index()]
    }

    /// Append a cursor; it becomes both current and last added
    pub fn add_cursor(&mut self, cursor: Cursor) -> usize {
        self.cursors.push(cursor);
        self.last_added = self.cursors.len() - 1;
        self.last_added
    }

    /// Keep only the first cursor
    pub fn clear_extra_cursors(&mut self) {
        self.cursors.truncate(1);
        self.last_added = 0;
    }

    /// Collapse every selection onto its end
    pub fn clear_selections(&mut self) {
        for cursor in &mut self.cursors {
            cursor.collapse_to_end();
        }
    }

    pub fn any_cursor_has_selection(&self) -> bool {
        self.cursors.iter().any(Cursor::has_selection)
    }

    pub fn all_cursors_have_selection(&self) -> bool {
        self.cursors.iter().all(Cursor::has_selection)
    }

    /// Sort by selection start, keeping track of the last added cursor
    pub fn sort_cursors_top_to_bottom(&mut self) {
        let last_added = self.last_added().interactive_end;
        self.cursors.sort_by_key(Cursor::selection_start);
        self.relocate_last_added(last_added);
    }

    /// Merge overlapping selections into their union and collapse cursors
    /// sharing a position. Expects sorted cursors.
    ///
    /// Returns the number of cursors removed.
    pub fn merge_cursors_if_possible(&mut self) -> usize {
        let before = self.cursors.len();
        let last_added = self.last_added().interactive_end;
        let any_selection = self.any_cursor_has_selection();

        let mut merged: Vec<Cursor> = Vec::with_capacity(before);
        for cursor in self.cursors.drain(..) {
            let Some(prev) = merged.last_mut() else {
                merged.push(cursor);
                continue;
            };

            if any_selection {
                if prev.selection_end() >= cursor.selection_end() {
                    continue;
                }
                if prev.selection_end() > cursor.selection_start() {
                    *prev = Cursor::new(prev.selection_start(), cursor.selection_end());
                    continue;
                }
            } else if prev.interactive_end == cursor.interactive_end {
                continue;
            }
            merged.push(cursor);
        }

        self.cursors = merged;
        self.relocate_last_added(last_added);

        let removed = before - self.cursors.len();
        if removed > 0 {
            tracing::trace!("merged {} cursor(s), {} left", removed, self.cursors.len());
        }
        removed
    }

    fn relocate_last_added(&mut self, pos: Coordinates) {
        self.last_added = self
            .cursors
            .iter()
            .position(|c| c.interactive_end == pos)
            .unwrap_or(self.cursors.len() - 1);
    }

    /// Check ordering and non-overlap (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        assert!(!self.cursors.is_empty(), "cursor set is empty");
        for pair in self.cursors.windows(2) {
            assert!(
                pair[0].selection_start() <= pair[1].selection_start(),
                "cursors out of order: {:?}",
                pair
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    fn state_with(cursors: &[Cursor]) -> EditorState {
        let mut state = EditorState::new();
        state.cursors_mut()[0] = cursors[0];
        for c in &cursors[1..] {
            state.add_cursor(*c);
        }
        state
    }

    #[test]
    fn test_cursor_selection_bounds() {
        let c = Cursor::new(pos(2, 5), pos(1, 3));
        assert_eq!(c.selection_start(), pos(1, 3));
        assert_eq!(c.selection_end(), pos(2, 5));
        assert!(c.has_selection());
        assert!(c.is_reversed());
        assert!(!Cursor::at(pos(0, 0)).has_selection());
    }

    #[test]
    fn test_set_position_keeps_anchor_when_selecting() {
        let mut c = Cursor::at(pos(0, 2));
        c.set_position(pos(0, 6), false);
        assert_eq!(c.selection_start(), pos(0, 2));
        assert_eq!(c.selection_end(), pos(0, 6));
        c.set_position(pos(1, 0), true);
        assert!(!c.has_selection());
    }

    #[test]
    fn test_identical_cursors_collapse() {
        let mut state = state_with(&[Cursor::at(pos(0, 0)), Cursor::at(pos(0, 0))]);
        state.sort_cursors_top_to_bottom();
        assert_eq!(state.merge_cursors_if_possible(), 1);
        assert_eq!(state.cursor_count(), 1);
    }

    #[test]
    fn test_overlapping_selections_merge_into_union() {
        let mut state = state_with(&[
            Cursor::new(pos(0, 0), pos(0, 5)),
            Cursor::new(pos(0, 3), pos(0, 9)),
        ]);
        state.sort_cursors_top_to_bottom();
        state.merge_cursors_if_possible();
        assert_eq!(state.cursors(), &[Cursor::new(pos(0, 0), pos(0, 9))]);
    }

    #[test]
    fn test_contained_selection_dropped_and_merge_idempotent() {
        let mut state = state_with(&[
            Cursor::new(pos(0, 0), pos(0, 10)),
            Cursor::new(pos(0, 2), pos(0, 3)),
            Cursor::new(pos(0, 5), pos(0, 6)),
            Cursor::new(pos(1, 0), pos(1, 1)),
        ]);
        state.sort_cursors_top_to_bottom();
        state.merge_cursors_if_possible();
        assert_eq!(state.cursor_count(), 2);
        let snapshot = state.clone();
        assert_eq!(state.merge_cursors_if_possible(), 0);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_touching_selections_stay_separate() {
        let mut state = state_with(&[
            Cursor::new(pos(0, 0), pos(0, 3)),
            Cursor::new(pos(0, 3), pos(0, 6)),
        ]);
        state.merge_cursors_if_possible();
        assert_eq!(state.cursor_count(), 2);
    }

    #[test]
    fn test_sort_tracks_last_added() {
        let mut state = state_with(&[Cursor::at(pos(5, 0)), Cursor::at(pos(1, 0))]);
        assert_eq!(state.last_added_index(), 1);
        state.sort_cursors_top_to_bottom();
        assert_eq!(state.last_added().interactive_end, pos(1, 0));
        assert_eq!(state.last_added_index(), 0);
        assert_eq!(state.current().interactive_end, pos(5, 0));
    }

    #[test]
    fn test_clear_extra_cursors_and_selections() {
        let mut state = state_with(&[
            Cursor::new(pos(0, 0), pos(0, 2)),
            Cursor::new(pos(1, 0), pos(1, 2)),
        ]);
        assert!(state.all_cursors_have_selection());
        state.clear_selections();
        assert!(!state.any_cursor_has_selection());
        state.clear_extra_cursors();
        assert_eq!(state.cursors(), &[Cursor::at(pos(0, 2))]);
    }
}
