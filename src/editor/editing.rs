//! Typing, deletion, clipboard and undo/redo
//!
//! Every command here records one [`UndoRecord`](super::UndoRecord): the
//! operations it applied plus the cursor state before and after. Selections
//! are always removed first (last cursor to first, so earlier coordinates
//! stay valid), then text goes in at each caret in the same order.

use super::history::{UndoOperation, UndoOperationType};
use super::movement::MoveDirection;
use super::TextEditor;
use crate::clipboard::Clipboard;

impl TextEditor {
    /// Mutation guard: editing a read-only editor is a caller bug, caught in
    /// debug builds and ignored otherwise
    pub(crate) fn check_writable(&self) -> bool {
        debug_assert!(!self.is_read_only(), "editing a read-only editor");
        !self.is_read_only()
    }

    /// Delete every selection, last cursor first, returning the operations
    pub(crate) fn delete_selections(&mut self) -> Vec<UndoOperation> {
        let mut operations = Vec::new();
        for c in (0..self.state.cursor_count()).rev() {
            let Some(cursor) = self.state.cursor(c).copied() else {
                continue;
            };
            if !cursor.has_selection() {
                continue;
            }
            let start = self.buffer.sanitize(cursor.selection_start());
            let end = self.buffer.sanitize(cursor.selection_end());
            operations.push(UndoOperation::delete(
                self.buffer.text_range(start, end),
                start,
                end,
            ));
            self.delete_selection(c);
        }
        operations
    }

    /// Type one character at every caret, replacing selections.
    ///
    /// Tab over a multi-line selection indents instead (outdents with
    /// `shift`); a newline copies the line's leading blanks when auto indent
    /// is on.
    pub fn enter_character(&mut self, ch: char, shift: bool) {
        if !self.check_writable() {
            return;
        }

        let multi_line_selection = self
            .state
            .cursors()
            .iter()
            .any(|c| c.selection_start().line != c.selection_end().line);
        if ch == '\t' && multi_line_selection {
            self.change_current_lines_indentation(!shift);
            return;
        }

        let before = self.state.clone();
        let mut operations = self.delete_selections();

        for c in (0..self.state.cursor_count()).rev() {
            let start = self.sanitized_cursor(c, false);
            let text = if ch == '\n' {
                let mut text = String::from("\n");
                if self.auto_indent() {
                    text.extend(
                        self.buffer
                            .line(start.line)
                            .iter()
                            .map(|g| g.byte)
                            .take_while(|&b| b == b' ' || b == b'\t')
                            .map(char::from),
                    );
                }
                text
            } else {
                ch.to_string()
            };

            let end = self.insert_text_at_cursor(&text, c);
            operations.push(UndoOperation::add(text, start, end));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    /// Delete the character (or word) before each caret, or the selections
    pub fn backspace(&mut self, word_mode: bool) {
        self.delete_adjacent(MoveDirection::Left, word_mode);
    }

    /// Delete the character (or word) after each caret, or the selections
    pub fn delete(&mut self, word_mode: bool) {
        self.delete_adjacent(MoveDirection::Right, word_mode);
    }

    fn delete_adjacent(&mut self, direction: MoveDirection, word_mode: bool) {
        if !self.check_writable() {
            return;
        }

        let before = self.state.clone();
        if !self.state.any_cursor_has_selection() {
            // grow each caret into a one-character selection first
            self.move_horizontal(direction, true, word_mode);
            if !self.state.all_cursors_have_selection() {
                // some caret sits at the document edge
                self.state = before;
                return;
            }
            self.on_cursor_position_changed();
        }

        let operations = self.delete_selections();
        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// All selections joined with `\n`, top to bottom
    pub fn clipboard_text(&self) -> String {
        self.state
            .cursors()
            .iter()
            .filter(|c| c.has_selection())
            .map(|c| self.buffer.text_range(c.selection_start(), c.selection_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Copy the selections, or the current line with its newline when
    /// nothing is selected
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        let text = if self.state.any_cursor_has_selection() {
            self.clipboard_text()
        } else {
            let line = self.cursor_position().line;
            format!("{}\n", self.buffer.line_text(line))
        };

        if let Err(e) = clipboard.set_text(&text) {
            tracing::warn!("copy to {} clipboard failed: {}", clipboard.name(), e);
        }
    }

    /// Copy then delete the selections. A read-only editor only copies.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) {
        if self.is_read_only() {
            self.copy(clipboard);
            return;
        }
        if !self.state.any_cursor_has_selection() {
            return;
        }

        let before = self.state.clone();
        self.copy(clipboard);
        let operations = self.delete_selections();
        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    /// Insert the clipboard text; an empty or unreadable clipboard is ignored
    pub fn paste(&mut self, clipboard: &dyn Clipboard) {
        if self.is_read_only() {
            return;
        }
        match clipboard.get_text() {
            Ok(text) => self.insert_text(&text),
            Err(e) => tracing::debug!("nothing to paste from {}: {}", clipboard.name(), e),
        }
    }

    /// Insert text at every caret, replacing selections. When there are
    /// several cursors and the text has exactly one line per cursor, each
    /// cursor receives its own line.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() || !self.check_writable() {
            return;
        }

        let count = self.state.cursor_count();
        let pieces: Vec<&str> = text.split('\n').collect();
        let per_cursor = count > 1 && pieces.len() == count;

        let before = self.state.clone();
        let mut operations = self.delete_selections();

        for c in (0..count).rev() {
            let piece = if per_cursor { pieces[c] } else { text };
            if piece.is_empty() {
                continue;
            }
            let start = self.sanitized_cursor(c, false);
            let end = self.insert_text_at_cursor(piece, c);
            operations.push(UndoOperation::add(piece.to_owned(), start, end));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    /// Replace a character-index range through one cursor. Returns `false`
    /// for a read-only editor.
    pub fn replace_range(
        &mut self,
        start_line: usize,
        start_char: usize,
        end_line: usize,
        end_char: usize,
        text: &str,
        cursor: Option<usize>,
    ) -> bool {
        if self.is_read_only() {
            return false;
        }

        let c = self.cursor_index(cursor);
        let before = self.state.clone();
        self.set_selection_chars(start_line, start_char, end_line, end_char, Some(c));

        let mut operations = Vec::new();
        if let Some(cursor) = self.state.cursor(c).copied() {
            if cursor.has_selection() {
                let start = self.buffer.sanitize(cursor.selection_start());
                let end = self.buffer.sanitize(cursor.selection_end());
                operations.push(UndoOperation::delete(
                    self.buffer.text_range(start, end),
                    start,
                    end,
                ));
                self.delete_selection(c);
            }
        }

        if !text.is_empty() {
            let start = self.sanitized_cursor(c, false);
            let end = self.insert_text_at_cursor(text, c);
            operations.push(UndoOperation::add(text.to_owned(), start, end));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
        true
    }

    // =========================================================================
    // Undo / redo
    // =========================================================================

    pub fn can_undo(&self) -> bool {
        !self.is_read_only() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_read_only() && self.history.can_redo()
    }

    /// Revert up to `steps` records
    pub fn undo(&mut self, steps: usize) {
        for _ in 0..steps {
            if !self.can_undo() {
                break;
            }
            let Some(record) = self.history.step_undo().cloned() else {
                break;
            };

            for op in record.operations.iter().rev() {
                if op.text.is_empty() {
                    continue;
                }
                match op.kind {
                    UndoOperationType::Delete => {
                        self.insert_text_at(op.start, &op.text);
                    }
                    UndoOperationType::Add => self.delete_range(op.start, op.end),
                }
                self.colorize_operation(op.start.line, op.end.line);
            }

            self.state = record.before;
            self.after_history_step();
        }
    }

    /// Reapply up to `steps` undone records
    pub fn redo(&mut self, steps: usize) {
        for _ in 0..steps {
            if !self.can_redo() {
                break;
            }
            let Some(record) = self.history.step_redo().cloned() else {
                break;
            };

            for op in &record.operations {
                if op.text.is_empty() {
                    continue;
                }
                match op.kind {
                    UndoOperationType::Delete => self.delete_range(op.start, op.end),
                    UndoOperationType::Add => {
                        self.insert_text_at(op.start, &op.text);
                    }
                }
                self.colorize_operation(op.start.line, op.end.line);
            }

            self.state = record.after;
            self.after_history_step();
        }
    }

    fn colorize_operation(&mut self, start_line: usize, end_line: usize) {
        self.colorize(
            start_line.saturating_sub(1),
            Some(end_line.saturating_sub(start_line) + 2),
        );
    }

    fn after_history_step(&mut self) {
        self.ensure_cursor_visible(None, false);
        self.on_cursor_position_changed();
    }
}
