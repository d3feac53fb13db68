//! Caret movement
//!
//! Horizontal moves step over whole UTF-8 characters and wrap across line
//! ends; word mode jumps over a run of one character class. Vertical moves
//! change only the line and keep the raw column, so a caret passing a short
//! line returns to its column on the next long one.

use super::TextEditor;
use crate::text::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl TextEditor {
    /// Where `coords` ends up after moving in `direction`. `amount` only
    /// applies to vertical moves.
    pub fn move_coords(
        &self,
        coords: Coordinates,
        direction: MoveDirection,
        word_mode: bool,
        amount: usize,
    ) -> Coordinates {
        let last_line = self.buffer.last_line();
        match direction {
            MoveDirection::Up => Coordinates::new(coords.line.saturating_sub(amount), coords.column),
            MoveDirection::Down => Coordinates::new(
                coords.line.saturating_add(amount).min(last_line),
                coords.column,
            ),
            MoveDirection::Right => {
                let pos = self.buffer.sanitize(coords);
                let index = self.char_index_right(pos);
                if index >= self.buffer.line_len(pos.line) {
                    if pos.line < last_line {
                        return Coordinates::new(pos.line + 1, 0);
                    }
                    return pos;
                }

                let next = self
                    .buffer
                    .next_char(pos.line, index, true)
                    .map_or(index, |(_, i)| i);
                let one_step = self.buffer.coords_at(pos.line, next);
                if word_mode {
                    let end = self.buffer.find_word_end(pos);
                    Coordinates::new(pos.line, end.column.max(one_step.column))
                } else {
                    one_step
                }
            }
            MoveDirection::Left => {
                let pos = self.buffer.sanitize(coords);
                let index = self.char_index_right(pos);
                if index == 0 {
                    if pos.line > 0 {
                        let line = pos.line - 1;
                        return Coordinates::new(line, self.buffer.line_max_column(line));
                    }
                    return pos;
                }

                let prev = self
                    .buffer
                    .prev_char(pos.line, index, true)
                    .map_or(0, |(_, i)| i);
                let one_step = self.buffer.coords_at(pos.line, prev);
                if word_mode {
                    self.buffer.find_word_start(one_step)
                } else {
                    one_step
                }
            }
        }
    }

    /// Move every caret vertically by `amount` lines
    pub fn move_up(&mut self, amount: usize, select: bool) {
        self.move_vertical(MoveDirection::Up, amount, select);
    }

    pub fn move_down(&mut self, amount: usize, select: bool) {
        self.move_vertical(MoveDirection::Down, amount, select);
    }

    fn move_vertical(&mut self, direction: MoveDirection, amount: usize, select: bool) {
        for c in 0..self.state.cursor_count() {
            let end = self.state.cursors()[c].interactive_end;
            let target = self.move_coords(end, direction, false, amount);
            self.place_cursor(target, c, !select);
        }
        self.on_cursor_position_changed();
    }

    pub fn move_left(&mut self, select: bool, word_mode: bool) {
        self.move_horizontal(MoveDirection::Left, select, word_mode);
        self.on_cursor_position_changed();
    }

    pub fn move_right(&mut self, select: bool, word_mode: bool) {
        self.move_horizontal(MoveDirection::Right, select, word_mode);
        self.on_cursor_position_changed();
    }

    /// Horizontal move without the sort/merge pass. A plain move with any
    /// selection present collapses each cursor to the matching selection edge
    /// instead of stepping.
    pub(crate) fn move_horizontal(&mut self, direction: MoveDirection, select: bool, word_mode: bool) {
        let collapse = self.state.any_cursor_has_selection() && !select && !word_mode;
        for c in 0..self.state.cursor_count() {
            let cursor = self.state.cursors()[c];
            let target = if collapse {
                match direction {
                    MoveDirection::Left => cursor.selection_start(),
                    _ => cursor.selection_end(),
                }
            } else {
                self.move_coords(cursor.interactive_end, direction, word_mode, 1)
            };
            self.place_cursor(target, c, !select);
        }
    }

    /// Current caret to the start of the document
    pub fn move_top(&mut self, select: bool) {
        let current = self.state.current_index();
        self.place_cursor(Coordinates::origin(), current, !select);
        self.on_cursor_position_changed();
    }

    /// Current caret to the end of the document
    pub fn move_bottom(&mut self, select: bool) {
        let last = self.buffer.last_line();
        let end = Coordinates::new(last, self.buffer.line_max_column(last));
        let current = self.state.current_index();
        self.place_cursor(end, current, !select);
        self.on_cursor_position_changed();
    }

    pub fn move_home(&mut self, select: bool) {
        for c in 0..self.state.cursor_count() {
            let line = self.state.cursors()[c].interactive_end.line;
            self.place_cursor(Coordinates::new(line, 0), c, !select);
        }
        self.on_cursor_position_changed();
    }

    pub fn move_end(&mut self, select: bool) {
        for c in 0..self.state.cursor_count() {
            let line = self.state.cursors()[c].interactive_end.line;
            let column = self.buffer.line_max_column(line);
            self.place_cursor(Coordinates::new(line, column), c, !select);
        }
        self.on_cursor_position_changed();
    }

    /// Lines moved by one page: the visible rows minus two of overlap
    pub fn page_size(&self) -> usize {
        self.visible_line_count().saturating_sub(2).max(1)
    }

    pub fn page_up(&mut self, select: bool) {
        self.move_up(self.page_size(), select);
    }

    pub fn page_down(&mut self, select: bool) {
        self.move_down(self.page_size(), select);
    }
}
