//! Selections and multi-cursor creation

use super::state::Cursor;
use super::TextEditor;
use crate::text::Coordinates;

impl TextEditor {
    pub fn clear_extra_cursors(&mut self) {
        self.state.clear_extra_cursors();
    }

    pub fn clear_selections(&mut self) {
        self.state.clear_selections();
    }

    pub fn any_cursor_has_selection(&self) -> bool {
        self.state.any_cursor_has_selection()
    }

    pub fn all_cursors_have_selection(&self) -> bool {
        self.state.all_cursors_have_selection()
    }

    /// Place a cursor at a character index, dropping its selection
    pub fn set_cursor_position(&mut self, line: usize, char_index: usize, cursor: Option<usize>) {
        let c = self.cursor_index(cursor);
        let line = line.min(self.buffer.last_line());
        let pos = self.buffer.coords_at(line, char_index);
        self.place_cursor(pos, c, true);
        self.on_cursor_position_changed();
    }

    /// Select `start..end` with a cursor; both ends are clamped to the
    /// document. The caret goes to `end`.
    pub fn set_selection(&mut self, start: Coordinates, end: Coordinates, cursor: Option<usize>) {
        let c = self.cursor_index(cursor);
        let last = self.buffer.last_line();
        let max = Coordinates::new(last, self.buffer.line_max_column(last));
        let start = start.min(max);
        let end = end.min(max);

        if let Some(target) = self.state.cursor_mut(c) {
            target.interactive_start = start;
        }
        self.place_cursor(end, c, false);
    }

    /// [`set_selection`](Self::set_selection) with character indices
    pub fn set_selection_chars(
        &mut self,
        start_line: usize,
        start_char: usize,
        end_line: usize,
        end_char: usize,
        cursor: Option<usize>,
    ) {
        let start = self.buffer.coords_at(start_line, start_char);
        let end = self.buffer.coords_at(end_line, end_char);
        self.set_selection(start, end, cursor);
    }

    /// Ordered selection bounds of a cursor
    pub fn selection(&self, cursor: Option<usize>) -> (Coordinates, Coordinates) {
        let c = self.cursor_index(cursor);
        self.state
            .cursor(c)
            .map_or((Coordinates::origin(), Coordinates::origin()), |c| {
                (c.selection_start(), c.selection_end())
            })
    }

    pub fn selected_text(&self, cursor: Option<usize>) -> String {
        let (start, end) = self.selection(cursor);
        self.buffer.text_range(start, end)
    }

    pub fn select_all(&mut self) {
        self.clear_selections();
        self.clear_extra_cursors();
        self.move_top(false);
        self.move_bottom(true);
    }

    pub fn select_line(&mut self, line: usize) {
        self.clear_selections();
        self.clear_extra_cursors();
        let line = line.min(self.buffer.last_line());
        let end = Coordinates::new(line, self.buffer.line_max_column(line));
        self.set_selection(Coordinates::new(line, 0), end, None);
        self.on_cursor_position_changed();
    }

    /// Single selection over a character-index range
    pub fn select_region(&mut self, start_line: usize, start_char: usize, end_line: usize, end_char: usize) {
        self.clear_selections();
        self.clear_extra_cursors();
        self.set_selection_chars(start_line, start_char, end_line, end_char, None);
        self.on_cursor_position_changed();
    }

    /// Select the run of characters under the current caret. Returns whether
    /// anything was selected.
    pub fn select_word_under_cursor(&mut self) -> bool {
        let caret = self.cursor_position();
        let start = self.buffer.find_word_start(caret);
        let end = self.buffer.find_word_end(caret);
        if start == end {
            return false;
        }
        self.set_selection(start, end, None);
        self.ensure_cursor_visible(None, true);
        self.on_cursor_position_changed();
        true
    }

    /// Reset to one cursor selecting the next match of `text` after the caret
    pub fn select_next_occurrence_of(&mut self, text: &str, case_sensitive: bool) -> bool {
        self.clear_selections();
        self.clear_extra_cursors();
        self.select_next_occurrence_with(text, case_sensitive, None)
    }

    fn select_next_occurrence_with(&mut self, text: &str, case_sensitive: bool, cursor: Option<usize>) -> bool {
        let c = self.cursor_index(cursor);
        let from = self.sanitized_cursor(c, false);
        let Some((start, end)) = self.buffer.find_next_occurrence(text, from, case_sensitive) else {
            return false;
        };
        self.set_selection(start, end, Some(c));
        self.ensure_cursor_visible(Some(c), true);
        self.on_cursor_position_changed();
        true
    }

    /// Select every match of `text`, one cursor each
    pub fn select_all_occurrences_of(&mut self, text: &str, case_sensitive: bool) {
        if !self.select_next_occurrence_of(text, case_sensitive) {
            return;
        }

        let first = self.state.last_added().interactive_end;
        // no document holds more matches than positions
        let limit: usize = self.buffer.lines().iter().map(|l| l.len() + 1).sum();
        for _ in 0..limit {
            if !self.add_cursor_for_next_occurrence(case_sensitive) {
                break;
            }
            if self.state.last_added().interactive_end == first {
                break;
            }
        }
        tracing::debug!("selected {} occurrence(s) of {:?}", self.state.cursor_count(), text);
    }

    /// Add a cursor selecting the next match of the last added cursor's
    /// selection. Returns `false` when there is no selection or no match.
    pub fn add_cursor_for_next_occurrence(&mut self, case_sensitive: bool) -> bool {
        let current = *self.state.last_added();
        if !current.has_selection() {
            return false;
        }

        let text = self
            .buffer
            .text_range(current.selection_start(), current.selection_end());
        let Some((start, end)) =
            self.buffer
                .find_next_occurrence(&text, current.selection_end(), case_sensitive)
        else {
            return false;
        };

        let c = self.state.add_cursor(Cursor::at(start));
        self.set_selection(start, end, Some(c));
        self.ensure_cursor_visible(None, true);
        self.on_cursor_position_changed();
        true
    }

    /// Ctrl+D: select the word under the caret, or extend to the next match
    pub fn select_word_or_next_occurrence(&mut self) {
        if self.state.any_cursor_has_selection() {
            self.add_cursor_for_next_occurrence(true);
        } else {
            self.select_word_under_cursor();
        }
    }

    /// Ctrl+Shift+L: select every match of the selection, or of the word
    /// under the caret. Case sensitivity follows the language.
    pub fn select_all_occurrences_of_selection(&mut self) {
        let case_sensitive = self.colorizer.language().map_or(true, |d| d.case_sensitive);
        let cursor = *self.state.last_added();
        let text = if cursor.has_selection() {
            self.buffer
                .text_range(cursor.selection_start(), cursor.selection_end())
        } else {
            let caret = self.cursor_position();
            let start = self.buffer.find_word_start(caret);
            let end = self.buffer.find_word_end(caret);
            self.buffer.text_range(start, end)
        };
        if !text.is_empty() {
            self.select_all_occurrences_of(&text, case_sensitive);
        }
    }

    pub fn add_cursors_above(&mut self) {
        self.add_cursors_with_line_offset(-1);
    }

    pub fn add_cursors_below(&mut self) {
        self.add_cursors_with_line_offset(1);
    }

    /// Copy every cursor onto the neighbouring line. Single-line selections
    /// are copied as selections; everything else becomes a caret at the
    /// caret's column.
    fn add_cursors_with_line_offset(&mut self, offset: isize) {
        let line_count = self.buffer.line_count();
        let mut added = Vec::with_capacity(self.state.cursor_count());

        for cursor in self.state.cursors() {
            let caret = self.buffer.sanitize(cursor.interactive_end);
            let Some(line) = caret.line.checked_add_signed(offset).filter(|&l| l < line_count) else {
                continue;
            };
            let max = self.buffer.line_max_column(line);

            if cursor.has_selection() && cursor.interactive_start.line == cursor.interactive_end.line {
                added.push(Cursor::new(
                    Coordinates::new(line, cursor.interactive_start.column.min(max)),
                    Coordinates::new(line, cursor.interactive_end.column.min(max)),
                ));
            } else {
                added.push(Cursor::at(Coordinates::new(line, caret.column.min(max))));
            }
        }

        if added.is_empty() {
            return;
        }
        for cursor in added {
            self.state.add_cursor(cursor);
        }
        self.ensure_cursor_visible(None, true);
        self.on_cursor_position_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(text: &str) -> TextEditor {
        let mut e = TextEditor::new();
        e.set_text(text);
        e
    }

    fn pos(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    #[test]
    fn test_select_all_covers_document() {
        let mut e = editor("abc\ndef\n");
        e.state.add_cursor(Cursor::at(pos(1, 1)));
        e.select_all();
        assert_eq!(e.cursor_count(), 1);
        assert_eq!(e.selection(None), (pos(0, 0), pos(2, 0)));
        assert_eq!(e.selected_text(None), "abc\ndef\n");
    }

    #[test]
    fn test_set_selection_clamps() {
        let mut e = editor("ab\ncd");
        e.set_selection(pos(0, 1), pos(9, 9), None);
        assert_eq!(e.selection(None), (pos(0, 1), pos(1, 2)));
        assert_eq!(e.selected_text(None), "b\ncd");
    }

    #[test]
    fn test_select_line_and_region() {
        let mut e = editor("\tone\ntwo");
        e.select_line(0);
        assert_eq!(e.selection(None), (pos(0, 0), pos(0, 7)));

        e.select_region(0, 1, 1, 2);
        assert_eq!(e.selected_text(None), "one\ntw");
    }

    #[test]
    fn test_set_cursor_position_uses_char_index() {
        let mut e = editor("\tx");
        e.set_cursor_position(0, 1, None);
        assert_eq!(e.cursor_position(), pos(0, 4));
    }

    #[test]
    fn test_select_word_under_cursor() {
        let mut e = editor("foo bar");
        e.set_cursor_position(0, 5, None);
        assert!(e.select_word_under_cursor());
        assert_eq!(e.selected_text(None), "bar");
    }

    #[test]
    fn test_add_cursor_for_next_occurrence_wraps() {
        let mut e = editor("x foo\nfoo y foo");
        e.set_selection(pos(1, 6), pos(1, 9), None);
        assert!(e.add_cursor_for_next_occurrence(true));
        assert_eq!(e.cursor_count(), 2);
        // wrapped to the first line and sorted to the front
        assert_eq!(e.state.cursors()[0], Cursor::new(pos(0, 2), pos(0, 5)));
        assert_eq!(e.state.last_added_index(), 0);
    }

    #[test]
    fn test_select_all_occurrences() {
        let mut e = editor("ab AB ab\nab");
        e.select_all_occurrences_of("ab", true);
        assert_eq!(e.cursor_count(), 3);
        assert!(e.all_cursors_have_selection());

        e.select_all_occurrences_of("ab", false);
        assert_eq!(e.cursor_count(), 4);

        e.select_all_occurrences_of("zz", true);
        assert_eq!(e.cursor_count(), 1);
        assert!(!e.any_cursor_has_selection());
    }

    #[test]
    fn test_select_all_occurrences_single_match_terminates() {
        let mut e = editor("only once");
        e.select_all_occurrences_of("once", true);
        assert_eq!(e.cursor_count(), 1);
        assert_eq!(e.selected_text(None), "once");
    }

    #[test]
    fn test_add_cursors_below_projects_columns() {
        let mut e = editor("long line\nab\nlonger line");
        e.set_cursor_position(0, 6, None);
        e.add_cursors_below();
        assert_eq!(e.cursor_count(), 2);
        assert_eq!(e.state.cursors()[1].interactive_end, pos(1, 2));

        e.clear_extra_cursors();
        e.set_selection(pos(2, 1), pos(2, 4), None);
        e.add_cursors_above();
        assert_eq!(e.state.cursors()[0], Cursor::new(pos(1, 1), pos(1, 2)));
    }

    #[test]
    fn test_add_cursor_above_first_line_is_noop() {
        let mut e = editor("a\nb");
        e.add_cursors_above();
        assert_eq!(e.cursor_count(), 1);
    }
}
