//! Line-wise batch commands
//!
//! Each command works on the set of lines covered by the cursors. A
//! selection that ends exactly at column 0 does not pull that last line in.

use std::collections::BTreeSet;

use super::history::UndoOperation;
use super::{Shift, TextEditor};
use crate::text::{Coordinates, Lean};

impl TextEditor {
    /// Lines covered by any cursor, ascending
    pub fn selected_lines(&self) -> BTreeSet<usize> {
        let mut lines = BTreeSet::new();
        for cursor in self.state.cursors() {
            let start = self.buffer.sanitize(cursor.selection_start());
            let end = self.buffer.sanitize(cursor.selection_end());
            for line in start.line..=end.line {
                if start != end && Coordinates::new(line, 0) == end {
                    continue;
                }
                lines.insert(line);
            }
        }
        lines
    }

    /// Indent (tab at the line start) or outdent every selected non-empty
    /// line. Outdent drops the first tab width of columns, and only when
    /// they are all blank.
    pub fn change_current_lines_indentation(&mut self, increase: bool) {
        if !self.check_writable() {
            return;
        }

        let before = self.state.clone();
        let mut operations = Vec::new();

        for line in self.selected_lines().into_iter().rev() {
            let start = Coordinates::new(line, 0);
            if increase {
                if self.buffer.line_len(line) == 0 {
                    continue;
                }
                let end = self.insert_text_at(start, "\t");
                operations.push(UndoOperation::add("\t".to_owned(), start, end));
            } else {
                let count = self
                    .buffer
                    .column_to_char_index(line, self.buffer.tab_size(), Lean::Left);
                let blank = self.buffer.line(line)[..count]
                    .iter()
                    .all(|g| g.byte == b' ' || g.byte == b'\t');
                if count == 0 || !blank {
                    continue;
                }
                let end = self.buffer.coords_at(line, count);
                operations.push(UndoOperation::delete(
                    self.buffer.text_range(start, end),
                    start,
                    end,
                ));
                self.delete_range(start, end);
            }
            self.colorize(line, Some(1));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    /// Swap the selected lines with the line above them
    pub fn move_up_current_lines(&mut self) {
        if !self.check_writable() {
            return;
        }
        let lines = self.selected_lines();
        let (Some(&min), Some(&max)) = (lines.first(), lines.last()) else {
            return;
        };
        if min == 0 {
            return;
        }

        let before = self.state.clone();
        let start = Coordinates::new(min - 1, 0);
        let old_end = Coordinates::new(max, self.buffer.line_max_column(max));
        let removed = self.buffer.text_range(start, old_end);

        self.edit_buffer(
            |_, _| Shift::Lines(-1),
            |buffer| {
                for &line in &lines {
                    buffer.swap_lines(line - 1, line);
                }
            },
        );

        let new_end = Coordinates::new(max, self.buffer.line_max_column(max));
        let operations = vec![
            UndoOperation::delete(removed, start, old_end),
            UndoOperation::add(self.buffer.text_range(start, new_end), start, new_end),
        ];
        self.colorize(min - 1, Some(max - min + 2));
        self.ensure_cursor_visible(None, false);
        self.push_undo(operations, before);
    }

    /// Swap the selected lines with the line below them. A trailing empty
    /// line is never swapped upwards.
    pub fn move_down_current_lines(&mut self) {
        if !self.check_writable() {
            return;
        }
        let lines = self.selected_lines();
        let (Some(&min), Some(&max)) = (lines.first(), lines.last()) else {
            return;
        };
        let trailing_empty = self.buffer.line_len(self.buffer.last_line()) == 0;
        let last_movable = self
            .buffer
            .last_line()
            .saturating_sub(usize::from(trailing_empty));
        if max >= last_movable {
            return;
        }

        let before = self.state.clone();
        let start = Coordinates::new(min, 0);
        let old_end = Coordinates::new(max + 1, self.buffer.line_max_column(max + 1));
        let removed = self.buffer.text_range(start, old_end);

        self.edit_buffer(
            |_, _| Shift::Lines(1),
            |buffer| {
                for &line in lines.iter().rev() {
                    buffer.swap_lines(line, line + 1);
                }
            },
        );

        let new_end = Coordinates::new(max + 1, self.buffer.line_max_column(max + 1));
        let operations = vec![
            UndoOperation::delete(removed, start, old_end),
            UndoOperation::add(self.buffer.text_range(start, new_end), start, new_end),
        ];
        self.colorize(min, Some(max - min + 2));
        self.ensure_cursor_visible(None, false);
        self.push_undo(operations, before);
    }

    /// Comment out the selected lines with the language's line comment, or
    /// uncomment them when every non-blank one is already commented
    pub fn toggle_line_comment(&mut self) {
        if !self.check_writable() {
            return;
        }
        let Some(comment) = self
            .colorizer
            .language()
            .map(|d| d.single_line_comment)
            .filter(|c| !c.is_empty())
        else {
            return;
        };

        // (line, index of the first non-blank byte)
        let targets: Vec<(usize, usize)> = self
            .selected_lines()
            .into_iter()
            .filter_map(|line| {
                let glyphs = self.buffer.line(line);
                glyphs
                    .iter()
                    .position(|g| g.byte != b' ' && g.byte != b'\t')
                    .map(|index| (line, index))
            })
            .collect();

        let commented = |editor: &Self, line: usize, index: usize| {
            let glyphs = editor.buffer.line(line);
            glyphs.len() >= index + comment.len()
                && glyphs[index..index + comment.len()]
                    .iter()
                    .map(|g| g.byte)
                    .eq(comment.bytes())
        };
        let add = targets
            .iter()
            .any(|&(line, index)| !commented(self, line, index));

        let before = self.state.clone();
        let mut operations = Vec::new();
        for &(line, index) in targets.iter().rev() {
            if add {
                let text = format!("{} ", comment);
                let start = Coordinates::new(line, 0);
                let end = self.insert_text_at(start, &text);
                operations.push(UndoOperation::add(text, start, end));
            } else {
                let mut stop = index + comment.len();
                if self.buffer.line(line).get(stop).is_some_and(|g| g.byte == b' ') {
                    stop += 1;
                }
                let start = self.buffer.coords_at(line, index);
                let end = self.buffer.coords_at(line, stop);
                operations.push(UndoOperation::delete(
                    self.buffer.text_range(start, end),
                    start,
                    end,
                ));
                self.delete_range(start, end);
            }
            self.colorize(line, Some(1));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }

    /// Delete the selections, then every line holding a caret
    pub fn remove_current_lines(&mut self) {
        if !self.check_writable() {
            return;
        }

        let before = self.state.clone();
        let mut operations = self.delete_selections();
        self.move_home(false);

        for c in (0..self.state.cursor_count()).rev() {
            let line = self.state.cursors()[c].interactive_end.line;
            let (start, end, caret) = if line < self.buffer.last_line() {
                (Coordinates::new(line, 0), Coordinates::new(line + 1, 0), line)
            } else if line > 0 {
                (
                    Coordinates::new(line - 1, self.buffer.line_max_column(line - 1)),
                    Coordinates::new(line, self.buffer.line_max_column(line)),
                    line - 1,
                )
            } else {
                (
                    Coordinates::new(line, 0),
                    Coordinates::new(line, self.buffer.line_max_column(line)),
                    line,
                )
            };

            if start < end {
                operations.push(UndoOperation::delete(
                    self.buffer.text_range(start, end),
                    start,
                    end,
                ));
                self.delete_range(start, end);
            }
            self.place_cursor(Coordinates::new(caret, 0), c, true);
            self.colorize(start.line, Some(1));
        }

        self.on_cursor_position_changed();
        self.push_undo(operations, before);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Cursor;
    use crate::syntax::LanguageId;

    fn editor(text: &str) -> TextEditor {
        let mut e = TextEditor::new();
        e.set_text(text);
        e
    }

    fn pos(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    #[test]
    fn test_selection_ending_at_line_start_skips_line() {
        let mut e = editor("a\nb\nc");
        e.state.cursors_mut()[0] = Cursor::new(pos(0, 0), pos(2, 0));
        assert_eq!(e.selected_lines().into_iter().collect::<Vec<_>>(), vec![0, 1]);
        e.state.cursors_mut()[0] = Cursor::at(pos(2, 0));
        assert_eq!(e.selected_lines().into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_indent_and_outdent() {
        let mut e = editor("a\n\n  b\n      c");
        e.state.cursors_mut()[0] = Cursor::new(pos(0, 0), pos(3, 1));
        e.change_current_lines_indentation(true);
        assert_eq!(e.text(), "\ta\n\n\t  b\n\t      c");

        e.change_current_lines_indentation(false);
        assert_eq!(e.text(), "a\n\n  b\n      c");
        // "b" sits inside the first tab width, so the line stays
        e.change_current_lines_indentation(false);
        assert_eq!(e.text(), "a\n\n  b\n  c");

        e.undo(3);
        assert_eq!(e.text(), "a\n\n  b\n      c");
        assert_eq!(e.state.current(), &Cursor::new(pos(0, 0), pos(3, 1)));
    }

    #[test]
    fn test_tab_over_multi_line_selection_indents() {
        let mut e = editor("x\ny");
        e.state.cursors_mut()[0] = Cursor::new(pos(0, 0), pos(1, 1));
        e.enter_character('\t', false);
        assert_eq!(e.text(), "\tx\n\ty");
        e.enter_character('\t', true);
        assert_eq!(e.text(), "x\ny");
    }

    #[test]
    fn test_move_lines_up_and_down() {
        let mut e = editor("one\ntwo\nthree\n");
        e.state.cursors_mut()[0] = Cursor::at(pos(2, 1));
        e.move_up_current_lines();
        assert_eq!(e.text(), "one\nthree\ntwo\n");
        assert_eq!(e.cursor_position(), pos(1, 1));

        e.move_down_current_lines();
        assert_eq!(e.text(), "one\ntwo\nthree\n");
        // the trailing empty line stays last
        e.move_down_current_lines();
        assert_eq!(e.text(), "one\ntwo\nthree\n");

        e.undo(2);
        assert_eq!(e.text(), "one\ntwo\nthree\n");
        assert_eq!(e.cursor_position(), pos(2, 1));
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut e = editor("a\nb");
        e.move_up_current_lines();
        assert_eq!(e.text(), "a\nb");
        assert!(!e.can_undo());
    }

    #[test]
    fn test_toggle_line_comment() {
        let mut e = editor("int a;\n\n  // b\n");
        e.set_language(LanguageId::Cpp);
        e.state.cursors_mut()[0] = Cursor::new(pos(0, 0), pos(2, 2));
        e.toggle_line_comment();
        assert_eq!(e.text(), "// int a;\n\n//   // b\n");

        e.toggle_line_comment();
        assert_eq!(e.text(), "int a;\n\n  // b\n");
        e.toggle_line_comment();
        e.undo(1);
        assert_eq!(e.text(), "int a;\n\n  // b\n");
    }

    #[test]
    fn test_toggle_line_comment_without_language() {
        let mut e = editor("text");
        e.toggle_line_comment();
        assert_eq!(e.text(), "text");
    }

    #[test]
    fn test_remove_current_lines() {
        let mut e = editor("a\nb\nc");
        e.state.cursors_mut()[0] = Cursor::at(pos(1, 1));
        e.remove_current_lines();
        assert_eq!(e.text(), "a\nc");
        assert_eq!(e.cursor_position(), pos(1, 0));

        e.remove_current_lines();
        assert_eq!(e.text(), "a");
        assert_eq!(e.cursor_position(), pos(0, 0));

        e.remove_current_lines();
        assert_eq!(e.text(), "");
        assert_eq!(e.line_count(), 1);

        e.undo(3);
        assert_eq!(e.text(), "a\nb\nc");
    }

    #[test]
    fn test_remove_lines_with_several_cursors() {
        let mut e = editor("1\n2\n3\n4");
        e.state.cursors_mut()[0] = Cursor::at(pos(0, 0));
        e.state.add_cursor(Cursor::at(pos(2, 1)));
        e.remove_current_lines();
        assert_eq!(e.text(), "2\n4");
        e.undo(1);
        assert_eq!(e.text(), "1\n2\n3\n4");
    }
}
