//! Command dispatch
//!
//! Every keyboard-driven change to an editor flows through [`update`].

use crate::clipboard::Clipboard;
use crate::editor::TextEditor;
use crate::keymap::Command;
use crate::tracing::CursorSnapshot;

/// Apply one command. Returns `false` when the command was ignored, which
/// happens for text-changing commands on a read-only editor and for
/// [`Command::Unbound`].
pub fn update(editor: &mut TextEditor, clipboard: &mut dyn Clipboard, command: Command) -> bool {
    if editor.is_read_only() && command.modifies_text() {
        tracing::debug!("ignoring {} on read-only editor", command);
        return false;
    }

    let before = CursorSnapshot::from_editor(editor);
    let applied = match command {
        Command::Unbound => false,
        Command::Copy => {
            editor.copy(clipboard);
            true
        }
        Command::Cut => {
            editor.cut(clipboard);
            true
        }
        Command::Paste => {
            editor.paste(clipboard);
            true
        }
        _ => update_movement(editor, command)
            || update_selection(editor, command)
            || update_document(editor, command),
    };

    if applied {
        let after = CursorSnapshot::from_editor(editor);
        match before.diff(&after) {
            Some(diff) => tracing::debug!("{}: {}", command, diff),
            None => tracing::trace!("{}", command),
        }
    }
    applied
}

/// Enter typed text. Control characters other than `\n` are dropped.
pub fn type_text(editor: &mut TextEditor, text: &str) {
    if editor.is_read_only() {
        return;
    }
    for ch in text.chars().filter(|&c| c == '\n' || !c.is_control()) {
        editor.enter_character(ch, false);
    }
}

fn update_movement(editor: &mut TextEditor, command: Command) -> bool {
    use Command::*;
    match command {
        MoveCursorUp => editor.move_up(1, false),
        MoveCursorDown => editor.move_down(1, false),
        MoveCursorLeft => editor.move_left(false, false),
        MoveCursorRight => editor.move_right(false, false),
        MoveCursorWordLeft => editor.move_left(false, true),
        MoveCursorWordRight => editor.move_right(false, true),
        MoveCursorLineStart => editor.move_home(false),
        MoveCursorLineEnd => editor.move_end(false),
        MoveCursorDocumentStart => editor.move_top(false),
        MoveCursorDocumentEnd => editor.move_bottom(false),
        PageUp => editor.page_up(false),
        PageDown => editor.page_down(false),

        MoveCursorUpWithSelection => editor.move_up(1, true),
        MoveCursorDownWithSelection => editor.move_down(1, true),
        MoveCursorLeftWithSelection => editor.move_left(true, false),
        MoveCursorRightWithSelection => editor.move_right(true, false),
        MoveCursorWordLeftWithSelection => editor.move_left(true, true),
        MoveCursorWordRightWithSelection => editor.move_right(true, true),
        MoveCursorLineStartWithSelection => editor.move_home(true),
        MoveCursorLineEndWithSelection => editor.move_end(true),
        MoveCursorDocumentStartWithSelection => editor.move_top(true),
        MoveCursorDocumentEndWithSelection => editor.move_bottom(true),
        PageUpWithSelection => editor.page_up(true),
        PageDownWithSelection => editor.page_down(true),

        _ => return false,
    }
    true
}

fn update_selection(editor: &mut TextEditor, command: Command) -> bool {
    use Command::*;
    match command {
        SelectAll => editor.select_all(),
        SelectWord => {
            editor.select_word_under_cursor();
        }
        SelectLine => editor.select_line(editor.cursor_position().line),
        ClearSelection => editor.clear_selections(),
        CollapseToSingleCursor => editor.clear_extra_cursors(),
        AddCursorAbove => editor.add_cursors_above(),
        AddCursorBelow => editor.add_cursors_below(),
        SelectNextOccurrence => editor.select_word_or_next_occurrence(),
        SelectAllOccurrences => editor.select_all_occurrences_of_selection(),
        _ => return false,
    }
    true
}

fn update_document(editor: &mut TextEditor, command: Command) -> bool {
    use Command::*;
    match command {
        InsertNewline => editor.enter_character('\n', false),
        InsertTab => editor.enter_character('\t', false),
        InsertBacktab => editor.enter_character('\t', true),
        DeleteBackward => editor.backspace(false),
        DeleteForward => editor.delete(false),
        DeleteWordBackward => editor.backspace(true),
        DeleteWordForward => editor.delete(true),
        DeleteLine => editor.remove_current_lines(),
        IndentLines => editor.change_current_lines_indentation(true),
        UnindentLines => editor.change_current_lines_indentation(false),
        MoveLinesUp => editor.move_up_current_lines(),
        MoveLinesDown => editor.move_down_current_lines(),
        ToggleLineComment => editor.toggle_line_comment(),
        Undo => editor.undo(1),
        Redo => editor.redo(1),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::text::Coordinates;

    fn editor(text: &str) -> TextEditor {
        let mut e = TextEditor::new();
        e.set_text(text);
        e
    }

    #[test]
    fn test_type_text_and_undo() {
        let mut e = editor("");
        let mut clipboard = MemoryClipboard::new();
        type_text(&mut e, "ab\u{7}c");
        assert_eq!(e.text(), "abc");

        assert!(update(&mut e, &mut clipboard, Command::Undo));
        assert_eq!(e.text(), "ab");
    }

    #[test]
    fn test_read_only_ignores_edits_but_moves_and_copies() {
        let mut e = editor("hello");
        e.set_read_only(true);
        let mut clipboard = MemoryClipboard::new();

        assert!(!update(&mut e, &mut clipboard, Command::DeleteForward));
        assert!(update(&mut e, &mut clipboard, Command::MoveCursorLineEndWithSelection));
        assert!(update(&mut e, &mut clipboard, Command::Cut));
        assert_eq!(e.text(), "hello");
        assert_eq!(clipboard.contents(), Some("hello"));

        type_text(&mut e, "x");
        assert_eq!(e.text(), "hello");
    }

    #[test]
    fn test_clipboard_round_trip() {
        let mut e = editor("one two");
        let mut clipboard = MemoryClipboard::new();
        update(&mut e, &mut clipboard, Command::MoveCursorWordRightWithSelection);
        update(&mut e, &mut clipboard, Command::Cut);
        assert_eq!(e.text(), " two");
        update(&mut e, &mut clipboard, Command::MoveCursorLineEnd);
        update(&mut e, &mut clipboard, Command::Paste);
        assert_eq!(e.text(), " twoone");
    }

    #[test]
    fn test_select_line_command() {
        let mut e = editor("a\nbc");
        let mut clipboard = MemoryClipboard::new();
        update(&mut e, &mut clipboard, Command::MoveCursorDown);
        update(&mut e, &mut clipboard, Command::SelectLine);
        assert_eq!(e.selection(None), (Coordinates::new(1, 0), Coordinates::new(1, 2)));
        assert!(!update(&mut e, &mut clipboard, Command::Unbound));
    }
}
