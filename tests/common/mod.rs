//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use caret::syntax::LanguageId;
use caret::text::Coordinates;
use caret::TextEditor;

/// Editor holding `text` with the caret at the origin
pub fn editor_with(text: &str) -> TextEditor {
    let mut editor = TextEditor::new();
    editor.set_text(text);
    editor
}

/// Editor holding `text`, fully colorized for `language`
pub fn colorized(text: &str, language: LanguageId) -> TextEditor {
    let mut editor = TextEditor::new();
    editor.set_language(language);
    editor.set_text(text);
    editor.colorize_all();
    editor
}

/// Place the single caret at a line and column, dropping any selection
pub fn cursor_at(editor: &mut TextEditor, line: usize, column: usize) {
    let pos = Coordinates::new(line, column);
    editor.set_selection(pos, pos, None);
}

/// Caret positions of every cursor, top to bottom
pub fn carets(editor: &TextEditor) -> Vec<(usize, usize)> {
    editor
        .state()
        .cursors()
        .iter()
        .map(|c| (c.interactive_end.line, c.interactive_end.column))
        .collect()
}

/// Selected text of every cursor, top to bottom
pub fn selections(editor: &TextEditor) -> Vec<String> {
    (0..editor.cursor_count())
        .map(|i| editor.selected_text(Some(i)))
        .collect()
}
