//! Multi-cursor behavior tests
//!
//! Tests for multi-cursor operations including:
//! - Adding cursors above and below
//! - Occurrence selection
//! - Editing through several cursors
//! - Cursor deduplication

mod common;

use caret::syntax::LanguageId;
use caret::text::Coordinates;
use common::{carets, cursor_at, editor_with, selections};

// ========================================================================
// AddCursorAbove/Below Tests
// ========================================================================

#[test]
fn test_add_cursors_below_twice() {
    let mut editor = editor_with("line 0\nline 1\nline 2");
    cursor_at(&mut editor, 0, 3);

    editor.add_cursors_below();
    editor.add_cursors_below();

    assert_eq!(carets(&editor), vec![(0, 3), (1, 3), (2, 3)]);
}

#[test]
fn test_add_cursor_above_at_top_does_nothing() {
    let mut editor = editor_with("line 0\nline 1");
    cursor_at(&mut editor, 0, 2);
    editor.add_cursors_above();
    assert_eq!(editor.cursor_count(), 1);
}

#[test]
fn test_added_cursor_column_is_clamped_to_short_line() {
    let mut editor = editor_with("long line\nab\nlong line");
    cursor_at(&mut editor, 0, 8);
    editor.add_cursors_below();
    assert_eq!(carets(&editor), vec![(0, 8), (1, 2)]);
}

#[test]
fn test_single_line_selection_is_copied() {
    let mut editor = editor_with("line 0\nline 1");
    editor.set_selection(Coordinates::new(0, 0), Coordinates::new(0, 4), None);
    editor.add_cursors_below();
    assert_eq!(selections(&editor), vec!["line", "line"]);

    editor.enter_character('X', false);
    assert_eq!(editor.text(), "X 0\nX 1");
}

// ========================================================================
// Occurrence Tests
// ========================================================================

#[test]
fn test_select_next_occurrence_walks_and_wraps() {
    let mut editor = editor_with("foo bar foo baz foo");

    editor.select_word_or_next_occurrence();
    assert_eq!(selections(&editor), vec!["foo"]);

    editor.select_word_or_next_occurrence();
    editor.select_word_or_next_occurrence();
    assert_eq!(editor.cursor_count(), 3);
    assert_eq!(carets(&editor), vec![(0, 3), (0, 11), (0, 19)]);

    // the search wraps onto the first match, which is already selected
    editor.select_word_or_next_occurrence();
    assert_eq!(editor.cursor_count(), 3);
}

#[test]
fn test_select_all_occurrences_case_sensitivity() {
    let mut editor = editor_with("FOO foo\nFoo");
    editor.select_all_occurrences_of("foo", true);
    assert_eq!(carets(&editor), vec![(0, 7)]);

    editor.select_all_occurrences_of("foo", false);
    assert_eq!(editor.cursor_count(), 3);
    assert_eq!(selections(&editor), vec!["FOO", "foo", "Foo"]);
}

#[test]
fn test_select_all_occurrences_with_no_match_keeps_caret() {
    let mut editor = editor_with("abc");
    cursor_at(&mut editor, 0, 1);
    editor.select_all_occurrences_of("zzz", true);
    assert_eq!(editor.cursor_count(), 1);
    assert!(!editor.any_cursor_has_selection());
}

#[test]
fn test_select_all_occurrences_follows_language_case() {
    let mut sql = editor_with("SELECT a, select b");
    sql.set_language(LanguageId::Sql);
    sql.select_all_occurrences_of_selection();
    assert_eq!(sql.cursor_count(), 2);

    let mut plain = editor_with("SELECT a, select b");
    plain.select_all_occurrences_of_selection();
    assert_eq!(plain.cursor_count(), 1);
}

#[test]
fn test_renaming_through_all_occurrences() {
    let mut editor = editor_with("let x = x + f(x);");
    editor.select_all_occurrences_of("x", true);
    assert_eq!(editor.cursor_count(), 3);

    editor.insert_text("value");
    assert_eq!(editor.text(), "let value = value + f(value);");

    editor.undo(1);
    assert_eq!(editor.text(), "let x = x + f(x);");
    assert_eq!(editor.cursor_count(), 3);
}

// ========================================================================
// Editing and Deduplication
// ========================================================================

#[test]
fn test_typing_at_every_caret() {
    let mut editor = editor_with("line 0\nline 1\nline 2");
    cursor_at(&mut editor, 0, 3);
    editor.add_cursors_below();
    editor.add_cursors_below();

    editor.enter_character('X', false);
    assert_eq!(editor.text(), "linXe 0\nlinXe 1\nlinXe 2");
    assert_eq!(carets(&editor), vec![(0, 4), (1, 4), (2, 4)]);

    editor.undo(1);
    assert_eq!(editor.text(), "line 0\nline 1\nline 2");
    assert_eq!(carets(&editor), vec![(0, 3), (1, 3), (2, 3)]);
}

#[test]
fn test_backspace_at_every_line_end() {
    let mut editor = editor_with("ab\ncd");
    editor.add_cursors_below();
    editor.move_end(false);
    editor.backspace(false);
    assert_eq!(editor.text(), "a\nc");
}

#[test]
fn test_carets_meeting_are_merged() {
    let mut editor = editor_with("a\na");
    editor.add_cursors_below();
    assert_eq!(editor.cursor_count(), 2);

    editor.move_up(1, false);
    assert_eq!(carets(&editor), vec![(0, 0)]);
}

#[test]
fn test_selections_growing_into_each_other_merge() {
    let mut editor = editor_with("xaxa");
    editor.select_all_occurrences_of("a", true);
    editor.clear_selections();
    assert_eq!(carets(&editor), vec![(0, 2), (0, 4)]);

    editor.move_left(true, false);
    editor.move_left(true, false);
    // touching selections stay apart
    assert_eq!(editor.cursor_count(), 2);

    editor.move_left(true, false);
    assert_eq!(editor.cursor_count(), 1);
    assert_eq!(selections(&editor), vec!["xaxa"]);
}

#[test]
fn test_clear_extra_cursors_keeps_one() {
    let mut editor = editor_with("a\nb\nc");
    editor.add_cursors_below();
    editor.add_cursors_below();
    assert_eq!(editor.cursor_count(), 3);

    editor.clear_extra_cursors();
    assert_eq!(editor.cursor_count(), 1);
}
