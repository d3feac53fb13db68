//! The text editor engine
//!
//! [`TextEditor`] owns one document and everything derived from it: the
//! glyph buffer, the cursor set, undo history, the visual-line projection,
//! the colorizer and externally supplied annotations. Commands live in the
//! submodules as further `impl TextEditor` blocks:
//!
//! - [`movement`]: caret movement with and without selection
//! - [`selection`]: selections and multi-cursor creation
//! - [`editing`]: typing, deletion, clipboard, undo/redo
//! - [`lines`]: per-line batch commands (indent, comment, move, remove)
//! - [`view`]: viewport metrics, screen mapping, projection queries
//!
//! All buffer mutation funnels through [`TextEditor::insert_text_at`] and
//! [`TextEditor::delete_range`], which keep every cursor attached to the
//! text it was pointing at.

pub mod editing;
pub mod history;
pub mod lines;
pub mod movement;
pub mod selection;
pub mod state;
pub mod view;

pub use history::{UndoHistory, UndoOperation, UndoOperationType, UndoRecord};
pub use state::{Cursor, EditorState};
pub use movement::MoveDirection;
pub use view::{ScreenPos, ScrollRequest, SetViewAtLineMode, ViewMetrics};

use crate::annotations::{
    apply_semantic_tokens, Annotations, Highlight, LinkHighlight, SemanticToken, Underline,
};
use crate::config::{EditorConfig, MAX_LINE_SPACING, MIN_LINE_SPACING};
use crate::palette::{Color, Palette, PaletteId, PaletteIndex};
use crate::projection::Projection;
use crate::syntax::{Colorizer, LanguageId};
use crate::text::{Coordinates, Glyph, Lean, Line, TextBuffer};

/// Where a cursor endpoint goes when the buffer changes under it
#[derive(Debug, Clone, Copy)]
enum Shift {
    Keep,
    To(Coordinates),
    /// Resolve the column from a character index after the edit
    Index { line: usize, index: usize },
    /// Move by whole lines, keeping the column
    Lines(isize),
}

impl Shift {
    fn apply(self, buffer: &TextBuffer, pos: Coordinates) -> Coordinates {
        match self {
            Shift::Keep => pos,
            Shift::To(target) => target,
            Shift::Index { line, index } => buffer.coords_at(line, index),
            Shift::Lines(delta) => Coordinates::new(pos.line.saturating_add_signed(delta), pos.column),
        }
    }
}

#[derive(Debug)]
pub struct TextEditor {
    pub(crate) buffer: TextBuffer,
    pub(crate) state: EditorState,
    pub(crate) history: UndoHistory,
    pub(crate) projection: Projection,
    pub(crate) colorizer: Colorizer,
    pub(crate) annotations: Annotations,
    pub(crate) view: ViewMetrics,

    palette_id: PaletteId,
    palette: Palette,

    read_only: bool,
    auto_indent: bool,
    show_whitespaces: bool,
    show_line_numbers: bool,
    short_tabs: bool,
    line_spacing: f32,
    word_wrap: bool,
    /// Wrap width used while the view width is unknown
    wrap_column: usize,

    /// Bracket pair under a lone caret
    matching_bracket: Option<(Coordinates, Coordinates)>,
    /// Cursor to reveal on the next scroll request, and whether its
    /// selection start should be revealed too
    pub(crate) pending_reveal: Option<(usize, bool)>,
    pub(crate) pending_view_at_line: Option<(usize, SetViewAtLineMode)>,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditor {
    /// Editor with default settings and the process default palette
    pub fn new() -> Self {
        let config = EditorConfig {
            palette: crate::settings::default_palette(),
            ..EditorConfig::default()
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        let mut editor = Self {
            buffer: TextBuffer::new(),
            state: EditorState::new(),
            history: UndoHistory::with_limit(config.undo_limit),
            projection: Projection::new(),
            colorizer: Colorizer::default(),
            annotations: Annotations::default(),
            view: ViewMetrics::default(),
            palette_id: config.palette,
            palette: Palette::builtin(config.palette),
            read_only: config.read_only,
            auto_indent: config.auto_indent,
            show_whitespaces: config.show_whitespaces,
            show_line_numbers: config.show_line_numbers,
            short_tabs: config.short_tabs,
            line_spacing: config.line_spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING),
            word_wrap: config.word_wrap,
            wrap_column: config.wrap_column.max(1),
            matching_bracket: None,
            pending_reveal: None,
            pending_view_at_line: None,
        };
        editor.buffer.set_tab_size(config.tab_size);
        editor.set_language(config.language);
        editor.sync_wrap();
        editor
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn palette_id(&self) -> PaletteId {
        self.palette_id
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch this editor to a built-in palette
    pub fn set_palette(&mut self, id: PaletteId) {
        self.palette_id = id;
        self.palette = Palette::builtin(id);
    }

    /// Use a custom palette, keeping `id` as the nominal base
    pub fn set_custom_palette(&mut self, id: PaletteId, palette: Palette) {
        self.palette_id = id;
        self.palette = palette;
    }

    pub fn language(&self) -> LanguageId {
        self.colorizer.language_id()
    }

    pub fn language_name(&self) -> &'static str {
        self.colorizer.language().map_or("None", |d| d.name)
    }

    /// Switch language and recolor the whole document
    pub fn set_language(&mut self, id: LanguageId) {
        self.colorizer.set_language(id);
        self.colorize(0, None);
        tracing::debug!("language set to {}", self.language_name());
    }

    pub fn tab_size(&self) -> usize {
        self.buffer.tab_size()
    }

    /// Change the tab size (clamped to 1..=8); cursors are re-sanitized
    pub fn set_tab_size(&mut self, size: usize) {
        if self.buffer.set_tab_size(size) {
            let buffer = &self.buffer;
            for cursor in self.state.cursors_mut() {
                cursor.interactive_start = buffer.sanitize(cursor.interactive_start);
                cursor.interactive_end = buffer.sanitize(cursor.interactive_end);
            }
        }
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.line_spacing = spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn auto_indent(&self) -> bool {
        self.auto_indent
    }

    pub fn set_auto_indent(&mut self, value: bool) {
        self.auto_indent = value;
    }

    pub fn show_whitespaces(&self) -> bool {
        self.show_whitespaces
    }

    pub fn set_show_whitespaces(&mut self, value: bool) {
        self.show_whitespaces = value;
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn set_show_line_numbers(&mut self, value: bool) {
        self.show_line_numbers = value;
    }

    pub fn short_tabs(&self) -> bool {
        self.short_tabs
    }

    pub fn set_short_tabs(&mut self, value: bool) {
        self.short_tabs = value;
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.word_wrap = enabled;
        self.sync_wrap();
    }

    /// Wrap width used until the view reports a size
    pub fn set_wrap_column(&mut self, column: usize) {
        self.wrap_column = column.max(1);
        self.sync_wrap();
    }

    /// Effective wrap width: derived from the view when known, else the
    /// configured column
    pub fn wrap_column(&self) -> usize {
        self.view.wrap_column().unwrap_or(self.wrap_column)
    }

    /// Push the current wrap setting into the projection
    pub(crate) fn sync_wrap(&mut self) {
        let wrap = self.word_wrap.then(|| self.wrap_column());
        self.projection.set_wrap_column(wrap);
    }

    // =========================================================================
    // Document access
    // =========================================================================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace the document. Clears undo history, resets cursors and
    /// schedules a full recolor.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.reset_after_load();
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the document line by line
    pub fn set_text_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.buffer.set_lines(lines);
        self.reset_after_load();
    }

    pub fn text_lines(&self) -> Vec<String> {
        self.buffer.text_lines()
    }

    fn reset_after_load(&mut self) {
        self.state = EditorState::new();
        self.history.clear();
        self.matching_bracket = None;
        self.pending_view_at_line = Some((0, SetViewAtLineMode::FirstVisibleLine));
        self.colorize(0, None);
        tracing::debug!("document loaded: {} lines", self.buffer.line_count());
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line_text(&self, line: usize) -> String {
        self.buffer.line_text(line)
    }

    /// Length of a line in bytes
    pub fn line_length(&self, line: usize) -> usize {
        self.buffer.line_len(line)
    }

    /// Largest line number in the gutter, counting numbered ghost lines
    pub fn max_line_number(&self) -> usize {
        self.projection.max_line_number(self.buffer.line_count())
    }

    /// Text between two coordinates
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        self.buffer.text_range(start, end)
    }

    // =========================================================================
    // Coordinates
    // =========================================================================

    pub fn char_index_to_column(&self, line: usize, index: usize) -> usize {
        self.buffer.char_index_to_column(line, index)
    }

    pub fn column_to_char_index(&self, line: usize, column: usize, lean: Lean) -> usize {
        self.buffer.column_to_char_index(line, column, lean)
    }

    /// Character index at or before `coords` inside a tab
    pub fn char_index_left(&self, coords: Coordinates) -> usize {
        self.buffer.column_to_char_index(coords.line, coords.column, Lean::Left)
    }

    /// Character index after a tab that `coords` falls inside
    pub fn char_index_right(&self, coords: Coordinates) -> usize {
        self.buffer.column_to_char_index(coords.line, coords.column, Lean::Right)
    }

    /// Last column of a line, optionally capped at `limit`
    pub fn line_max_column(&self, line: usize, limit: Option<usize>) -> usize {
        let max = self.buffer.line_max_column(line);
        limit.map_or(max, |l| max.min(l))
    }

    pub fn sanitize_coordinates(&self, coords: Coordinates) -> Coordinates {
        self.buffer.sanitize(coords)
    }

    /// Byte range of the word at a character index (see
    /// [`TextBuffer::word_boundaries`])
    pub fn word_boundaries(&self, line: usize, index: usize) -> (usize, usize) {
        self.buffer.word_boundaries(line, index)
    }

    pub fn find_word_start(&self, from: Coordinates) -> Coordinates {
        self.buffer.find_word_start(self.buffer.sanitize(from))
    }

    pub fn find_word_end(&self, from: Coordinates) -> Coordinates {
        self.buffer.find_word_end(self.buffer.sanitize(from))
    }

    pub fn find_matching_bracket(&self, line: usize, index: usize) -> Option<Coordinates> {
        self.buffer.find_matching_bracket(line, index)
    }

    /// Bracket under the caret and its partner, tracked for a single caret
    /// without selection
    pub fn matching_bracket(&self) -> Option<(Coordinates, Coordinates)> {
        self.matching_bracket
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Resolve an optional cursor index to the current cursor
    pub(crate) fn cursor_index(&self, cursor: Option<usize>) -> usize {
        let index = cursor.unwrap_or_else(|| self.state.current_index());
        debug_assert!(index < self.state.cursor_count(), "cursor index out of range");
        index.min(self.state.current_index())
    }

    /// Sanitized caret (or anchor, with `start`) of a cursor
    pub(crate) fn sanitized_cursor(&self, cursor: usize, start: bool) -> Coordinates {
        let pos = self.state.cursor(cursor).map_or(Coordinates::origin(), |c| {
            if start {
                c.interactive_start
            } else {
                c.interactive_end
            }
        });
        self.buffer.sanitize(pos)
    }

    /// Caret of the current cursor
    pub fn cursor_position(&self) -> Coordinates {
        self.sanitized_cursor(self.state.current_index(), false)
    }

    pub fn cursor_count(&self) -> usize {
        self.state.cursor_count()
    }

    pub(crate) fn place_cursor(&mut self, pos: Coordinates, cursor: usize, clear_selection: bool) {
        let Some(c) = self.state.cursor_mut(cursor) else {
            return;
        };
        let moved = c.interactive_end != pos;
        c.set_position(pos, clear_selection);
        if moved {
            self.ensure_cursor_visible(None, false);
        }
    }

    /// Sort, merge, and refresh bracket matching after cursors moved
    pub(crate) fn on_cursor_position_changed(&mut self) {
        self.matching_bracket = None;
        if !self.state.has_multiple_cursors() && !self.state.current().has_selection() {
            let caret = self.sanitized_cursor(0, false);
            let index = self.char_index_right(caret);
            self.matching_bracket = self
                .buffer
                .find_matching_bracket(caret.line, index)
                .map(|other| (self.buffer.coords_at(caret.line, index), other));
        }

        self.state.sort_cursors_top_to_bottom();
        self.state.merge_cursors_if_possible();
        #[cfg(debug_assertions)]
        {
            self.state.assert_invariants();
        }
    }

    // =========================================================================
    // Buffer primitives
    // =========================================================================

    /// Apply a buffer edit, moving every cursor endpoint according to `plan`
    /// (evaluated against the buffer before the edit)
    fn edit_buffer(
        &mut self,
        plan: impl Fn(&TextBuffer, Coordinates) -> Shift,
        edit: impl FnOnce(&mut TextBuffer),
    ) {
        let shifts: Vec<[Shift; 2]> = self
            .state
            .cursors()
            .iter()
            .map(|c| {
                [
                    plan(&self.buffer, c.interactive_start),
                    plan(&self.buffer, c.interactive_end),
                ]
            })
            .collect();

        edit(&mut self.buffer);

        let buffer = &self.buffer;
        for (cursor, [start, end]) in self.state.cursors_mut().iter_mut().zip(shifts) {
            cursor.interactive_start = start.apply(buffer, cursor.interactive_start);
            cursor.interactive_end = end.apply(buffer, cursor.interactive_end);
        }
    }

    /// Insert `text` at `at` (sanitized); `\r` is dropped and `\n` splits
    /// lines. Cursors after the insertion point move with the text.
    /// Returns the end of the inserted text.
    pub(crate) fn insert_text_at(&mut self, at: Coordinates, text: &str) -> Coordinates {
        debug_assert!(!self.read_only, "insert into a read-only editor");
        let at = self.buffer.sanitize(at);
        let at_index = self.char_index_right(at);

        let mut segments: Vec<Line> = text
            .split('\n')
            .map(|s| s.bytes().filter(|&b| b != b'\r').map(Glyph::plain).collect())
            .collect();
        let first = if segments.is_empty() {
            Line::new()
        } else {
            segments.remove(0)
        };
        let added_lines = segments.len();
        let end_line = at.line + added_lines;
        let end_index = segments.last().map_or(at_index + first.len(), Vec::len);

        self.edit_buffer(
            |buffer, pos| {
                if pos.line > at.line {
                    Shift::Lines(added_lines as isize)
                } else if pos.line == at.line && pos.column > at.column {
                    let index = buffer.column_to_char_index(pos.line, pos.column, Lean::Right);
                    Shift::Index {
                        line: end_line,
                        index: end_index + index.saturating_sub(at_index),
                    }
                } else {
                    Shift::Keep
                }
            },
            |buffer| {
                let tail = buffer.remove_glyphs(at.line, at_index, None);
                buffer.insert_glyphs(at.line, at_index, &first);
                match segments.last_mut() {
                    Some(last) => last.extend(tail),
                    None => buffer.insert_glyphs(at.line, at_index + first.len(), &tail),
                }
                buffer.insert_lines(at.line + 1, segments);
            },
        );

        self.buffer.coords_at(end_line, end_index)
    }

    /// Insert at a cursor's caret and move the caret past the text
    pub(crate) fn insert_text_at_cursor(&mut self, text: &str, cursor: usize) -> Coordinates {
        let pos = self.sanitized_cursor(cursor, false);
        let start = self
            .state
            .cursor(cursor)
            .map_or(pos, |c| pos.min(c.selection_start()));

        let end = self.insert_text_at(pos, text);
        self.place_cursor(end, cursor, true);
        self.colorize(start.line.saturating_sub(1), Some(end.line - start.line + 2));
        end
    }

    /// Delete `start..end`. Cursors inside collapse to `start`; cursors after
    /// move with the text.
    pub(crate) fn delete_range(&mut self, start: Coordinates, end: Coordinates) {
        debug_assert!(start <= end, "delete range out of order");
        debug_assert!(!self.read_only, "delete in a read-only editor");
        if start >= end {
            return;
        }

        let start_index = self.char_index_left(start);
        let end_index = self.char_index_right(end);
        let removed_lines = end.line - start.line;

        self.edit_buffer(
            |buffer, pos| {
                if pos <= start {
                    Shift::Keep
                } else if pos <= end {
                    Shift::To(start)
                } else if pos.line == end.line {
                    let index = buffer.column_to_char_index(pos.line, pos.column, Lean::Right);
                    Shift::Index {
                        line: start.line,
                        index: start_index + index.saturating_sub(end_index),
                    }
                } else {
                    Shift::Lines(-(removed_lines as isize))
                }
            },
            |buffer| {
                if removed_lines == 0 {
                    buffer.remove_glyphs(start.line, start_index, Some(end_index));
                    return;
                }
                buffer.remove_glyphs(start.line, start_index, None);
                let tail = buffer.remove_glyphs(end.line, end_index, None);
                buffer.insert_glyphs(start.line, start_index, &tail);
                buffer.remove_lines(start.line + 1, end.line + 1);
            },
        );
    }

    /// Delete a cursor's selection, leaving the caret at its start
    pub(crate) fn delete_selection(&mut self, cursor: usize) {
        let Some(c) = self.state.cursor(cursor).copied() else {
            return;
        };
        if !c.has_selection() {
            return;
        }

        let start = self.buffer.sanitize(c.selection_start());
        let end = self.buffer.sanitize(c.selection_end());
        self.delete_range(start, end);
        self.place_cursor(start, cursor, true);
        self.colorize(start.line, Some(1));
    }

    /// Record an undoable action; records without operations are dropped
    pub(crate) fn push_undo(&mut self, operations: Vec<UndoOperation>, before: EditorState) {
        debug_assert!(!self.read_only, "undo record on a read-only editor");
        if operations.is_empty() {
            return;
        }
        tracing::trace!("undo record with {} operation(s)", operations.len());
        self.history
            .push(UndoRecord::new(operations, before, self.state.clone()));
    }

    // =========================================================================
    // Colors
    // =========================================================================

    /// Mark `count` lines from `from` for recoloring (`None` = to the end)
    pub fn colorize(&mut self, from: usize, count: Option<usize>) {
        self.colorizer
            .colorize(from, count, self.buffer.line_count());
    }

    /// One bounded slice of colorization; returns whether work remains
    pub fn tick(&mut self) -> bool {
        self.colorizer.tick(
            self.buffer.lines_mut(),
            self.annotations.semantic_tokens(),
        )
    }

    /// Run the colorizer until it is clean
    pub fn colorize_all(&mut self) {
        let mut slices = 0usize;
        while self.tick() {
            slices += 1;
        }
        tracing::debug!("colorized document in {} extra slice(s)", slices);
    }

    /// Final render color of a glyph
    pub fn glyph_color(&self, glyph: &Glyph) -> Color {
        if self.colorizer.language().is_none() {
            return self.palette.get(PaletteIndex::Default);
        }
        if glyph.comment {
            return self.palette.get(PaletteIndex::Comment);
        }
        if glyph.multi_line_comment {
            return self.palette.get(PaletteIndex::MultiLineComment);
        }
        let color = self.palette.get(glyph.color);
        if glyph.preprocessor {
            return color.average(self.palette.get(PaletteIndex::Preprocessor));
        }
        color
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        self.annotations.set_highlights(highlights);
    }

    pub fn clear_highlights(&mut self) {
        self.annotations.clear_highlights();
    }

    pub fn set_underlines(&mut self, underlines: Vec<Underline>) {
        self.annotations.set_underlines(underlines);
    }

    pub fn clear_underlines(&mut self) {
        self.annotations.clear_underlines();
    }

    /// Replace semantic tokens and apply them over the current colors
    pub fn set_semantic_tokens(&mut self, tokens: Vec<SemanticToken>) {
        self.annotations.set_semantic_tokens(tokens);
        apply_semantic_tokens(
            self.annotations.semantic_tokens(),
            self.buffer.lines_mut(),
        );
    }

    /// Drop semantic tokens; the document is recolored from scratch
    pub fn clear_semantic_tokens(&mut self) {
        self.annotations.clear_semantic_tokens();
        self.colorize(0, None);
    }

    pub fn set_link_highlight(&mut self, link: Option<LinkHighlight>) {
        self.annotations.set_link_highlight(link);
    }

    pub fn clear_link_highlight(&mut self) {
        self.annotations.set_link_highlight(None);
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

    #[test]
    fn test_new_editor_has_one_empty_line() {
        let e = TextEditor::new();
        assert_eq!(e.line_count(), 1);
        assert_eq!(e.text(), "");
        assert_eq!(e.cursor_position(), Coordinates::origin());
    }

    #[test]
    fn test_set_text_resets_state() {
        let mut e = editor("abc\ndef");
        e.state.add_cursor(Cursor::at(Coordinates::new(1, 2)));
        e.set_text("xyz");
        assert_eq!(e.cursor_count(), 1);
        assert_eq!(e.cursor_position(), Coordinates::origin());
        assert!(!e.history.can_undo());
    }

    #[test]
    fn test_insert_text_at_shifts_later_cursors() {
        let mut e = editor("abcdef");
        e.state.cursors_mut()[0] = Cursor::at(Coordinates::new(0, 4));
        let end = e.insert_text_at(Coordinates::new(0, 1), "XY");
        assert_eq!(end, Coordinates::new(0, 3));
        assert_eq!(e.text(), "aXYbcdef");
        assert_eq!(e.cursor_position(), Coordinates::new(0, 6));
    }

    #[test]
    fn test_insert_multiline_moves_tail() {
        let mut e = editor("abcd\nnext");
        e.state.cursors_mut()[0] = Cursor::at(Coordinates::new(0, 3));
        let end = e.insert_text_at(Coordinates::new(0, 2), "1\r\n22\n333");
        assert_eq!(e.text(), "ab1\n22\n333cd\nnext");
        assert_eq!(end, Coordinates::new(2, 3));
        // the caret was after 'c', which is now on line 2
        assert_eq!(e.cursor_position(), Coordinates::new(2, 4));
    }

    #[test]
    fn test_delete_range_joins_lines_and_remaps_cursors() {
        let mut e = editor("hello\nbig\nworld\ntail");
        e.state.cursors_mut()[0] = Cursor::at(Coordinates::new(2, 4));
        e.state.add_cursor(Cursor::at(Coordinates::new(3, 2)));
        e.delete_range(Coordinates::new(0, 2), Coordinates::new(2, 1));
        assert_eq!(e.text(), "heorld\ntail");
        assert_eq!(e.state.cursors()[0].interactive_end, Coordinates::new(0, 5));
        assert_eq!(e.state.cursors()[1].interactive_end, Coordinates::new(1, 2));
    }

    #[test]
    fn test_delete_range_collapses_inner_cursors() {
        let mut e = editor("abcdef");
        e.state.cursors_mut()[0] = Cursor::at(Coordinates::new(0, 3));
        e.delete_range(Coordinates::new(0, 1), Coordinates::new(0, 5));
        assert_eq!(e.text(), "af");
        assert_eq!(e.cursor_position(), Coordinates::new(0, 1));
    }

    #[test]
    fn test_tab_size_change_resanitizes_cursors() {
        let mut e = editor("\tx");
        e.state.cursors_mut()[0] = Cursor::at(Coordinates::new(0, 5));
        e.set_tab_size(2);
        assert_eq!(e.tab_size(), 2);
        assert_eq!(e.cursor_position(), Coordinates::new(0, 3));
    }

    #[test]
    fn test_glyph_color_rules() {
        let mut e = editor("x");
        let mut glyph = Glyph::new(b'x', PaletteIndex::Keyword);
        // no language: everything is Default
        assert_eq!(e.glyph_color(&glyph), e.palette().get(PaletteIndex::Default));

        e.set_language(LanguageId::Cpp);
        assert_eq!(e.glyph_color(&glyph), e.palette().get(PaletteIndex::Keyword));

        glyph.preprocessor = true;
        let expected = e
            .palette()
            .get(PaletteIndex::Keyword)
            .average(e.palette().get(PaletteIndex::Preprocessor));
        assert_eq!(e.glyph_color(&glyph), expected);

        glyph.multi_line_comment = true;
        assert_eq!(
            e.glyph_color(&glyph),
            e.palette().get(PaletteIndex::MultiLineComment)
        );
        glyph.comment = true;
        assert_eq!(e.glyph_color(&glyph), e.palette().get(PaletteIndex::Comment));
    }

    #[test]
    fn test_colorize_all_drains() {
        let mut e = editor(&"x = 1\n".repeat(40));
        e.set_language(LanguageId::Python);
        e.colorize_all();
        assert!(!e.colorizer.is_dirty());
        assert_eq!(e.buffer.line(39)[4].color, PaletteIndex::Number);
    }

    #[test]
    fn test_matching_bracket_tracks_single_caret() {
        let mut e = editor("(a(b)c)");
        e.on_cursor_position_changed();
        assert_eq!(
            e.matching_bracket(),
            Some((Coordinates::new(0, 0), Coordinates::new(0, 6)))
        );
        e.state.add_cursor(Cursor::at(Coordinates::new(0, 2)));
        e.on_cursor_position_changed();
        assert_eq!(e.matching_bracket(), None);
    }

    #[test]
    fn test_line_max_column_limit() {
        let e = editor("abcdef");
        assert_eq!(e.line_max_column(0, None), 6);
        assert_eq!(e.line_max_column(0, Some(4)), 4);
        assert_eq!(e.line_max_column(0, Some(10)), 6);
    }
}
