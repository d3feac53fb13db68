//! Line and glyph storage plus the coordinate model
//!
//! A buffer is a non-empty vector of lines; each line is a vector of glyphs
//! holding one UTF-8 byte each. Positions come in two flavours:
//!
//! - **character index**: a byte offset into a line's glyphs
//! - **column**: the tab-expanded visual column ([`Coordinates::column`])
//!
//! Converting between them is a left-to-right walk honoring tab stops.
//! The buffer knows nothing about cursors; the editor layers cursor
//! adjustment on top of the raw mutations here.

use crate::text::coords::Coordinates;
use crate::text::glyph::{glyphs_to_string, is_utf8_continuation, utf8_char_len, Glyph, Line};
use crate::util::text::{is_word_byte, same_run};

pub const MIN_TAB_SIZE: usize = 1;
pub const MAX_TAB_SIZE: usize = 8;
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Which side of a tab a column inside its expansion resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<Line>,
    tab_size: usize,
    /// Bumped on every structural change (content or tab size)
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            tab_size: DEFAULT_TAB_SIZE,
            revision: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Number of lines (always >= 1)
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    /// Glyphs of a line; empty for out-of-range lines
    #[inline]
    pub fn line(&self, line: usize) -> &[Glyph] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Length of a line in bytes
    #[inline]
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access for recoloring. Does not bump the revision: colors and
    /// colorizer flags are not structural.
    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    #[inline]
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Set the tab size, clamped to 1..=8. Returns whether it changed.
    pub fn set_tab_size(&mut self, size: usize) -> bool {
        let size = size.clamp(MIN_TAB_SIZE, MAX_TAB_SIZE);
        if size == self.tab_size {
            return false;
        }
        self.tab_size = size;
        self.touch();
        true
    }

    // =========================================================================
    // Whole-buffer text
    // =========================================================================

    /// Replace the content. `\r` is dropped and `\n` splits lines.
    pub fn set_text(&mut self, text: &str) {
        let mut lines = vec![Line::new()];
        for byte in text.bytes() {
            match byte {
                b'\r' => {}
                b'\n' => lines.push(Line::new()),
                _ => {
                    if let Some(last) = lines.last_mut() {
                        last.push(Glyph::plain(byte));
                    }
                }
            }
        }
        self.lines = lines;
        self.touch();
    }

    /// Replace the content line by line. Bytes are copied as-is except `\n`,
    /// which a line can never hold.
    pub fn set_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.lines = if lines.is_empty() {
            vec![Line::new()]
        } else {
            lines
                .iter()
                .map(|l| {
                    l.as_ref()
                        .bytes()
                        .filter(|&b| b != b'\n')
                        .map(Glyph::plain)
                        .collect()
                })
                .collect()
        };
        self.touch();
    }

    /// Full content, lines joined with `\n`
    pub fn text(&self) -> String {
        let last = self.last_line();
        self.text_range(
            Coordinates::origin(),
            Coordinates::new(last, self.line_max_column(last)),
        )
    }

    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| glyphs_to_string(l)).collect()
    }

    pub fn line_text(&self, line: usize) -> String {
        glyphs_to_string(self.line(line))
    }

    /// Text between two coordinates, line breaks rendered as `\n`
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        if start >= end {
            return String::new();
        }

        let mut bytes = Vec::new();
        let mut line = start.line;
        let mut index = self.column_to_char_index(start.line, start.column, Lean::Right);
        let end_index = self.column_to_char_index(end.line, end.column, Lean::Right);

        while line < end.line || (line == end.line && index < end_index) {
            let Some(glyphs) = self.lines.get(line) else {
                break;
            };
            if index < glyphs.len() {
                bytes.push(glyphs[index].byte);
                index += 1;
            } else {
                index = 0;
                line += 1;
                bytes.push(b'\n');
            }
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }

    // =========================================================================
    // Column math
    // =========================================================================

    /// Step over the character at `index`, returning the next index and column
    #[inline]
    pub fn advance(&self, line: usize, index: usize, column: usize) -> (usize, usize) {
        let byte = self.line(line).get(index).map_or(b' ', |g| g.byte);
        let next_column = if byte == b'\t' {
            (column / self.tab_size) * self.tab_size + self.tab_size
        } else {
            column + 1
        };
        (index + utf8_char_len(byte), next_column)
    }

    /// Visual column of a character index
    pub fn char_index_to_column(&self, line: usize, index: usize) -> usize {
        let len = self.line_len(line);
        let (mut i, mut column) = (0, 0);
        while i < index && i < len {
            (i, column) = self.advance(line, i, column);
        }
        column
    }

    /// Character index of a visual column. A column inside a tab resolves to
    /// the tab itself with [`Lean::Left`] or to the character after it with
    /// [`Lean::Right`].
    pub fn column_to_char_index(&self, line: usize, column: usize, lean: Lean) -> usize {
        let len = self.line_len(line);
        if len == 0 || column == 0 {
            return 0;
        }

        let (mut i, mut col) = (0, 0);
        while i < len && col < column {
            let prev = i;
            (i, col) = self.advance(line, i, col);
            if col > column {
                return match lean {
                    Lean::Left => prev,
                    Lean::Right => i.min(len),
                };
            }
        }
        i.min(len)
    }

    /// Column just past the last character of a line
    pub fn line_max_column(&self, line: usize) -> usize {
        self.char_index_to_column(line, usize::MAX)
    }

    /// Clamp coordinates into the document and off tab interiors.
    ///
    /// A line past the end resolves to the end of the last line. A column
    /// inside a tab snaps to the nearer tab edge, ties going left.
    pub fn sanitize(&self, coords: Coordinates) -> Coordinates {
        let last = self.last_line();
        let mut out = if coords.line > last {
            Coordinates::new(last, self.line_max_column(last))
        } else {
            Coordinates::new(
                coords.line,
                coords.column.min(self.line_max_column(coords.line)),
            )
        };

        let index = self.column_to_char_index(out.line, out.column, Lean::Left);
        if self.line(out.line).get(index).is_some_and(|g| g.byte == b'\t') {
            let left = self.char_index_to_column(out.line, index);
            let right = self.char_index_to_column(out.line, index + 1);
            if left < out.column && out.column < right {
                out.column = if out.column - left <= right - out.column {
                    left
                } else {
                    right
                };
            }
        }
        out
    }

    /// Coordinates for a (line, character index) pair
    pub fn coords_at(&self, line: usize, index: usize) -> Coordinates {
        Coordinates::new(line, self.char_index_to_column(line, index))
    }

    // =========================================================================
    // Character walking (UTF-8 aware)
    // =========================================================================

    /// Position of the previous character. Crosses to the end of the previous
    /// line unless `lock_line` is set.
    pub fn prev_char(&self, line: usize, index: usize, lock_line: bool) -> Option<(usize, usize)> {
        if line >= self.lines.len() {
            return None;
        }
        if index == 0 {
            if lock_line || line == 0 {
                return None;
            }
            return Some((line - 1, self.line_len(line - 1)));
        }
        let glyphs = self.line(line);
        let mut i = index.min(glyphs.len()) - 1;
        while i > 0 && is_utf8_continuation(glyphs[i].byte) {
            i -= 1;
        }
        Some((line, i))
    }

    /// Position of the next character. Crosses to the start of the next line
    /// unless `lock_line` is set.
    pub fn next_char(&self, line: usize, index: usize, lock_line: bool) -> Option<(usize, usize)> {
        if line >= self.lines.len() {
            return None;
        }
        let glyphs = self.line(line);
        if index >= glyphs.len() {
            if lock_line || line == self.last_line() {
                return None;
            }
            return Some((line + 1, 0));
        }
        let step = utf8_char_len(glyphs[index].byte);
        Some((line, (index + step).min(glyphs.len())))
    }

    // =========================================================================
    // Raw mutation
    // =========================================================================

    pub fn insert_glyphs(&mut self, line: usize, at: usize, glyphs: &[Glyph]) {
        if let Some(target) = self.lines.get_mut(line) {
            let at = at.min(target.len());
            target.splice(at..at, glyphs.iter().copied());
            self.touch();
        }
    }

    /// Remove `start..end` (or `start..` when `end` is `None`), returning the
    /// removed glyphs
    pub fn remove_glyphs(&mut self, line: usize, start: usize, end: Option<usize>) -> Vec<Glyph> {
        let Some(target) = self.lines.get_mut(line) else {
            return Vec::new();
        };
        let end = end.unwrap_or(target.len()).min(target.len());
        let start = start.min(end);
        let removed = target.drain(start..end).collect();
        self.touch();
        removed
    }

    /// Insert an empty line before `at`
    pub fn insert_line(&mut self, at: usize) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, Line::new());
        self.touch();
    }

    /// Insert whole lines before `at`
    pub fn insert_lines(&mut self, at: usize, lines: Vec<Line>) {
        if lines.is_empty() {
            return;
        }
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, lines);
        self.touch();
    }

    /// Remove lines `start..end`, always keeping at least one line
    pub fn remove_lines(&mut self, start: usize, end: usize) {
        let end = end.min(self.lines.len());
        if start >= end {
            return;
        }
        debug_assert!(end - start < self.lines.len(), "buffer would become empty");
        self.lines.drain(start..end);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        self.touch();
    }

    pub fn swap_lines(&mut self, a: usize, b: usize) {
        if a < self.lines.len() && b < self.lines.len() && a != b {
            self.lines.swap(a, b);
            self.touch();
        }
    }

    // =========================================================================
    // Words
    // =========================================================================

    /// Start of the run (word, whitespace, or repeated punctuation) around `from`
    pub fn find_word_start(&self, from: Coordinates) -> Coordinates {
        if from.line >= self.lines.len() {
            return from;
        }
        let glyphs = self.line(from.line);
        if glyphs.is_empty() {
            return from;
        }

        let mut index = self.column_to_char_index(from.line, from.column, Lean::Left);
        if index >= glyphs.len() {
            index = glyphs.len() - 1;
        }
        let initial = glyphs[index].byte;
        while let Some((_, prev)) = self.prev_char(from.line, index, true) {
            if !same_run(initial, glyphs[prev].byte) {
                break;
            }
            index = prev;
        }
        self.coords_at(from.line, index)
    }

    /// End of the run starting at `from`
    pub fn find_word_end(&self, from: Coordinates) -> Coordinates {
        if from.line >= self.lines.len() {
            return from;
        }
        let glyphs = self.line(from.line);
        let mut index = self.column_to_char_index(from.line, from.column, Lean::Left);
        if index >= glyphs.len() {
            return from;
        }

        let initial = glyphs[index].byte;
        while let Some((_, next)) = self.next_char(from.line, index, true) {
            index = next;
            if index == glyphs.len() || !same_run(initial, glyphs[index].byte) {
                break;
            }
        }
        self.coords_at(from.line, index)
    }

    /// Byte range `[start, end)` of the word at `index`, or an empty range at
    /// `index` when it is not on a word character
    pub fn word_boundaries(&self, line: usize, index: usize) -> (usize, usize) {
        if line >= self.lines.len() {
            return (0, 0);
        }
        let glyphs = self.line(line);
        if index >= glyphs.len() || !is_word_byte(glyphs[index].byte) {
            let index = index.min(glyphs.len());
            return (index, index);
        }

        let mut start = index;
        while start > 0 && is_word_byte(glyphs[start - 1].byte) {
            start -= 1;
        }
        let mut end = index;
        while end < glyphs.len() && is_word_byte(glyphs[end].byte) {
            end += 1;
        }
        (start, end)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Find the next occurrence of `needle` at or after `from`, wrapping
    /// around the end of the document. `\n` in the needle matches a line
    /// break. Case folding is ASCII-only.
    pub fn find_next_occurrence(
        &self,
        needle: &str,
        from: Coordinates,
        case_sensitive: bool,
    ) -> Option<(Coordinates, Coordinates)> {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return None;
        }

        let start_line = from.line.min(self.last_line());
        let start_index = self.column_to_char_index(start_line, from.column, Lean::Right);
        let (mut line, mut index) = (start_line, start_index);

        loop {
            if let Some(end) = self.match_at(line, index, needle, case_sensitive) {
                return Some((self.coords_at(line, index), end));
            }

            if index >= self.line_len(line) {
                if line == self.last_line() {
                    line = 0;
                } else {
                    line += 1;
                }
                index = 0;
            } else {
                index += 1;
            }

            if line == start_line && index == start_index {
                return None;
            }
        }
    }

    fn match_at(
        &self,
        line: usize,
        index: usize,
        needle: &[u8],
        case_sensitive: bool,
    ) -> Option<Coordinates> {
        let fold = |b: u8| {
            if case_sensitive {
                b
            } else {
                b.to_ascii_lowercase()
            }
        };

        let (mut l, mut i) = (line, index);
        for &expected in needle {
            let glyphs = self.line(l);
            if i >= glyphs.len() {
                if expected == b'\n' && l + 1 < self.lines.len() {
                    l += 1;
                    i = 0;
                    continue;
                }
                return None;
            }
            if fold(glyphs[i].byte) != fold(expected) {
                return None;
            }
            i += 1;
        }
        Some(self.coords_at(l, i))
    }

    /// Find the bracket matching the one at `(line, index)`. Supports `()`,
    /// `[]` and `{}`; nesting is tracked with a depth counter.
    pub fn find_matching_bracket(&self, line: usize, index: usize) -> Option<Coordinates> {
        let anchor = self.line(line).get(index)?.byte;

        let (target, backward) = match anchor {
            b')' => (b'(', true),
            b']' => (b'[', true),
            b'}' => (b'{', true),
            b'(' => (b')', false),
            b'[' => (b']', false),
            b'{' => (b'}', false),
            _ => return None,
        };

        let mut depth = 1usize;
        let (mut l, mut i) = (line, index);
        loop {
            let next = if backward {
                self.prev_char(l, i, false)
            } else {
                self.next_char(l, i, false)
            };
            (l, i) = next?;

            let Some(glyph) = self.line(l).get(i) else {
                continue;
            };
            if glyph.byte == target {
                depth -= 1;
                if depth == 0 {
                    return Some(self.coords_at(l, i));
                }
            } else if glyph.byte == anchor {
                depth += 1;
            }
        }
    }
}
