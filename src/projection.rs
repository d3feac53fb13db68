//! Visual line projection
//!
//! Maps the document onto the rows that actually get painted: wrapped
//! segments of document lines, folded ranges left out, and externally
//! supplied ghost rows spliced in before their anchor line.
//!
//! The projection is rebuilt lazily. Each input carries a revision counter
//! and the cached rows are reused until the tuple of counters changes, so
//! repeated queries between edits cost O(1).

use std::cell::RefCell;

use serde::Serialize;

use crate::palette::Color;
use crate::text::TextBuffer;

// ============================================================================
// Inputs
// ============================================================================

/// A synthetic annotation row shown before document line `anchor_line`.
/// An anchor equal to the line count places it after the last line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GhostLine {
    pub text: String,
    pub anchor_line: usize,
    /// Number shown in the gutter, if any
    pub line_number: Option<usize>,
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub marker_color: Option<Color>,
    pub separator_color: Option<Color>,
}

impl GhostLine {
    pub fn new(anchor_line: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor_line,
            ..Self::default()
        }
    }
}

/// An inclusive range of document lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line: start_line.min(end_line),
            end_line: start_line.max(end_line),
        }
    }

    /// Whether folding this range hides `line` (the start line stays visible)
    #[inline]
    pub fn hides(&self, line: usize) -> bool {
        line > self.start_line && line <= self.end_line
    }
}

/// Sort ranges and coalesce overlapping or adjacent ones
pub fn normalize_ranges(mut ranges: Vec<LineRange>) -> Vec<LineRange> {
    for range in &mut ranges {
        *range = LineRange::new(range.start_line, range.end_line);
    }
    ranges.sort_by_key(|r| r.start_line);

    let mut merged: Vec<LineRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start_line <= last.end_line.saturating_add(1) => {
                last.end_line = last.end_line.max(range.end_line);
            }
            _ => merged.push(range),
        }
    }
    merged
}

// ============================================================================
// Output
// ============================================================================

/// One painted row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualLine {
    /// Columns `[start_column, end_column)` of a document line
    Document {
        line: usize,
        start_column: usize,
        end_column: usize,
    },
    /// Ghost row; `index` points into the ghost line set
    Ghost { index: usize },
}

impl VisualLine {
    pub fn document_line(&self) -> Option<usize> {
        match *self {
            VisualLine::Document { line, .. } => Some(line),
            VisualLine::Ghost { .. } => None,
        }
    }

    pub fn is_ghost(&self) -> bool {
        matches!(self, VisualLine::Ghost { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    line_count: usize,
    buffer_revision: u64,
    ghost_revision: u64,
    hidden_revision: u64,
    wrap_column: Option<usize>,
}

#[derive(Debug, Default)]
struct Cache {
    key: Option<CacheKey>,
    rows: Vec<VisualLine>,
    /// First row of each document line; `None` when folded away
    doc_to_visual: Vec<Option<usize>>,
    rebuilds: u64,
}

// ============================================================================
// Projection
// ============================================================================

#[derive(Debug, Default)]
pub struct Projection {
    ghosts: Vec<GhostLine>,
    ghost_revision: u64,
    hidden: Vec<LineRange>,
    hidden_revision: u64,
    /// Effective wrap width in columns; `None` disables wrapping
    wrap_column: Option<usize>,
    cache: RefCell<Cache>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn ghost_lines(&self) -> &[GhostLine] {
        &self.ghosts
    }

    pub fn set_ghost_lines(&mut self, ghosts: Vec<GhostLine>) {
        self.ghosts = ghosts;
        self.ghost_revision += 1;
    }

    pub fn clear_ghost_lines(&mut self) {
        if !self.ghosts.is_empty() {
            self.ghosts.clear();
            self.ghost_revision += 1;
        }
    }

    pub fn hidden_line_ranges(&self) -> &[LineRange] {
        &self.hidden
    }

    pub fn set_hidden_line_ranges(&mut self, ranges: Vec<LineRange>) {
        if ranges.is_empty() {
            self.clear_hidden_line_ranges();
            return;
        }
        self.hidden = normalize_ranges(ranges);
        self.hidden_revision += 1;
    }

    pub fn clear_hidden_line_ranges(&mut self) {
        if !self.hidden.is_empty() {
            self.hidden.clear();
            self.hidden_revision += 1;
        }
    }

    /// Whether `line` is folded away
    pub fn is_line_hidden(&self, line: usize) -> bool {
        let idx = self.hidden.partition_point(|r| r.start_line < line);
        idx > 0 && self.hidden[idx - 1].hides(line)
    }

    /// The folded range anchored at `line`, if any
    pub fn hidden_range_at(&self, line: usize) -> Option<LineRange> {
        self.hidden
            .binary_search_by_key(&line, |r| r.start_line)
            .ok()
            .map(|i| self.hidden[i])
    }

    pub fn wrap_column(&self) -> Option<usize> {
        self.wrap_column
    }

    /// Set the wrap width; `Some(0)` is treated as one column
    pub fn set_wrap_column(&mut self, column: Option<usize>) {
        self.wrap_column = column.map(|c| c.max(1));
    }

    /// Largest line number shown in the gutter, counting ghost rows
    pub fn max_line_number(&self, line_count: usize) -> usize {
        self.ghosts
            .iter()
            .filter_map(|g| g.line_number)
            .fold(line_count, usize::max)
    }

    /// Number of full rebuilds so far
    pub fn rebuild_count(&self) -> u64 {
        self.cache.borrow().rebuilds
    }

    // ------------------------------------------------------------------
    // Rebuild
    // ------------------------------------------------------------------

    fn key(&self, buffer: &TextBuffer) -> CacheKey {
        CacheKey {
            line_count: buffer.line_count(),
            buffer_revision: buffer.revision(),
            ghost_revision: self.ghost_revision,
            hidden_revision: self.hidden_revision,
            wrap_column: self.wrap_column,
        }
    }

    fn ensure(&self, buffer: &TextBuffer) {
        let key = self.key(buffer);
        let mut cache = self.cache.borrow_mut();
        if cache.key == Some(key) {
            return;
        }

        let line_count = buffer.line_count();
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); line_count + 1];
        for (i, ghost) in self.ghosts.iter().enumerate() {
            buckets[ghost.anchor_line.min(line_count)].push(i);
        }

        let mut rows = Vec::with_capacity(line_count + self.ghosts.len());
        let mut doc_to_visual = vec![None; line_count];

        for line in 0..line_count {
            rows.extend(buckets[line].iter().map(|&index| VisualLine::Ghost { index }));
            if self.is_line_hidden(line) {
                continue;
            }
            doc_to_visual[line] = Some(rows.len());
            wrap_line(buffer, line, self.wrap_column, &mut rows);
        }
        rows.extend(buckets[line_count].iter().map(|&index| VisualLine::Ghost { index }));

        cache.key = Some(key);
        cache.rows = rows;
        cache.doc_to_visual = doc_to_visual;
        cache.rebuilds += 1;
        tracing::debug!(
            "visual lines rebuilt: {} rows for {} lines (wrap {:?})",
            cache.rows.len(),
            line_count,
            self.wrap_column
        );
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn visual_line_count(&self, buffer: &TextBuffer) -> usize {
        self.ensure(buffer);
        self.cache.borrow().rows.len()
    }

    pub fn visual_line(&self, buffer: &TextBuffer, index: usize) -> Option<VisualLine> {
        self.ensure(buffer);
        self.cache.borrow().rows.get(index).copied()
    }

    /// Snapshot of every row
    pub fn visual_lines(&self, buffer: &TextBuffer) -> Vec<VisualLine> {
        self.ensure(buffer);
        self.cache.borrow().rows.clone()
    }

    /// First row of a document line. A folded line maps to the nearest
    /// visible line after it, or before it when none follows.
    pub fn visual_line_for_document_line(&self, buffer: &TextBuffer, line: usize) -> usize {
        self.ensure(buffer);
        let cache = self.cache.borrow();
        let line_count = cache.doc_to_visual.len();
        if line >= line_count {
            return cache.rows.len().saturating_sub(1);
        }
        if let Some(row) = cache.doc_to_visual[line] {
            return row;
        }
        cache.doc_to_visual[line + 1..]
            .iter()
            .chain(cache.doc_to_visual[..line].iter().rev())
            .find_map(|row| *row)
            .unwrap_or(0)
    }

    /// Row holding a column of a document line. `column` must already be
    /// sanitized. With wrapping, the segment whose end lies past the column
    /// wins; the end of the line belongs to the last segment.
    pub fn visual_line_for_position(&self, buffer: &TextBuffer, line: usize, column: usize) -> usize {
        let first = self.visual_line_for_document_line(buffer, line);
        if self.wrap_column.is_none() {
            return first;
        }

        let cache = self.cache.borrow();
        let mut best = first;
        for (i, row) in cache.rows.iter().enumerate().skip(first) {
            match *row {
                VisualLine::Document {
                    line: l,
                    end_column,
                    ..
                } if l == line => {
                    best = i;
                    if column < end_column {
                        return i;
                    }
                }
                _ => break,
            }
        }
        best
    }

    /// Document line a row belongs to; ghost rows report their anchor
    pub fn document_line_for_visual_line(&self, buffer: &TextBuffer, row: usize) -> usize {
        self.ensure(buffer);
        let cache = self.cache.borrow();
        let last_line = buffer.last_line();
        let Some(last_row) = cache.rows.len().checked_sub(1) else {
            return row.min(last_line);
        };

        match cache.rows[row.min(last_row)] {
            VisualLine::Document { line, .. } => line.min(last_line),
            VisualLine::Ghost { index } => self
                .ghosts
                .get(index)
                .map_or(0, |g| g.anchor_line.min(last_line)),
        }
    }

    /// Column range `[start, end)` of a row; ghost and out-of-range rows
    /// report `(0, 0)`
    pub fn visual_line_columns(&self, buffer: &TextBuffer, row: usize) -> (usize, usize) {
        match self.visual_line(buffer, row) {
            Some(VisualLine::Document {
                line,
                start_column,
                end_column,
            }) => {
                let end = end_column.max(start_column).min(buffer.line_max_column(line));
                (start_column, end)
            }
            _ => (0, 0),
        }
    }

    pub fn ghost_line_for_visual_line(&self, buffer: &TextBuffer, row: usize) -> Option<&GhostLine> {
        match self.visual_line(buffer, row)? {
            VisualLine::Ghost { index } => self.ghosts.get(index),
            VisualLine::Document { .. } => None,
        }
    }
}

/// Emit the rows of one document line
fn wrap_line(buffer: &TextBuffer, line: usize, wrap: Option<usize>, rows: &mut Vec<VisualLine>) {
    let max_column = buffer.line_max_column(line);
    let mut push = |start_column: usize, end_column: usize| {
        rows.push(VisualLine::Document {
            line,
            start_column,
            end_column,
        })
    };

    let wrap = match wrap {
        Some(w) if max_column > w => w,
        _ => {
            push(0, max_column);
            return;
        }
    };

    let glyphs = buffer.line(line);
    let mut seg_start = 0;
    // column just past the most recent whitespace
    let mut last_break: Option<usize> = None;
    let (mut i, mut col) = (0, 0);

    while i < glyphs.len() {
        let (next_i, next_col) = buffer.advance(line, i, col);

        if next_col - seg_start > wrap {
            let brk = match last_break {
                Some(b) if b > seg_start => b,
                _ if col > seg_start => col,
                _ => next_col,
            };
            push(seg_start, brk);
            seg_start = brk;
            last_break = None;
            if brk < next_col {
                // the glyph opens the new segment; measure it again
                continue;
            }
        }

        if matches!(glyphs[i].byte, b' ' | b'\t') {
            last_break = Some(next_col);
        }
        i = next_i;
        col = next_col;
    }

    if seg_start < max_column {
        push(seg_start, max_column);
    }
}
