//! Viewport metrics, screen mapping and scrolling
//!
//! The host reports its layout in [`ViewMetrics`] once per frame. Every
//! geometric query goes through the visual-line projection, so wrapped
//! segments, folded ranges and ghost rows are accounted for.
//!
//! Scrolling is pull-based: commands only record what should become
//! visible, and [`TextEditor::take_scroll_request`] turns that into a
//! scroll offset once the layout is known.

use super::TextEditor;
use crate::projection::{GhostLine, LineRange, VisualLine};
use crate::text::Coordinates;

// ============================================================================
// Types
// ============================================================================

/// A point in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Layout of the text area as measured by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewMetrics {
    /// Advance of one column
    pub char_width: f32,
    /// Glyph height before line spacing
    pub char_height: f32,
    /// Gutter width; text starts this far right of the origin
    pub text_start: f32,
    /// Top-left corner of the editor
    pub origin: ScreenPos,
    pub content_width: f32,
    pub content_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl ViewMetrics {
    /// Whether the host has reported a usable layout yet
    pub fn is_measured(&self) -> bool {
        self.char_width > 0.0
            && self.char_height > 0.0
            && self.content_width > 0.0
            && self.content_height > 0.0
    }

    /// Columns that fit right of the gutter, at least one
    pub fn wrap_column(&self) -> Option<usize> {
        if self.char_width <= 0.0 || self.content_width <= 0.0 {
            return None;
        }
        let available = (self.content_width - self.text_start).max(self.char_width);
        Some(((available / self.char_width).floor() as usize).max(1))
    }
}

/// Where [`TextEditor::set_view_at_line`] puts the line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetViewAtLineMode {
    #[default]
    FirstVisibleLine,
    Centered,
    LastVisibleLine,
}

/// New scroll offsets for the host; `None` leaves an axis alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollRequest {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl ScrollRequest {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

// ============================================================================
// Editor
// ============================================================================

impl TextEditor {
    pub fn view_metrics(&self) -> &ViewMetrics {
        &self.view
    }

    /// Adopt a new layout. The wrap width follows the content width.
    pub fn set_view_metrics(&mut self, metrics: ViewMetrics) {
        let resized = self.view.wrap_column() != metrics.wrap_column();
        self.view = metrics;
        if resized {
            tracing::trace!("view resized, wrap column {:?}", metrics.wrap_column());
        }
        self.sync_wrap();
    }

    /// Record a scroll the host performed on its own
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.view.scroll_x = x.max(0.0);
        self.view.scroll_y = y.max(0.0);
    }

    /// Height of one row including line spacing
    pub fn line_height(&self) -> f32 {
        self.view.char_height * self.line_spacing()
    }

    fn first_visible_row(&self) -> usize {
        let lh = self.line_height();
        if lh <= 0.0 {
            return 0;
        }
        (self.view.scroll_y / lh).floor().max(0.0) as usize
    }

    fn last_visible_row(&self) -> usize {
        let lh = self.line_height();
        if lh <= 0.0 {
            return 0;
        }
        ((self.view.content_height + self.view.scroll_y) / lh).floor().max(0.0) as usize
    }

    /// Rows that fit in the content height; zero before the first layout
    pub fn visible_line_count(&self) -> usize {
        let lh = self.line_height();
        if lh <= 0.0 || self.view.content_height <= 0.0 {
            return 0;
        }
        (self.view.content_height / lh).ceil() as usize
    }

    pub fn first_visible_line(&self) -> usize {
        self.document_line_for_visual_line(self.first_visible_row())
    }

    pub fn last_visible_line(&self) -> usize {
        self.document_line_for_visual_line(self.last_visible_row())
    }

    // ------------------------------------------------------------------
    // Screen mapping
    // ------------------------------------------------------------------

    /// Top-left corner of the cell at `coords`
    pub fn coordinates_to_screen_pos(&self, coords: Coordinates) -> ScreenPos {
        let coords = self.buffer.sanitize(coords);
        let row = self.visual_line_for_coordinates(coords);
        let (segment_start, _) = self.projection.visual_line_columns(&self.buffer, row);
        let v = &self.view;
        ScreenPos {
            x: v.origin.x + v.text_start - v.scroll_x
                + coords.column.saturating_sub(segment_start) as f32 * v.char_width,
            y: v.origin.y + row as f32 * self.line_height() - v.scroll_y,
        }
    }

    /// Nearest caret position to a screen point, and whether the point lies
    /// over the gutter
    pub fn screen_pos_to_coordinates(&self, pos: ScreenPos) -> (Coordinates, bool) {
        let v = &self.view;
        let lh = self.line_height();
        if v.char_width <= 0.0 || lh <= 0.0 {
            return (Coordinates::origin(), false);
        }

        let local_x = pos.x - v.origin.x;
        let local_y = pos.y - v.origin.y;
        let over_gutter = local_x < v.text_start;

        let rows = self.visual_line_count().max(1);
        let row = (((local_y + v.scroll_y) / lh).floor().max(0.0) as usize).min(rows - 1);
        let line = self.document_line_for_visual_line(row);
        let (start, end) = self.projection.visual_line_columns(&self.buffer, row);

        let text_x = (local_x + v.scroll_x - v.text_start).max(0.0);
        let offset = (text_x / v.char_width + 0.5).floor() as usize;
        let column = start.saturating_add(offset).min(end.max(start));

        let mut coords = self.buffer.sanitize(Coordinates::new(line, column));
        if self.word_wrap() && (start, end) != (0, 0) {
            // snapping across a tab may leave the segment
            coords.column = coords.column.clamp(start, end.max(start));
        }
        (coords, over_gutter)
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Scroll so `line` lands at the given place on the next request
    pub fn set_view_at_line(&mut self, line: usize, mode: SetViewAtLineMode) {
        self.pending_view_at_line = Some((line.min(self.buffer.last_line()), mode));
    }

    /// Reveal a cursor's caret (and with `start_too` its anchor) on the next
    /// request. `None` picks the most recently added cursor.
    pub fn ensure_cursor_visible(&mut self, cursor: Option<usize>, start_too: bool) {
        let cursor = cursor.unwrap_or_else(|| self.state.last_added_index());
        self.pending_reveal = Some((cursor, start_too));
    }

    /// Resolve pending reveals into scroll offsets. Returns `None` when
    /// nothing has to move. Pending work is kept until the host reports a
    /// layout.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        if !self.view.is_measured() {
            return None;
        }
        let lh = self.line_height();
        let mut request = ScrollRequest::default();

        // an explicit line placement goes first so a later reveal can adjust it
        if let Some((line, mode)) = self.pending_view_at_line.take() {
            let row = self.visual_line_for_document_line(line) as f32;
            let span = self.last_visible_row().saturating_sub(self.first_visible_row()) as f32;
            let top = match mode {
                SetViewAtLineMode::FirstVisibleLine => row,
                SetViewAtLineMode::LastVisibleLine => row - span,
                SetViewAtLineMode::Centered => row - span * 0.5,
            };
            let y = (top * lh).max(0.0);
            self.view.scroll_y = y;
            request.y = Some(y);
        }

        if let Some((cursor, start_too)) = self.pending_reveal.take() {
            let cursor = if cursor < self.state.cursor_count() {
                cursor
            } else {
                self.state.last_added_index()
            };
            let ends: &[bool] = if start_too { &[false, true] } else { &[false] };
            for &start in ends {
                let target = self.sanitized_cursor(cursor, start);
                self.reveal(target, lh, &mut request);
            }
        }

        if request.is_empty() {
            None
        } else {
            tracing::trace!("scroll request {:?}", request);
            Some(request)
        }
    }

    fn reveal(&mut self, target: Coordinates, lh: f32, request: &mut ScrollRequest) {
        let row = self.visual_line_for_coordinates(target);
        if row <= self.first_visible_row() {
            let y = ((row as f32 - 0.5) * lh).max(0.0);
            if y < self.view.scroll_y {
                self.view.scroll_y = y;
                request.y = Some(y);
            }
        }
        if row >= self.last_visible_row() {
            let y = ((row as f32 + 1.5) * lh - self.view.content_height).max(0.0);
            if y > self.view.scroll_y {
                self.view.scroll_y = y;
                request.y = Some(y);
            }
        }

        if self.word_wrap() {
            return;
        }
        let v = self.view;
        let first_column = ((v.scroll_x - v.text_start).max(0.0) / v.char_width) as usize;
        let last_column = ((v.content_width + v.scroll_x - v.text_start).max(0.0) / v.char_width) as usize;
        let column = target.column as f32;
        if target.column <= first_column {
            let x = (v.text_start + (column - 0.5) * v.char_width).max(0.0);
            if x < self.view.scroll_x {
                self.view.scroll_x = x;
                request.x = Some(x);
            }
        }
        if target.column >= last_column {
            let x = (v.text_start + (column + 0.5) * v.char_width - v.content_width).max(0.0);
            if x > self.view.scroll_x {
                self.view.scroll_x = x;
                request.x = Some(x);
            }
        }
    }

    // ------------------------------------------------------------------
    // Ghost lines and folding
    // ------------------------------------------------------------------

    pub fn set_ghost_lines(&mut self, ghosts: Vec<GhostLine>) {
        self.projection.set_ghost_lines(ghosts);
    }

    pub fn clear_ghost_lines(&mut self) {
        self.projection.clear_ghost_lines();
    }

    pub fn ghost_lines(&self) -> &[GhostLine] {
        self.projection.ghost_lines()
    }

    pub fn set_hidden_line_ranges(&mut self, ranges: Vec<LineRange>) {
        self.projection.set_hidden_line_ranges(ranges);
    }

    pub fn clear_hidden_line_ranges(&mut self) {
        self.projection.clear_hidden_line_ranges();
    }

    pub fn is_line_hidden(&self, line: usize) -> bool {
        self.projection.is_line_hidden(line)
    }

    // ------------------------------------------------------------------
    // Visual line queries
    // ------------------------------------------------------------------

    pub fn visual_line_count(&self) -> usize {
        self.projection.visual_line_count(&self.buffer)
    }

    pub fn visual_line(&self, row: usize) -> Option<VisualLine> {
        self.projection.visual_line(&self.buffer, row)
    }

    pub fn visual_lines(&self) -> Vec<VisualLine> {
        self.projection.visual_lines(&self.buffer)
    }

    pub fn visual_line_for_coordinates(&self, coords: Coordinates) -> usize {
        let coords = self.buffer.sanitize(coords);
        self.projection
            .visual_line_for_position(&self.buffer, coords.line, coords.column)
    }

    pub fn visual_line_for_document_line(&self, line: usize) -> usize {
        self.projection.visual_line_for_document_line(&self.buffer, line)
    }

    pub fn document_line_for_visual_line(&self, row: usize) -> usize {
        self.projection.document_line_for_visual_line(&self.buffer, row)
    }

    pub fn visual_line_start_column(&self, row: usize) -> usize {
        self.projection.visual_line_columns(&self.buffer, row).0
    }

    pub fn visual_line_end_column(&self, row: usize) -> usize {
        self.projection.visual_line_columns(&self.buffer, row).1
    }

    pub fn ghost_line_for_visual_line(&self, row: usize) -> Option<&GhostLine> {
        self.projection.ghost_line_for_visual_line(&self.buffer, row)
    }
}
