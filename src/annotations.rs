//! Display annotations supplied by collaborators
//!
//! Highlights, diagnostics underlines, semantic tokens and the hovered link
//! are stored verbatim. Each setter replaces the previous set wholesale. The
//! editor only clamps them to the document when they are queried.

use crate::palette::{Color, Palette, PaletteIndex};
use crate::text::{Coordinates, GlyphStyle, Line, TextBuffer};

// ============================================================================
// Highlights
// ============================================================================

/// Background highlight over a character-index range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start_line: usize,
    pub start_char: usize,
    pub end_line: usize,
    pub end_char: usize,
    pub color: Color,
}

// ============================================================================
// Underlines
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnderlineStyle {
    Solid,
    #[default]
    Wavy,
}

/// Diagnostic severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    #[default]
    None,
    Error,
    Warning,
    Information,
    Hint,
}

impl DiagnosticSeverity {
    /// Forced line style and alpha multiplier for this severity.
    ///
    /// Errors are always wavy at full strength; the rest are solid and
    /// progressively dimmer. `None` keeps the underline's own style.
    pub fn render_style(self, own: UnderlineStyle) -> (UnderlineStyle, f32) {
        match self {
            DiagnosticSeverity::None => (own, 1.0),
            DiagnosticSeverity::Error => (UnderlineStyle::Wavy, 1.0),
            DiagnosticSeverity::Warning => (UnderlineStyle::Solid, 0.85),
            DiagnosticSeverity::Information => (UnderlineStyle::Solid, 0.55),
            DiagnosticSeverity::Hint => (UnderlineStyle::Solid, 0.45),
        }
    }

    fn rank(self) -> u8 {
        match self {
            DiagnosticSeverity::Error => 1,
            DiagnosticSeverity::Warning => 2,
            DiagnosticSeverity::Information => 3,
            DiagnosticSeverity::Hint => 4,
            DiagnosticSeverity::None => u8::MAX,
        }
    }
}

/// Underline over a column range
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Underline {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    /// Falls back to the palette's error marker
    pub color: Option<Color>,
    pub style: UnderlineStyle,
    pub severity: DiagnosticSeverity,
}

/// An underline resolved for painting on one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnderlineSpan {
    pub start_column: usize,
    pub end_column: usize,
    pub style: UnderlineStyle,
    pub color: Color,
}

impl Underline {
    /// Final style and color once the severity mapping is applied
    pub fn resolve(&self, palette: &Palette) -> (UnderlineStyle, Color) {
        let base = self
            .color
            .unwrap_or_else(|| palette.get(PaletteIndex::ErrorMarker));
        let (style, alpha) = self.severity.render_style(self.style);
        (style, base.scale_alpha(alpha))
    }
}

// ============================================================================
// Semantic tokens
// ============================================================================

/// A language-server style token over a character-index range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemanticToken {
    pub line: usize,
    pub start_char: usize,
    pub length: usize,
    pub token_type: String,
    pub modifiers: Vec<String>,
}

impl SemanticToken {
    pub fn new(line: usize, start_char: usize, length: usize, token_type: &str) -> Self {
        Self {
            line,
            start_char,
            length,
            token_type: token_type.to_string(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m == name)
    }

    /// Palette slot and style bits for this token
    pub fn style(&self) -> (PaletteIndex, GlyphStyle) {
        let readonly = self.has_modifier("readonly");
        let is_static = self.has_modifier("static");
        let deprecated = self.has_modifier("deprecated");
        let slanted = self.has_modifier("abstract") || self.has_modifier("virtual");
        let definition = self.has_modifier("definition");
        let default_library = self.has_modifier("defaultLibrary");

        let mut italic = slanted;
        let color = if deprecated {
            PaletteIndex::Deprecated
        } else {
            match self.token_type.as_str() {
                "namespace" => PaletteIndex::Namespace,
                "type" | "class" | "enum" | "interface" | "struct" => PaletteIndex::Type,
                "typeParameter" => PaletteIndex::TypeParameter,
                "concept" => PaletteIndex::Concept,
                "parameter" => {
                    italic = true;
                    PaletteIndex::Parameter
                }
                "variable" if readonly => PaletteIndex::Constant,
                "variable" if is_static => PaletteIndex::StaticSymbol,
                "variable" | "event" => PaletteIndex::Variable,
                "property" if is_static => PaletteIndex::StaticSymbol,
                "property" => PaletteIndex::Property,
                "enumMember" => PaletteIndex::EnumMember,
                "function" if default_library => PaletteIndex::KnownIdentifier,
                "function" => PaletteIndex::Function,
                "method" if is_static => PaletteIndex::StaticSymbol,
                "method" => PaletteIndex::Method,
                "macro" => PaletteIndex::Macro,
                "keyword" | "modifier" => PaletteIndex::Keyword,
                "comment" => PaletteIndex::Comment,
                "string" | "regexp" => PaletteIndex::String,
                "number" => PaletteIndex::Number,
                "operator" => PaletteIndex::Operator,
                "label" => PaletteIndex::Label,
                _ => PaletteIndex::Default,
            }
        };

        (
            color,
            GlyphStyle::new(italic, definition, is_static, deprecated),
        )
    }
}

/// Write semantic colors over the colorizer's output. Tokens outside the
/// document, and tokens of unknown type, are skipped.
pub(crate) fn apply_semantic_tokens(tokens: &[SemanticToken], lines: &mut [Line]) {
    for token in tokens {
        let Some(line) = lines.get_mut(token.line) else {
            continue;
        };
        if token.start_char >= line.len() {
            continue;
        }
        let end = token.start_char.saturating_add(token.length).min(line.len());

        let (color, style) = token.style();
        if color == PaletteIndex::Default {
            continue;
        }
        for glyph in &mut line[token.start_char..end] {
            glyph.color = color;
            glyph.comment = color == PaletteIndex::Comment;
            glyph.preprocessor = matches!(color, PaletteIndex::Preprocessor | PaletteIndex::Macro);
            glyph.style = style;
        }
    }
}

// ============================================================================
// Link highlight
// ============================================================================

/// The link under the mouse while the modifier is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkHighlight {
    pub line: usize,
    pub start_char: usize,
    pub end_char: usize,
    pub color: Option<Color>,
    pub underline: bool,
}

impl LinkHighlight {
    pub fn new(line: usize, start_char: usize, end_char: usize) -> Self {
        Self {
            line,
            start_char,
            end_char,
            color: None,
            underline: true,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    highlights: Vec<Highlight>,
    underlines: Vec<Underline>,
    semantic_tokens: Vec<SemanticToken>,
    link: Option<LinkHighlight>,
}

impl Annotations {
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        self.highlights = highlights;
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    pub fn underlines(&self) -> &[Underline] {
        &self.underlines
    }

    pub fn set_underlines(&mut self, underlines: Vec<Underline>) {
        self.underlines = underlines;
    }

    pub fn clear_underlines(&mut self) {
        self.underlines.clear();
    }

    pub fn semantic_tokens(&self) -> &[SemanticToken] {
        &self.semantic_tokens
    }

    pub fn set_semantic_tokens(&mut self, tokens: Vec<SemanticToken>) {
        self.semantic_tokens = tokens;
    }

    pub fn clear_semantic_tokens(&mut self) {
        self.semantic_tokens.clear();
    }

    pub fn link_highlight(&self) -> Option<&LinkHighlight> {
        self.link.as_ref()
    }

    pub fn set_link_highlight(&mut self, link: Option<LinkHighlight>) {
        self.link = link;
    }

    /// Highlighted character ranges `[start, end)` on one line, clamped to it
    pub fn highlight_ranges_on_line(&self, buffer: &TextBuffer, line: usize) -> Vec<(usize, usize, Color)> {
        let len = buffer.line_len(line);
        self.highlights
            .iter()
            .filter(|h| h.start_line <= line && line <= h.end_line)
            .filter_map(|h| {
                let start = if h.start_line == line { h.start_char.min(len) } else { 0 };
                let end = if h.end_line == line { h.end_char.min(len) } else { len };
                (start < end).then_some((start, end, h.color))
            })
            .collect()
    }

    /// Underline spans on one row of `line` covering columns
    /// `[seg_start, seg_end)`
    pub fn underline_spans(
        &self,
        buffer: &TextBuffer,
        palette: &Palette,
        line: usize,
        seg_start: usize,
        seg_end: usize,
    ) -> Vec<UnderlineSpan> {
        let mut spans = Vec::new();
        for underline in &self.underlines {
            let mut start =
                buffer.sanitize(Coordinates::new(underline.start_line, underline.start_column));
            let mut end = buffer.sanitize(Coordinates::new(underline.end_line, underline.end_column));
            if end < start {
                std::mem::swap(&mut start, &mut end);
            }
            if line < start.line || line > end.line {
                continue;
            }

            let from = if line == start.line { start.column } else { seg_start };
            let to = if line == end.line { end.column } else { seg_end };
            let from = from.clamp(seg_start, seg_end);
            let to = to.clamp(seg_start, seg_end);
            if to <= from {
                continue;
            }

            let (style, color) = underline.resolve(palette);
            spans.push(UnderlineSpan {
                start_column: from,
                end_column: to,
                style,
                color,
            });
        }
        spans
    }

    /// Most severe diagnostic touching `line`, with its color, for the gutter
    pub fn worst_severity_on_line(&self, line: usize) -> Option<(DiagnosticSeverity, Option<Color>)> {
        self.underlines
            .iter()
            .filter(|u| u.severity != DiagnosticSeverity::None)
            .filter(|u| u.start_line <= line && line <= u.end_line)
            .min_by_key(|u| u.severity.rank())
            .map(|u| (u.severity, u.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::line_from_str;

    #[test]
    fn test_severity_render_style() {
        assert_eq!(
            DiagnosticSeverity::Error.render_style(UnderlineStyle::Solid),
            (UnderlineStyle::Wavy, 1.0)
        );
        assert_eq!(
            DiagnosticSeverity::Hint.render_style(UnderlineStyle::Wavy),
            (UnderlineStyle::Solid, 0.45)
        );
        assert_eq!(
            DiagnosticSeverity::None.render_style(UnderlineStyle::Solid),
            (UnderlineStyle::Solid, 1.0)
        );
    }

    #[test]
    fn test_underline_defaults_to_error_marker_and_dims() {
        let palette = Palette::default();
        let underline = Underline {
            severity: DiagnosticSeverity::Warning,
            ..Underline::default()
        };
        let (style, color) = underline.resolve(&palette);
        assert_eq!(style, UnderlineStyle::Solid);
        let marker = palette.get(PaletteIndex::ErrorMarker);
        assert_eq!(color, marker.scale_alpha(0.85));
    }

    #[test]
    fn test_semantic_token_styles() {
        let t = SemanticToken::new(0, 0, 3, "variable").with_modifiers(&["readonly"]);
        assert_eq!(t.style().0, PaletteIndex::Constant);

        let t = SemanticToken::new(0, 0, 3, "function").with_modifiers(&["deprecated", "definition"]);
        let (color, style) = t.style();
        assert_eq!(color, PaletteIndex::Deprecated);
        assert!(style.strikethrough());
        assert!(style.bold());

        let (color, style) = SemanticToken::new(0, 0, 1, "parameter").style();
        assert_eq!(color, PaletteIndex::Parameter);
        assert!(style.italic());

        assert_eq!(SemanticToken::new(0, 0, 1, "bogus").style().0, PaletteIndex::Default);
    }

    #[test]
    fn test_apply_semantic_tokens_clamps() {
        let mut lines = vec![line_from_str("abcdef")];
        let tokens = vec![
            SemanticToken::new(0, 4, 10, "macro"),
            SemanticToken::new(0, 9, 1, "type"),
            SemanticToken::new(3, 0, 1, "type"),
            SemanticToken::new(0, 0, 1, "unknown"),
        ];
        apply_semantic_tokens(&tokens, &mut lines);
        assert_eq!(lines[0][4].color, PaletteIndex::Macro);
        assert!(lines[0][5].preprocessor);
        assert_eq!(lines[0][0].color, PaletteIndex::Default);
    }

    #[test]
    fn test_semantic_token_length_saturates_at_line_end() {
        let mut lines = vec![line_from_str("let x = 1;"), line_from_str("y")];
        let tokens = vec![
            SemanticToken::new(0, 4, usize::MAX, "variable"),
            SemanticToken::new(1, usize::MAX, usize::MAX, "type"),
            SemanticToken::new(usize::MAX, 0, usize::MAX, "type"),
        ];
        apply_semantic_tokens(&tokens, &mut lines);

        assert!(lines[0][..4].iter().all(|g| g.color == PaletteIndex::Default));
        assert!(lines[0][4..].iter().all(|g| g.color == PaletteIndex::Variable));
        assert_eq!(lines[1][0].color, PaletteIndex::Default);
    }

    #[test]
    fn test_highlight_past_end_of_document() {
        let buffer = TextBuffer::from_text("abc\ndefg");
        let mut annotations = Annotations::default();
        let color = Color::rgba(9, 9, 9, 255);
        annotations.set_highlights(vec![Highlight {
            start_line: 1,
            start_char: 2,
            end_line: usize::MAX,
            end_char: usize::MAX,
            color,
        }]);
        assert!(annotations.highlight_ranges_on_line(&buffer, 0).is_empty());
        assert_eq!(annotations.highlight_ranges_on_line(&buffer, 1), vec![(2, 4, color)]);
        assert!(annotations.highlight_ranges_on_line(&buffer, 7).is_empty());
    }

    #[test]
    fn test_underline_past_end_of_document() {
        let buffer = TextBuffer::from_text("hello\nab");
        let mut annotations = Annotations::default();
        annotations.set_underlines(vec![Underline {
            start_line: 0,
            start_column: 2,
            end_line: 99,
            end_column: usize::MAX,
            ..Underline::default()
        }]);
        let palette = Palette::default();

        let spans = annotations.underline_spans(&buffer, &palette, 0, 0, 5);
        assert_eq!((spans[0].start_column, spans[0].end_column), (2, 5));
        let spans = annotations.underline_spans(&buffer, &palette, 1, 0, 2);
        assert_eq!((spans[0].start_column, spans[0].end_column), (0, 2));
        assert!(annotations.underline_spans(&buffer, &palette, 5, 0, 2).is_empty());
    }

    #[test]
    fn test_underline_spans_clamp_to_segment() {
        let buffer = TextBuffer::from_text("hello world\nsecond");
        let mut annotations = Annotations::default();
        annotations.set_underlines(vec![Underline {
            start_line: 0,
            start_column: 3,
            end_line: 1,
            end_column: 2,
            ..Underline::default()
        }]);
        let palette = Palette::default();
        let spans = annotations.underline_spans(&buffer, &palette, 0, 0, 6);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start_column, spans[0].end_column), (3, 6));
        let spans = annotations.underline_spans(&buffer, &palette, 1, 0, 6);
        assert_eq!((spans[0].start_column, spans[0].end_column), (0, 2));
    }

    #[test]
    fn test_worst_severity() {
        let mut annotations = Annotations::default();
        annotations.set_underlines(vec![
            Underline {
                severity: DiagnosticSeverity::Hint,
                ..Underline::default()
            },
            Underline {
                severity: DiagnosticSeverity::Warning,
                ..Underline::default()
            },
        ]);
        assert_eq!(
            annotations.worst_severity_on_line(0).map(|(s, _)| s),
            Some(DiagnosticSeverity::Warning)
        );
        assert!(annotations.worst_severity_on_line(4).is_none());
    }

    #[test]
    fn test_highlight_ranges_on_line() {
        let buffer = TextBuffer::from_text("abc\ndefg\nhi");
        let mut annotations = Annotations::default();
        let color = Color::rgba(1, 2, 3, 4);
        annotations.set_highlights(vec![Highlight {
            start_line: 0,
            start_char: 1,
            end_line: 2,
            end_char: 1,
            color,
        }]);
        assert_eq!(annotations.highlight_ranges_on_line(&buffer, 0), vec![(1, 3, color)]);
        assert_eq!(annotations.highlight_ranges_on_line(&buffer, 1), vec![(0, 4, color)]);
        assert_eq!(annotations.highlight_ranges_on_line(&buffer, 2), vec![(0, 1, color)]);
    }
}
