//! Incremental colorizer
//!
//! Two passes with different costs:
//!
//! - the **comment scan** walks every glyph of the document and sets the
//!   comment, multi-line comment and preprocessor flags. It runs once after
//!   any edit, on the next tick.
//! - **token classification** recolors a dirty line range in bounded
//!   slices, one slice per tick, so a large paste is colored over several
//!   frames.
//!
//! Semantic tokens are written after every slice because classification
//! resets colors to `Default` first.

use std::ops::Range;

use super::language::{LanguageDefinition, LanguageId};
use super::tokenizer::Tokenizer;
use crate::annotations::{apply_semantic_tokens, SemanticToken};
use crate::palette::PaletteIndex;
use crate::text::{utf8_char_len, GlyphStyle, Line};

/// Lines per tick with only regex rules
pub const REGEX_BATCH_LINES: usize = 10;
/// Lines per tick when a native tokenizer is available
pub const NATIVE_BATCH_LINES: usize = 10_000;

#[derive(Debug, Default)]
pub struct Colorizer {
    language: Option<&'static LanguageDefinition>,
    tokenizer: Tokenizer,
    /// Lines still waiting for classification
    dirty: Option<Range<usize>>,
    check_comments: bool,
}

impl Colorizer {
    pub fn new(language: LanguageId) -> Self {
        let mut colorizer = Self::default();
        colorizer.set_language(language);
        colorizer
    }

    pub fn language(&self) -> Option<&'static LanguageDefinition> {
        self.language
    }

    pub fn language_id(&self) -> LanguageId {
        self.language.map_or(LanguageId::None, |d| d.id)
    }

    /// Switch language, recompiling the token table
    pub fn set_language(&mut self, id: LanguageId) {
        self.language = id.definition();
        self.tokenizer = self
            .language
            .map(Tokenizer::for_language)
            .unwrap_or_default();
        self.dirty = None;
        self.check_comments = false;
    }

    /// Whether any work is pending
    pub fn is_dirty(&self) -> bool {
        self.check_comments || self.dirty.is_some()
    }

    /// Lines still waiting for classification
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        self.dirty.clone()
    }

    /// Mark `count` lines from `from` dirty (`None` = to the end) and
    /// schedule a comment rescan
    pub fn colorize(&mut self, from: usize, count: Option<usize>, line_count: usize) {
        let to = match count {
            None => line_count,
            Some(n) => line_count.min(from.saturating_add(n)),
        };
        let from = from.min(to);

        self.dirty = Some(match self.dirty.take() {
            Some(r) => r.start.min(from)..r.end.max(to),
            None => from..to,
        });
        self.check_comments = true;
    }

    /// Do one bounded slice of work. Returns whether more remains.
    pub fn tick(&mut self, lines: &mut [Line], semantic: &[SemanticToken]) -> bool {
        let Some(def) = self.language else {
            self.dirty = None;
            self.check_comments = false;
            return false;
        };
        if lines.is_empty() {
            return false;
        }

        if self.check_comments {
            scan_comments(def, lines);
            self.check_comments = false;
        }

        if let Some(range) = self.dirty.take() {
            let batch = if self.tokenizer.has_native() {
                NATIVE_BATCH_LINES
            } else {
                REGEX_BATCH_LINES
            };
            let to = range.end.min(range.start + batch);
            self.classify_range(def, lines, range.start..to);
            tracing::debug!("colorized lines {}..{} of {}", range.start, to, range.end);

            if !semantic.is_empty() {
                apply_semantic_tokens(semantic, lines);
            }
            if to < range.end {
                self.dirty = Some(to..range.end);
            }
        }

        self.dirty.is_some()
    }

    /// Assign token colors to `range`
    fn classify_range(&self, def: &LanguageDefinition, lines: &mut [Line], range: Range<usize>) {
        let end = range.end.min(lines.len());
        let mut bytes = Vec::new();

        for line in lines.iter_mut().take(end).skip(range.start) {
            if line.is_empty() {
                continue;
            }

            bytes.clear();
            for glyph in line.iter_mut() {
                bytes.push(glyph.byte);
                glyph.color = PaletteIndex::Default;
                glyph.style = GlyphStyle::NONE;
            }

            let mut first = 0;
            while first < bytes.len() {
                let Some(token) = self
                    .tokenizer
                    .next_token(&bytes[first..])
                    .filter(|t| t.end > 0 && t.start <= t.end)
                else {
                    first += utf8_char_len(bytes[first]);
                    continue;
                };

                let start = first + token.start;
                let stop = (first + token.end).min(bytes.len());
                let mut color = token.color;
                if color == PaletteIndex::Identifier {
                    let ident = String::from_utf8_lossy(&bytes[start..stop]);
                    color = def.classify_identifier(&ident, line[first].preprocessor);
                }
                for glyph in &mut line[start..stop] {
                    glyph.color = color;
                }
                first = stop;
            }
        }
    }
}

/// Whole-document pass setting comment and preprocessor flags
fn scan_comments(def: &LanguageDefinition, lines: &mut [Line]) {
    let start_str = def.comment_start.as_bytes();
    let end_str = def.comment_end.as_bytes();
    let single_str = def.single_line_comment.as_bytes();

    // start of the open block comment, if any
    let mut block: Option<(usize, usize)> = None;
    let mut within_string = false;
    let mut within_single = false;
    let mut within_preproc = false;
    let mut first_char = true;
    // a trailing backslash carries the line state over
    let mut concatenate = false;

    for (line_no, line) in lines.iter_mut().enumerate() {
        if !concatenate {
            within_string = false;
            within_single = false;
            within_preproc = false;
            first_char = true;
        }
        concatenate = false;

        let len = line.len();
        let mut i = 0;
        while i < len {
            let c = line[i].byte;

            if Some(c) != def.preproc_char && !c.is_ascii_whitespace() {
                first_char = false;
            }
            if i == len - 1 && c == b'\\' {
                concatenate = true;
            }

            let mut in_block = block.is_some_and(|b| b <= (line_no, i));

            if within_string {
                line[i].multi_line_comment = in_block;
                line[i].comment = false;
                line[i].preprocessor = within_preproc;
                match c {
                    b'"' if line.get(i + 1).is_some_and(|g| g.byte == b'"') => {
                        i += 1;
                        mark(line, i, in_block, within_preproc);
                    }
                    b'"' => within_string = false,
                    b'\\' if i + 1 < len => {
                        i += 1;
                        mark(line, i, in_block, within_preproc);
                    }
                    _ => {}
                }
            } else {
                if first_char && Some(c) == def.preproc_char {
                    within_preproc = true;
                }

                if block.is_none() && !within_single {
                    if matches_at(line, i, start_str) {
                        block = Some((line_no, i));
                    } else if matches_at(line, i, single_str) {
                        within_single = true;
                    } else if c == b'"' {
                        within_string = true;
                    }
                }

                in_block = block.is_some_and(|b| b <= (line_no, i));
                line[i].multi_line_comment = in_block;
                line[i].comment = within_single;
                line[i].preprocessor = within_preproc;

                if let Some((start_line, start_index)) = block {
                    let closes = !end_str.is_empty()
                        && i + 1 >= end_str.len()
                        && (start_line < line_no || i + 1 - end_str.len() >= start_index + start_str.len())
                        && matches_at(line, i + 1 - end_str.len(), end_str);
                    if closes {
                        block = None;
                    }
                }
            }

            i += utf8_char_len(c);
        }
    }
}

fn mark(line: &mut Line, i: usize, in_block: bool, preproc: bool) {
    if let Some(glyph) = line.get_mut(i) {
        glyph.multi_line_comment = in_block;
        glyph.comment = false;
        glyph.preprocessor = preproc;
    }
}

fn matches_at(line: &Line, at: usize, needle: &[u8]) -> bool {
    !needle.is_empty()
        && line
            .get(at..at + needle.len())
            .is_some_and(|s| s.iter().zip(needle).all(|(g, &b)| g.byte == b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::line_from_str;

    fn lines(text: &str) -> Vec<Line> {
        text.split('\n').map(line_from_str).collect()
    }

    fn drain(colorizer: &mut Colorizer, lines: &mut [Line]) {
        colorizer.colorize(0, None, lines.len());
        while colorizer.tick(lines, &[]) {}
    }

    fn colors(line: &Line) -> Vec<PaletteIndex> {
        line.iter().map(|g| g.color).collect()
    }

    #[test]
    fn test_colorize_dirty_range_expands() {
        let mut c = Colorizer::new(LanguageId::Cpp);
        c.colorize(5, Some(2), 100);
        c.colorize(1, Some(1), 100);
        assert_eq!(c.dirty_range(), Some(1..7));
        c.colorize(50, None, 100);
        assert_eq!(c.dirty_range(), Some(1..100));
        c.colorize(200, Some(3), 100);
        assert_eq!(c.dirty_range(), Some(1..100));
    }

    #[test]
    fn test_cpp_token_classes() {
        let mut doc = lines("int x = 42; // note\nreturn \"s\";");
        let mut c = Colorizer::new(LanguageId::Cpp);
        drain(&mut c, &mut doc);

        let l0 = colors(&doc[0]);
        assert_eq!(&l0[0..3], &[PaletteIndex::Keyword; 3]);
        assert_eq!(l0[4], PaletteIndex::Identifier);
        assert_eq!(l0[6], PaletteIndex::Punctuation);
        assert_eq!(&l0[8..10], &[PaletteIndex::Number; 2]);
        assert!(doc[0][12].comment);
        assert!(!doc[0][0].comment);

        let l1 = colors(&doc[1]);
        assert_eq!(l1[0], PaletteIndex::Keyword);
        assert_eq!(&l1[7..10], &[PaletteIndex::String; 3]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut doc = lines("a /* b\nc */ d\ne");
        let mut c = Colorizer::new(LanguageId::C);
        drain(&mut c, &mut doc);
        assert!(!doc[0][0].multi_line_comment);
        assert!(doc[0][2].multi_line_comment);
        assert!(doc[1][0].multi_line_comment);
        assert!(doc[1][3].multi_line_comment);
        assert!(!doc[1][5].multi_line_comment);
        assert!(!doc[2][0].multi_line_comment);
    }

    #[test]
    fn test_comment_markers_inside_strings_ignored() {
        let mut doc = lines("s = \"/* no\"; x\n// \"quoted\nnext");
        let mut c = Colorizer::new(LanguageId::Cpp);
        drain(&mut c, &mut doc);
        assert!(!doc[0][5].multi_line_comment);
        assert!(!doc[0][12].multi_line_comment);
        assert!(doc[1][4].comment);
        // a quote in a line comment does not open a string
        assert_eq!(doc[2][0].color, PaletteIndex::Identifier);
        assert!(!doc[2][0].comment);
    }

    #[test]
    fn test_python_docstring_needs_distinct_close() {
        let mut doc = lines("\"\"\"doc\"\"\" x\ny");
        let mut c = Colorizer::new(LanguageId::Python);
        drain(&mut c, &mut doc);
        assert!(doc[0][4].multi_line_comment);
        assert!(doc[0][8].multi_line_comment);
        assert!(!doc[0][10].multi_line_comment);
        assert!(!doc[1][0].multi_line_comment);
    }

    #[test]
    fn test_preprocessor_lines() {
        let mut doc = lines("#include <x>\n  #define Y 1\nint z;");
        let mut c = Colorizer::new(LanguageId::Cpp);
        drain(&mut c, &mut doc);
        assert!(doc[0][0].preprocessor);
        assert_eq!(doc[0][1].color, PaletteIndex::PreprocIdentifier);
        assert!(doc[1][2].preprocessor);
        assert!(!doc[2][0].preprocessor);
        assert_eq!(doc[2][0].color, PaletteIndex::Keyword);
    }

    #[test]
    fn test_backslash_continues_preprocessor_line() {
        let mut doc = lines("#define A \\\n  1\nint");
        let mut c = Colorizer::new(LanguageId::C);
        drain(&mut c, &mut doc);
        assert!(doc[1][2].preprocessor);
        assert!(!doc[2][0].preprocessor);
    }

    #[test]
    fn test_regex_language_batches() {
        let text = vec!["x = 1"; 25].join("\n");
        let mut doc = lines(&text);
        let mut c = Colorizer::new(LanguageId::Python);
        c.colorize(0, None, doc.len());
        assert!(c.tick(&mut doc, &[]));
        assert_eq!(c.dirty_range(), Some(10..25));
        assert_eq!(doc[0][4].color, PaletteIndex::Number);
        assert_eq!(doc[10][4].color, PaletteIndex::Default);
        assert!(c.tick(&mut doc, &[]));
        assert!(!c.tick(&mut doc, &[]));
        assert_eq!(doc[24][4].color, PaletteIndex::Number);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_semantic_tokens_win_over_classification() {
        let mut doc = lines("foo bar");
        let mut c = Colorizer::new(LanguageId::Cpp);
        c.colorize(0, None, doc.len());
        let tokens = vec![SemanticToken::new(0, 4, 3, "function")];
        c.tick(&mut doc, &tokens);
        assert_eq!(doc[0][0].color, PaletteIndex::Identifier);
        assert_eq!(doc[0][4].color, PaletteIndex::Function);
    }

    #[test]
    fn test_no_language_does_nothing() {
        let mut doc = lines("int x;");
        let mut c = Colorizer::new(LanguageId::None);
        c.colorize(0, None, 1);
        assert!(!c.tick(&mut doc, &[]));
        assert!(!c.is_dirty());
        assert_eq!(doc[0][0].color, PaletteIndex::Default);
    }

    #[test]
    fn test_sql_keywords_case_insensitive() {
        let mut doc = lines("select * from t");
        let mut c = Colorizer::new(LanguageId::Sql);
        drain(&mut c, &mut doc);
        assert_eq!(doc[0][0].color, PaletteIndex::Keyword);
        assert_eq!(doc[0][9].color, PaletteIndex::Keyword);
        assert_eq!(doc[0][14].color, PaletteIndex::Identifier);
    }
}
