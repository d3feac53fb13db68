//! Document storage: glyphs, lines and coordinates

pub mod buffer;
pub mod coords;
pub mod glyph;

pub use buffer::{Lean, TextBuffer, DEFAULT_TAB_SIZE, MAX_TAB_SIZE, MIN_TAB_SIZE};
pub use coords::Coordinates;
pub use glyph::{
    glyphs_to_string, is_utf8_continuation, line_from_str, utf8_char_len, Glyph, GlyphStyle, Line,
};
