//! Glyph storage: one UTF-8 code unit plus its color and style tags

use crate::palette::PaletteIndex;

/// Render style bits as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphStyle(u8);

impl GlyphStyle {
    pub const NONE: GlyphStyle = GlyphStyle(0);
    pub const ITALIC: GlyphStyle = GlyphStyle(0b0001);
    pub const BOLD: GlyphStyle = GlyphStyle(0b0010);
    pub const UNDERLINE: GlyphStyle = GlyphStyle(0b0100);
    pub const STRIKETHROUGH: GlyphStyle = GlyphStyle(0b1000);

    /// Create a style from individual flags
    pub const fn new(italic: bool, bold: bool, underline: bool, strikethrough: bool) -> Self {
        let mut bits = 0u8;
        if italic {
            bits |= 0b0001;
        }
        if bold {
            bits |= 0b0010;
        }
        if underline {
            bits |= 0b0100;
        }
        if strikethrough {
            bits |= 0b1000;
        }
        GlyphStyle(bits)
    }

    #[inline]
    pub const fn italic(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn bold(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn underline(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn strikethrough(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: GlyphStyle) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for GlyphStyle {
    type Output = GlyphStyle;

    fn bitor(self, rhs: Self) -> Self::Output {
        GlyphStyle(self.0 | rhs.0)
    }
}

/// One stored byte of a line
///
/// The comment, multi-line comment and preprocessor flags are owned by the
/// colorizer's comment scan and are rewritten on every full pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub byte: u8,
    pub color: PaletteIndex,
    pub style: GlyphStyle,
    pub comment: bool,
    pub multi_line_comment: bool,
    pub preprocessor: bool,
}

impl Glyph {
    pub const fn new(byte: u8, color: PaletteIndex) -> Self {
        Self {
            byte,
            color,
            style: GlyphStyle::NONE,
            comment: false,
            multi_line_comment: false,
            preprocessor: false,
        }
    }

    pub const fn plain(byte: u8) -> Self {
        Self::new(byte, PaletteIndex::Default)
    }
}

/// A document line. Never contains `\n`.
pub type Line = Vec<Glyph>;

/// Build a line from text, dropping any `\r`
pub fn line_from_str(text: &str) -> Line {
    text.bytes()
        .filter(|&b| b != b'\r')
        .map(Glyph::plain)
        .collect()
}

/// Collect a run of glyphs back into text
pub fn glyphs_to_string(glyphs: &[Glyph]) -> String {
    let bytes: Vec<u8> = glyphs.iter().map(|g| g.byte).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Length in bytes of the UTF-8 sequence introduced by `lead`
///
/// Stray continuation bytes and invalid leads count as one byte so walks
/// always make progress.
#[inline]
pub const fn utf8_char_len(lead: u8) -> usize {
    if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Whether `byte` continues a multi-byte UTF-8 sequence
#[inline]
pub const fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
