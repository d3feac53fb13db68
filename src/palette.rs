//! Color palettes for syntax and editor chrome
//!
//! A palette maps every [`PaletteIndex`] to an RGBA color. Four palettes are
//! built in; user palettes are YAML files that start from a built-in base and
//! override individual entries:
//!
//! ```yaml
//! base: dark
//! colors:
//!   keyword: "#ff8800"
//!   comment: "#6b728080"
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Color slots of a palette, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteIndex {
    #[default]
    Default,
    Keyword,
    Number,
    String,
    CharLiteral,
    Punctuation,
    Preprocessor,
    Identifier,
    KnownIdentifier,
    PreprocIdentifier,
    Comment,
    MultiLineComment,
    // Semantic highlighting
    Function,
    Type,
    Variable,
    Namespace,
    Constant,
    Parameter,
    EnumMember,
    Property,
    Method,
    StaticSymbol,
    Deprecated,
    Macro,
    Label,
    Operator,
    TypeParameter,
    Concept,
    // Editor chrome
    Background,
    Cursor,
    Selection,
    ErrorMarker,
    ControlCharacter,
    Breakpoint,
    LineNumber,
    CurrentLineFill,
    CurrentLineFillInactive,
    CurrentLineEdge,
}

impl PaletteIndex {
    /// Number of palette slots
    pub const COUNT: usize = 38;

    /// Every index in storage order
    pub const ALL: [PaletteIndex; Self::COUNT] = [
        PaletteIndex::Default,
        PaletteIndex::Keyword,
        PaletteIndex::Number,
        PaletteIndex::String,
        PaletteIndex::CharLiteral,
        PaletteIndex::Punctuation,
        PaletteIndex::Preprocessor,
        PaletteIndex::Identifier,
        PaletteIndex::KnownIdentifier,
        PaletteIndex::PreprocIdentifier,
        PaletteIndex::Comment,
        PaletteIndex::MultiLineComment,
        PaletteIndex::Function,
        PaletteIndex::Type,
        PaletteIndex::Variable,
        PaletteIndex::Namespace,
        PaletteIndex::Constant,
        PaletteIndex::Parameter,
        PaletteIndex::EnumMember,
        PaletteIndex::Property,
        PaletteIndex::Method,
        PaletteIndex::StaticSymbol,
        PaletteIndex::Deprecated,
        PaletteIndex::Macro,
        PaletteIndex::Label,
        PaletteIndex::Operator,
        PaletteIndex::TypeParameter,
        PaletteIndex::Concept,
        PaletteIndex::Background,
        PaletteIndex::Cursor,
        PaletteIndex::Selection,
        PaletteIndex::ErrorMarker,
        PaletteIndex::ControlCharacter,
        PaletteIndex::Breakpoint,
        PaletteIndex::LineNumber,
        PaletteIndex::CurrentLineFill,
        PaletteIndex::CurrentLineFillInactive,
        PaletteIndex::CurrentLineEdge,
    ];

    #[inline]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

/// Built-in palette identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteId {
    #[default]
    Dark,
    Light,
    Mariana,
    RetroBlue,
}

impl PaletteId {
    /// Parse a palette name as written in config files and on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "dark" => Some(PaletteId::Dark),
            "light" => Some(PaletteId::Light),
            "mariana" => Some(PaletteId::Mariana),
            "retro_blue" | "retroblue" => Some(PaletteId::RetroBlue),
            _ => None,
        }
    }

    /// Get display name for the palette
    pub fn display_name(self) -> &'static str {
        match self {
            PaletteId::Dark => "Dark",
            PaletteId::Light => "Light",
            PaletteId::Mariana => "Mariana",
            PaletteId::RetroBlue => "Retro Blue",
        }
    }
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xRRGGBBAA` value
    pub const fn from_rgba_u32(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Pack into `0xRRGGBBAA`
    pub const fn to_rgba_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Return a new color with the alpha channel multiplied by `factor`
    pub fn scale_alpha(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Channel-wise average of two colors
    pub const fn average(self, other: Color) -> Self {
        Self {
            r: ((self.r as u16 + other.r as u16) / 2) as u8,
            g: ((self.g as u16 + other.g as u16) / 2) as u8,
            b: ((self.b as u16 + other.b as u16) / 2) as u8,
            a: ((self.a as u16 + other.a as u16) / 2) as u8,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// A full set of colors, one per [`PaletteIndex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; PaletteIndex::COUNT],
}

impl Palette {
    /// Assemble a palette from its syntax, semantic and chrome sections
    const fn from_sections(syntax: [u32; 12], semantic: [u32; 16], chrome: [u32; 10]) -> Self {
        let mut colors = [Color::rgba(0, 0, 0, 0); PaletteIndex::COUNT];
        let mut i = 0;
        while i < 12 {
            colors[i] = Color::from_rgba_u32(syntax[i]);
            i += 1;
        }
        let mut j = 0;
        while j < 16 {
            colors[12 + j] = Color::from_rgba_u32(semantic[j]);
            j += 1;
        }
        let mut k = 0;
        while k < 10 {
            colors[28 + k] = Color::from_rgba_u32(chrome[k]);
            k += 1;
        }
        Self { colors }
    }

    /// Get a built-in palette
    pub fn builtin(id: PaletteId) -> Self {
        match id {
            PaletteId::Dark => DARK,
            PaletteId::Light => LIGHT,
            PaletteId::Mariana => MARIANA,
            PaletteId::RetroBlue => RETRO_BLUE,
        }
    }

    #[inline]
    pub fn get(&self, index: PaletteIndex) -> Color {
        self.colors[index.as_usize()]
    }

    pub fn set(&mut self, index: PaletteIndex, color: Color) {
        self.colors[index.as_usize()] = color;
    }

    /// Parse a YAML palette (a built-in base plus hex overrides)
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: PaletteData = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        let mut palette = Palette::builtin(data.base);
        for (index, hex) in data.colors {
            palette.set(index, Color::from_hex(&hex)?);
        }
        Ok(palette)
    }

    /// Load a palette from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read palette file {}", path.display()))?;
        Self::from_yaml(&content)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("Failed to parse palette file {}", path.display()))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::builtin(PaletteId::Dark)
    }
}

/// Raw palette data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
struct PaletteData {
    #[serde(default)]
    base: PaletteId,
    #[serde(default)]
    colors: HashMap<PaletteIndex, String>,
}

const DARK: Palette = Palette::from_sections(
    [
        0xe8eaefff, 0xe8a76aff, 0xe5b455ff, 0x6fcf8eff, 0x6fcf8eff, 0xa8adb8ff, 0xb794f6ff,
        0xe8eaefff, 0x5ac8bdff, 0xe5b455ff, 0x6b7280ff, 0x6b7280ff,
    ],
    [
        0x7aa2f7ff, 0x5ac8bdff, 0xe8eaefff, 0xb794f6ff, 0xe5b455ff, 0xd4d7deff, 0xe5b455ff,
        0xc6cbd4ff, 0x7aa2f7ff, 0xe8a76aff, 0x6b7280ff, 0xb794f6ff, 0xa8adb8ff, 0xa8adb8ff,
        0x5ac8bdff, 0x5ac8bdff,
    ],
    [
        0x0d0e10ff, 0xe8eaefff, 0x5ac8bd40, 0xe86b7380, 0x8b919e25, 0xe86b7340, 0x5d636fff,
        0xe8eaef08, 0xe8eaef04, 0x5ac8bd18,
    ],
);

const MARIANA: Palette = Palette::from_sections(
    [
        0xf8f8f2ff, 0xc792eaff, 0xf78c6cff, 0xaddb67ff, 0xaddb67ff, 0x89ddffff, 0x82aaffff,
        0xf8f8f2ff, 0x80cbc4ff, 0xffcb6bff, 0x637777ff, 0x637777ff,
    ],
    [
        0x82aaffff, 0xffcb6bff, 0xf8f8f2ff, 0xc792eaff, 0xf78c6cff, 0xf8f8f2ff, 0xf78c6cff,
        0x89ddffff, 0x82aaffff, 0xc792eaff, 0x637777ff, 0x82aaffff, 0x89ddffff, 0x89ddffff,
        0xffcb6bff, 0xffcb6bff,
    ],
    [
        0x263238ff, 0xf8f8f2ff, 0x54657060, 0xff5370a0, 0x54657040, 0xff537050, 0x546570c0,
        0x54657020, 0x54657010, 0x80cbc420,
    ],
);

const LIGHT: Palette = Palette::from_sections(
    [
        0x404040ff, 0x060cffff, 0x008000ff, 0xa02020ff, 0x704030ff, 0x000000ff, 0x606040ff,
        0x404040ff, 0x106060ff, 0xa040c0ff, 0x205020ff, 0x205040ff,
    ],
    [
        0x795e26ff, 0x267f99ff, 0x001080ff, 0x267f99ff, 0x0070c1ff, 0x001080ff, 0x0070c1ff,
        0x001080ff, 0x795e26ff, 0x0000ffff, 0x808080ff, 0x606040ff, 0x000000ff, 0x000000ff,
        0x267f99ff, 0x267f99ff,
    ],
    [
        0xffffffff, 0x000000ff, 0x00006040, 0xff1000a0, 0x90909090, 0x0080f080, 0x005050ff,
        0x00000040, 0x80808040, 0x00000040,
    ],
);

const RETRO_BLUE: Palette = Palette::from_sections(
    [
        0xffff00ff, 0x00ffffff, 0x00ff00ff, 0x008080ff, 0x008080ff, 0xffffffff, 0x008000ff,
        0xffff00ff, 0xffffffff, 0xff00ffff, 0x808080ff, 0x404040ff,
    ],
    [
        0xffff00ff, 0xff00ffff, 0xffff00ff, 0x00ffffff, 0x00ff00ff, 0xffff00ff, 0x00ff00ff,
        0xffffffff, 0xffff00ff, 0xff00ffff, 0x808080ff, 0x008000ff, 0xffffffff, 0xffffffff,
        0xff00ffff, 0xff00ffff,
    ],
    [
        0x000080ff, 0xff8000ff, 0x00ffff80, 0xff0000a0, 0x80808080, 0x0080ff80, 0x008080ff,
        0x00000040, 0x80808040, 0x00000040,
    ],
);
