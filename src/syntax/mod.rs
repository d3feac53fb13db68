//! Syntax coloring
//!
//! Coloring is regex and scanner based, driven incrementally:
//!
//! ```text
//! edit → Colorizer::colorize(range) → tick() per frame
//!      → comment scan (whole document) → token classification (bounded slice)
//!      → semantic tokens reapplied
//! ```
//!
//! ## Languages
//!
//! C, C++, C#, AngelScript, GLSL and HLSL share the native C-style scanner.
//! Python, Lua, JSON and SQL use regex tables only.

pub mod colorizer;
pub mod language;
pub mod tokenizer;

pub use colorizer::{Colorizer, NATIVE_BATCH_LINES, REGEX_BATCH_LINES};
pub use language::{LanguageDefinition, LanguageId};
pub use tokenizer::{tokenize_c_style, NativeTokenizer, Token, Tokenizer};
