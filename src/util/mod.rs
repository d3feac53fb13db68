//! Utility modules

pub mod text;

pub use text::{char_type, is_word_byte, same_run, CharType};
