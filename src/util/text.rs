//! Byte classification for word navigation
//!
//! Words are classified per stored byte. Every byte of a multi-byte UTF-8
//! sequence counts as a word character, so non-ASCII letters join the
//! surrounding identifier and a UTF-8 sequence is never split by a word
//! boundary.

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// ASCII whitespace
    Whitespace,
    /// ASCII alphanumerics, `_`, and any non-ASCII byte
    WordChar,
    /// Everything else
    Punctuation,
}

/// Get the character type of a stored byte
pub fn char_type(byte: u8) -> CharType {
    if byte.is_ascii_whitespace() || byte == 0x0b {
        CharType::Whitespace
    } else if is_word_byte(byte) {
        CharType::WordChar
    } else {
        CharType::Punctuation
    }
}

/// Check if a byte belongs to a word
#[inline]
pub fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

/// Whether `next` continues the run started by `initial`
///
/// Whitespace and word runs continue while the class matches; punctuation
/// runs continue only over the same byte, so `->` splits but `===` does not.
pub fn same_run(initial: u8, next: u8) -> bool {
    match char_type(initial) {
        CharType::Punctuation => next == initial,
        class => char_type(next) == class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_type() {
        assert_eq!(char_type(b' '), CharType::Whitespace);
        assert_eq!(char_type(b'\t'), CharType::Whitespace);
        assert_eq!(char_type(b'a'), CharType::WordChar);
        assert_eq!(char_type(b'9'), CharType::WordChar);
        assert_eq!(char_type(b'_'), CharType::WordChar);
        assert_eq!(char_type("é".as_bytes()[0]), CharType::WordChar);
        assert_eq!(char_type("é".as_bytes()[1]), CharType::WordChar);
        assert_eq!(char_type(b'.'), CharType::Punctuation);
        assert_eq!(char_type(b'('), CharType::Punctuation);
    }

    #[test]
    fn test_same_run() {
        assert!(same_run(b'a', b'Z'));
        assert!(same_run(b' ', b'\t'));
        assert!(same_run(b'=', b'='));
        assert!(!same_run(b'-', b'>'));
        assert!(!same_run(b'a', b'.'));
        assert!(!same_run(b'.', b'a'));
    }
}
