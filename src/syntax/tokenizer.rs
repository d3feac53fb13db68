//! Token recognition
//!
//! A [`Tokenizer`] finds the next token at the start of a byte slice. It is
//! a chain of stages tried in order: the language's native scanner first,
//! then its regex table. Regex patterns are compiled once per editor when
//! the language changes; a pattern that fails to compile is logged and
//! dropped.

use regex::bytes::Regex;

use super::language::LanguageDefinition;
use crate::palette::PaletteIndex;

/// A token found at the start of the scanned slice. Offsets are relative to
/// the slice; leading blanks may be skipped, so `start` can be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub color: PaletteIndex,
}

/// Hand-written scanner for a language family
pub type NativeTokenizer = fn(&[u8]) -> Option<Token>;

/// One way of recognising tokens
#[derive(Debug, Clone)]
pub enum TokenizerStage {
    Native(NativeTokenizer),
    RegexTable(Vec<(Regex, PaletteIndex)>),
}

impl TokenizerStage {
    fn next_token(&self, input: &[u8]) -> Option<Token> {
        match self {
            TokenizerStage::Native(scan) => scan(input),
            TokenizerStage::RegexTable(rules) => rules.iter().find_map(|(re, color)| {
                re.find(input)
                    .filter(|m| m.start() == 0 && m.end() > 0)
                    .map(|m| Token {
                        start: 0,
                        end: m.end(),
                        color: *color,
                    })
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stages: Vec<TokenizerStage>,
}

impl Tokenizer {
    /// Build the stage chain for a language, compiling its regex rules
    pub fn for_language(def: &LanguageDefinition) -> Self {
        let mut stages = Vec::new();
        if let Some(native) = def.native_tokenizer {
            stages.push(TokenizerStage::Native(native));
        }

        let rules = compile_rules(def.token_rules);
        if !rules.is_empty() {
            stages.push(TokenizerStage::RegexTable(rules));
        }

        tracing::debug!("tokenizer for {}: {} stage(s)", def.name, stages.len());
        Self { stages }
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn has_native(&self) -> bool {
        self.stages
            .iter()
            .any(|s| matches!(s, TokenizerStage::Native(_)))
    }

    pub fn next_token(&self, input: &[u8]) -> Option<Token> {
        self.stages.iter().find_map(|stage| stage.next_token(input))
    }
}

/// Compile anchored patterns, skipping (and logging) broken ones
pub fn compile_rules(rules: &[(&str, PaletteIndex)]) -> Vec<(Regex, PaletteIndex)> {
    rules
        .iter()
        .filter_map(|(pattern, color)| match Regex::new(&format!("^(?:{})", pattern)) {
            Ok(re) => Some((re, *color)),
            Err(e) => {
                tracing::warn!("skipping token rule {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

// ============================================================================
// C-style native scanner
// ============================================================================

/// Scanner shared by the C family: strings, character literals,
/// identifiers, numbers and punctuation, after skipping blanks
pub fn tokenize_c_style(input: &[u8]) -> Option<Token> {
    let start = input
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(input.len());
    let rest = &input[start..];
    if rest.is_empty() {
        return Some(Token {
            start: input.len(),
            end: input.len(),
            color: PaletteIndex::Default,
        });
    }

    let (len, color) = scan_string(rest)
        .map(|n| (n, PaletteIndex::String))
        .or_else(|| scan_char_literal(rest).map(|n| (n, PaletteIndex::CharLiteral)))
        .or_else(|| scan_identifier(rest).map(|n| (n, PaletteIndex::Identifier)))
        .or_else(|| scan_number(rest).map(|n| (n, PaletteIndex::Number)))
        .or_else(|| scan_punctuation(rest).map(|n| (n, PaletteIndex::Punctuation)))?;

    Some(Token {
        start,
        end: start + len,
        color,
    })
}

fn scan_string(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'"') {
        return None;
    }
    let mut i = 1;
    while i < input.len() {
        match input[i] {
            b'"' => return Some(i + 1),
            b'\\' if i + 1 < input.len() && input[i + 1] == b'"' => i += 1,
            _ => {}
        }
        i += 1;
    }
    None
}

fn scan_char_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'\'') {
        return None;
    }
    let mut i = 1;
    if input.get(i) == Some(&b'\\') {
        i += 1;
    }
    if i < input.len() {
        i += 1;
    }
    (input.get(i) == Some(&b'\'')).then_some(i + 1)
}

fn scan_identifier(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = input
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(input.len());
    Some(len)
}

fn scan_number(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    let starts_with_digit = first.is_ascii_digit();
    if !starts_with_digit && first != b'+' && first != b'-' {
        return None;
    }

    let mut i = 1;
    let mut has_digits = starts_with_digit;
    while i < input.len() && input[i].is_ascii_digit() {
        has_digits = true;
        i += 1;
    }
    if !has_digits {
        return None;
    }

    let mut is_float = false;
    let mut is_hex = false;
    let mut is_binary = false;

    match input.get(i) {
        Some(b'.') => {
            is_float = true;
            i += 1;
            while i < input.len() && input[i].is_ascii_digit() {
                i += 1;
            }
        }
        Some(b'x' | b'X') if i == 1 && first == b'0' => {
            is_hex = true;
            i += 1;
            while i < input.len() && input[i].is_ascii_hexdigit() {
                i += 1;
            }
        }
        Some(b'b' | b'B') if i == 1 && first == b'0' => {
            is_binary = true;
            i += 1;
            while i < input.len() && matches!(input[i], b'0' | b'1') {
                i += 1;
            }
        }
        _ => {}
    }

    if !is_hex && !is_binary {
        if let Some(b'e' | b'E') = input.get(i) {
            is_float = true;
            i += 1;
            if let Some(b'+' | b'-') = input.get(i) {
                i += 1;
            }
            let digits_start = i;
            while i < input.len() && input[i].is_ascii_digit() {
                i += 1;
            }
            if i == digits_start {
                return None;
            }
        }
    }

    if is_float {
        if let Some(b'f' | b'F') = input.get(i) {
            i += 1;
        }
    } else {
        while let Some(b'u' | b'U' | b'l' | b'L') = input.get(i) {
            i += 1;
        }
    }

    Some(i)
}

fn scan_punctuation(input: &[u8]) -> Option<usize> {
    match input.first()? {
        b'[' | b']' | b'{' | b'}' | b'!' | b'%' | b'^' | b'&' | b'*' | b'(' | b')' | b'-'
        | b'+' | b'=' | b'~' | b'|' | b'<' | b'>' | b'?' | b':' | b'/' | b';' | b',' | b'.' => {
            Some(1)
        }
        _ => None,
    }
}
