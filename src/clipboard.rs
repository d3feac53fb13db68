//! Clipboard abstraction
//!
//! The editor only talks to a [`Clipboard`]; hosts plug in the system
//! clipboard. [`MemoryClipboard`] backs tests and headless use.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard does not support reading")]
    ReadingNotSupported,
    #[error("clipboard holds no text")]
    Empty,
    #[error("clipboard error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

pub trait Clipboard {
    fn name(&self) -> Cow<'_, str>;
    fn get_text(&self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Process-local clipboard holding the last copied text
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn name(&self) -> Cow<'_, str> {
        "memory".into()
    }

    fn get_text(&self) -> Result<String> {
        self.contents.clone().ok_or(ClipboardError::Empty)
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// A clipboard that discards writes and never has content
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn name(&self) -> Cow<'_, str> {
        "none".into()
    }

    fn get_text(&self) -> Result<String> {
        Err(ClipboardError::ReadingNotSupported)
    }

    fn set_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert!(matches!(clipboard.get_text(), Err(ClipboardError::Empty)));
        clipboard.set_text("hello").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "hello");
        assert_eq!(clipboard.contents(), Some("hello"));
    }

    #[test]
    fn test_no_clipboard_rejects_reads() {
        let mut clipboard = NoClipboard;
        clipboard.set_text("dropped").unwrap();
        assert!(matches!(
            clipboard.get_text(),
            Err(ClipboardError::ReadingNotSupported)
        ));
        assert_eq!(clipboard.name(), "none");
    }
}
