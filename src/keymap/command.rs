//! Command enum covering every action a key can trigger
//!
//! Commands are plain data; [`crate::update::update`] applies them to an
//! editor. Names are stable and used in keymap files.

use std::fmt;
use std::str::FromStr;

macro_rules! commands {
    ($($(#[$doc:meta])* $name:ident,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Command {
            $($(#[$doc])* $name,)*
        }

        impl Command {
            pub const ALL: &'static [Command] = &[$(Command::$name,)*];

            /// Name used in keymap files
            pub fn name(self) -> &'static str {
                match self {
                    $(Command::$name => stringify!($name),)*
                }
            }
        }
    };
}

commands! {
    // ========================================================================
    // Cursor Movement
    // ========================================================================
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,
    PageUp,
    PageDown,

    // ========================================================================
    // Selection Movement
    // ========================================================================
    MoveCursorUpWithSelection,
    MoveCursorDownWithSelection,
    MoveCursorLeftWithSelection,
    MoveCursorRightWithSelection,
    MoveCursorWordLeftWithSelection,
    MoveCursorWordRightWithSelection,
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    PageUpWithSelection,
    PageDownWithSelection,

    // ========================================================================
    // Selection and Multi-Cursor
    // ========================================================================
    SelectAll,
    /// Select the word under the caret
    SelectWord,
    /// Select the current line
    SelectLine,
    /// Drop selections, keeping every cursor
    ClearSelection,
    /// Keep only the first cursor
    CollapseToSingleCursor,
    AddCursorAbove,
    AddCursorBelow,
    /// Select the word, or add a cursor on the next match of the selection
    SelectNextOccurrence,
    /// One cursor per match of the selection or word
    SelectAllOccurrences,

    // ========================================================================
    // Text Editing
    // ========================================================================
    InsertNewline,
    /// Tab; indents when the selection spans lines
    InsertTab,
    /// Shift+Tab; outdents when the selection spans lines
    InsertBacktab,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    /// Remove every line holding a cursor
    DeleteLine,
    IndentLines,
    UnindentLines,
    MoveLinesUp,
    MoveLinesDown,
    ToggleLineComment,

    // ========================================================================
    // Clipboard and History
    // ========================================================================
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,

    /// Removes a default binding in a user keymap
    Unbound,
}

impl Command {
    /// Whether the command changes the document. Cut is not counted: on a
    /// read-only editor it still copies.
    pub fn modifies_text(self) -> bool {
        use Command::*;
        matches!(
            self,
            InsertNewline
                | InsertTab
                | InsertBacktab
                | DeleteBackward
                | DeleteForward
                | DeleteWordBackward
                | DeleteWordForward
                | DeleteLine
                | IndentLines
                | UnindentLines
                | MoveLinesUp
                | MoveLinesDown
                | ToggleLineComment
                | Paste
                | Undo
                | Redo
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or(())
    }
}
