//! Context for conditional keybindings
//!
//! Lets one key do different things depending on editor state, such as
//! Escape collapsing extra cursors before it clears a selection.

use serde::Deserialize;

use crate::editor::TextEditor;

/// Editor state relevant to binding selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub has_selection: bool,
    pub has_multiple_cursors: bool,
}

impl KeyContext {
    pub fn from_editor(editor: &TextEditor) -> Self {
        Self {
            has_selection: editor.any_cursor_has_selection(),
            has_multiple_cursors: editor.cursor_count() > 1,
        }
    }
}

/// Conditions on a binding; several are ANDed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    HasSelection,
    NoSelection,
    HasMultipleCursors,
    SingleCursor,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
            Condition::HasMultipleCursors => ctx.has_multiple_cursors,
            Condition::SingleCursor => !ctx.has_multiple_cursors,
        }
    }

    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
