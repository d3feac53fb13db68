//! Default keybindings
//!
//! The built-in table is merged with `keymap.yaml` from the config
//! directory when one exists.

use super::binding::Keybinding;
use super::command::Command;
use super::config::load_keymap_file;
use super::context::Condition;
use super::keymap::Keymap;
use super::types::{KeyCode, Keystroke, Modifiers};

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

fn bind_char(c: char, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::char_with_mods(c, mods), command)
}

/// Built-in bindings. The command modifier is Cmd on macOS, Ctrl elsewhere.
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let cmd_alt = cmd | Modifiers::ALT;
    let shift = Modifiers::SHIFT;
    let alt = Modifiers::ALT;
    let none = Modifiers::NONE;

    let mut bindings = vec![
        // ====================================================================
        // Undo/Redo
        // ====================================================================
        bind_char('z', cmd, Command::Undo),
        bind(KeyCode::Backspace, alt, Command::Undo),
        bind_char('y', cmd, Command::Redo),
        bind_char('z', cmd_shift, Command::Redo),
        // ====================================================================
        // Clipboard
        // ====================================================================
        bind_char('c', cmd, Command::Copy),
        bind(KeyCode::Insert, cmd, Command::Copy),
        bind_char('v', cmd, Command::Paste),
        bind(KeyCode::Insert, shift, Command::Paste),
        bind_char('x', cmd, Command::Cut),
        bind(KeyCode::Delete, shift, Command::Cut),
        // ====================================================================
        // Selection and Multi-Cursor
        // ====================================================================
        bind_char('a', cmd, Command::SelectAll),
        bind_char('d', cmd, Command::SelectNextOccurrence),
        bind_char('l', cmd_shift, Command::SelectAllOccurrences),
        bind(KeyCode::Up, cmd_alt, Command::AddCursorAbove),
        bind(KeyCode::Down, cmd_alt, Command::AddCursorBelow),
        bind(KeyCode::Escape, none, Command::ClearSelection),
        bind(KeyCode::Escape, none, Command::CollapseToSingleCursor)
            .when_single(Condition::HasMultipleCursors),
        // ====================================================================
        // Line Commands
        // ====================================================================
        bind_char('k', cmd_shift, Command::DeleteLine),
        bind_char('[', cmd, Command::UnindentLines),
        bind_char(']', cmd, Command::IndentLines),
        bind(KeyCode::Up, cmd_shift, Command::MoveLinesUp),
        bind(KeyCode::Down, cmd_shift, Command::MoveLinesDown),
        bind_char('/', cmd, Command::ToggleLineComment),
        // ====================================================================
        // Text Editing
        // ====================================================================
        bind(KeyCode::Enter, none, Command::InsertNewline),
        bind(KeyCode::Tab, none, Command::InsertTab),
        bind(KeyCode::Tab, shift, Command::InsertBacktab),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Backspace, shift, Command::DeleteBackward),
        bind(KeyCode::Backspace, cmd, Command::DeleteWordBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Delete, cmd, Command::DeleteWordForward),
        // ====================================================================
        // Document Navigation
        // ====================================================================
        bind(KeyCode::Home, cmd, Command::MoveCursorDocumentStart),
        bind(KeyCode::Home, cmd_shift, Command::MoveCursorDocumentStartWithSelection),
        bind(KeyCode::End, cmd, Command::MoveCursorDocumentEnd),
        bind(KeyCode::End, cmd_shift, Command::MoveCursorDocumentEndWithSelection),
        bind(KeyCode::Left, cmd, Command::MoveCursorWordLeft),
        bind(KeyCode::Left, cmd_shift, Command::MoveCursorWordLeftWithSelection),
        bind(KeyCode::Right, cmd, Command::MoveCursorWordRight),
        bind(KeyCode::Right, cmd_shift, Command::MoveCursorWordRightWithSelection),
    ];

    // Plain and shifted navigation keys
    let navigation = [
        (KeyCode::Up, Command::MoveCursorUp, Command::MoveCursorUpWithSelection),
        (KeyCode::Down, Command::MoveCursorDown, Command::MoveCursorDownWithSelection),
        (KeyCode::Left, Command::MoveCursorLeft, Command::MoveCursorLeftWithSelection),
        (KeyCode::Right, Command::MoveCursorRight, Command::MoveCursorRightWithSelection),
        (KeyCode::Home, Command::MoveCursorLineStart, Command::MoveCursorLineStartWithSelection),
        (KeyCode::End, Command::MoveCursorLineEnd, Command::MoveCursorLineEndWithSelection),
        (KeyCode::PageUp, Command::PageUp, Command::PageUpWithSelection),
        (KeyCode::PageDown, Command::PageDown, Command::PageDownWithSelection),
    ];
    for (key, plain, selecting) in navigation {
        bindings.push(bind(key, none, plain));
        bindings.push(bind(key, shift, selecting));
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - same keystroke and conditions: the user binding replaces the base one
/// - `Unbound`: removes every base binding for the keystroke
/// - otherwise the user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);
        match existing {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Defaults merged with the user keymap, if any. A broken user file is
/// logged and ignored.
pub fn load_default_keymap() -> Keymap {
    let mut bindings = default_bindings();

    if let Some(path) = crate::config_paths::keymap_file().filter(|p| p.exists()) {
        match load_keymap_file(&path) {
            Ok(user) => {
                tracing::info!("merging user keymap from {} ({} bindings)", path.display(), user.len());
                bindings = merge_bindings(bindings, user);
            }
            Err(e) => tracing::warn!("ignoring keymap {}: {}", path.display(), e),
        }
    }

    Keymap::with_bindings(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> Keystroke {
        Keystroke::char_with_mods(c, Modifiers::CTRL)
    }

    #[test]
    fn test_defaults_have_no_duplicate_unconditional_keys() {
        let bindings = default_bindings();
        for (i, a) in bindings.iter().enumerate() {
            for b in &bindings[i + 1..] {
                assert!(
                    a.keystroke != b.keystroke || a.when != b.when,
                    "duplicate binding for {}",
                    a.keystroke
                );
            }
        }
    }

    #[test]
    fn test_default_keymap_lookups() {
        let keymap = Keymap::with_bindings(default_bindings());
        let cmd = Modifiers::cmd();
        let lookup = |key, mods| keymap.lookup(&Keystroke::new(key, mods));

        assert_eq!(lookup(KeyCode::Char('z'), cmd), Some(Command::Undo));
        assert_eq!(lookup(KeyCode::Char('z'), cmd | Modifiers::SHIFT), Some(Command::Redo));
        assert_eq!(lookup(KeyCode::Char('/'), cmd), Some(Command::ToggleLineComment));
        assert_eq!(
            lookup(KeyCode::Down, cmd | Modifiers::ALT),
            Some(Command::AddCursorBelow)
        );
        assert_eq!(
            lookup(KeyCode::PageDown, Modifiers::SHIFT),
            Some(Command::PageDownWithSelection)
        );
        assert_eq!(lookup(KeyCode::Char('q'), cmd), None);
    }

    #[test]
    fn test_merge_overrides_existing() {
        let base = vec![Keybinding::new(ctrl('z'), Command::Undo)];
        let user = vec![Keybinding::new(ctrl('z'), Command::Redo)];
        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].command, Command::Redo);
    }

    #[test]
    fn test_merge_unbound_removes_binding() {
        let base = vec![
            Keybinding::new(ctrl('z'), Command::Undo),
            Keybinding::new(ctrl('y'), Command::Redo),
        ];
        let user = vec![Keybinding::new(ctrl('z'), Command::Unbound)];
        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].command, Command::Redo);
    }

    #[test]
    fn test_merge_conditional_binding_adds() {
        let tab = Keystroke::key(KeyCode::Tab);
        let base = vec![Keybinding::new(tab, Command::InsertTab)];
        let user = vec![Keybinding::new(tab, Command::IndentLines).when_single(Condition::HasSelection)];
        let merged = merge_bindings(base, user);
        assert_eq!(merged.len(), 2);
    }
}
