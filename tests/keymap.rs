//! Keyboard-driven editing: keystrokes resolved through the default keymap
//! and applied with the update dispatcher

mod common;

use caret::clipboard::MemoryClipboard;
use caret::keymap::{
    default_bindings, load_keymap_file, merge_bindings, parse_keymap_yaml, KeyCode, KeyContext,
    Keymap, Keystroke, Modifiers,
};
use caret::syntax::LanguageId;
use caret::update::{type_text, update};
use caret::{Command, TextEditor};
use common::{carets, editor_with};

struct Session {
    editor: TextEditor,
    clipboard: MemoryClipboard,
    keymap: Keymap,
}

impl Session {
    fn new(text: &str) -> Self {
        Self {
            editor: editor_with(text),
            clipboard: MemoryClipboard::new(),
            keymap: Keymap::with_bindings(default_bindings()),
        }
    }

    /// Resolve and apply one keystroke; returns the command that ran
    fn press(&mut self, key: KeyCode, mods: Modifiers) -> Option<Command> {
        let context = KeyContext::from_editor(&self.editor);
        let command = self
            .keymap
            .lookup_with_context(&Keystroke::new(key, mods), Some(&context))?;
        update(&mut self.editor, &mut self.clipboard, command);
        Some(command)
    }

    fn press_char(&mut self, c: char, mods: Modifiers) -> Option<Command> {
        self.press(KeyCode::Char(c), mods)
    }
}

fn cmd() -> Modifiers {
    Modifiers::cmd()
}

// ========================================================================
// Editing sessions
// ========================================================================

#[test]
fn test_cut_and_paste_with_shortcuts() {
    let mut s = Session::new("");
    type_text(&mut s.editor, "hello world");

    s.press(KeyCode::Left, cmd() | Modifiers::SHIFT);
    assert_eq!(s.editor.selected_text(None), "world");

    assert_eq!(s.press_char('x', cmd()), Some(Command::Cut));
    assert_eq!(s.editor.text(), "hello ");
    assert_eq!(s.clipboard.contents(), Some("world"));

    s.press(KeyCode::Home, Modifiers::NONE);
    s.press_char('v', cmd());
    assert_eq!(s.editor.text(), "worldhello ");

    s.press_char('z', cmd());
    assert_eq!(s.editor.text(), "hello ");
    s.press_char('z', cmd() | Modifiers::SHIFT);
    assert_eq!(s.editor.text(), "worldhello ");
}

#[test]
fn test_escape_collapses_cursors_before_clearing_selection() {
    let mut s = Session::new("abc\nabc\nabc");
    s.press(KeyCode::Down, cmd() | Modifiers::ALT);
    s.press(KeyCode::Down, cmd() | Modifiers::ALT);
    assert_eq!(s.editor.cursor_count(), 3);
    s.press(KeyCode::End, Modifiers::SHIFT);

    assert_eq!(
        s.press(KeyCode::Escape, Modifiers::NONE),
        Some(Command::CollapseToSingleCursor)
    );
    assert_eq!(s.editor.cursor_count(), 1);
    assert!(s.editor.any_cursor_has_selection());

    assert_eq!(
        s.press(KeyCode::Escape, Modifiers::NONE),
        Some(Command::ClearSelection)
    );
    assert!(!s.editor.any_cursor_has_selection());
}

#[test]
fn test_select_next_occurrence_then_type() {
    let mut s = Session::new("cat dog cat");
    s.press_char('d', cmd());
    s.press_char('d', cmd());
    assert_eq!(carets(&s.editor), vec![(0, 3), (0, 11)]);

    type_text(&mut s.editor, "owl");
    assert_eq!(s.editor.text(), "owl dog owl");
}

#[test]
fn test_line_shortcuts() {
    let mut s = Session::new("int a;\nint b;");
    s.editor.set_language(LanguageId::Cpp);

    s.press_char('/', cmd());
    assert_eq!(s.editor.text(), "// int a;\nint b;");

    s.press(KeyCode::Down, cmd() | Modifiers::SHIFT);
    assert_eq!(s.editor.text(), "int b;\n// int a;");

    s.press_char(']', cmd());
    assert_eq!(s.editor.text(), "int b;\n\t// int a;");

    s.press_char('k', cmd() | Modifiers::SHIFT);
    assert_eq!(s.editor.text(), "int b;");
}

#[test]
fn test_tab_and_backtab_over_selection() {
    let mut s = Session::new("a\nb");
    s.press(KeyCode::End, cmd() | Modifiers::SHIFT);
    s.press(KeyCode::Tab, Modifiers::NONE);
    assert_eq!(s.editor.text(), "\ta\n\tb");

    s.press(KeyCode::Tab, Modifiers::SHIFT);
    assert_eq!(s.editor.text(), "a\nb");
}

#[test]
fn test_read_only_editor_ignores_edit_keys() {
    let mut s = Session::new("fixed");
    s.editor.set_read_only(true);

    s.press(KeyCode::Delete, Modifiers::NONE);
    s.press(KeyCode::Enter, Modifiers::NONE);
    type_text(&mut s.editor, "x");
    assert_eq!(s.editor.text(), "fixed");

    s.press(KeyCode::End, Modifiers::SHIFT);
    s.press_char('c', cmd());
    assert_eq!(s.clipboard.contents(), Some("fixed"));
}

#[test]
fn test_every_command_is_safe_on_any_document() {
    for text in ["", "\n", "one\n\ttwo\n", "(x) [y] {z}"] {
        let mut editor = editor_with(text);
        let mut clipboard = MemoryClipboard::with_text("pasted");
        for &command in Command::ALL {
            update(&mut editor, &mut clipboard, command);
            assert!(editor.line_count() >= 1, "{command} emptied the buffer");
        }
    }
}

// ========================================================================
// User keymaps
// ========================================================================

#[test]
fn test_user_bindings_override_and_unbind() {
    let yaml = r#"
bindings:
  - key: "cmd+d"
    command: Unbound
  - key: "cmd+e"
    command: SelectNextOccurrence
  - key: "cmd+l"
    command: SelectLine
"#;
    let keymap = Keymap::with_bindings(merge_bindings(
        default_bindings(),
        parse_keymap_yaml(yaml).unwrap(),
    ));

    assert_eq!(keymap.lookup(&Keystroke::char_with_mods('d', cmd())), None);
    assert_eq!(
        keymap.lookup(&Keystroke::char_with_mods('e', cmd())),
        Some(Command::SelectNextOccurrence)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::char_with_mods('l', cmd())),
        Some(Command::SelectLine)
    );
    // untouched defaults remain
    assert_eq!(
        keymap.lookup(&Keystroke::char_with_mods('z', cmd())),
        Some(Command::Undo)
    );
}

#[test]
fn test_keymap_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: \"alt+up\"\n    command: MoveLinesUp\n    when: [single_cursor]\n",
    )
    .unwrap();

    let bindings = load_keymap_file(&path).unwrap();
    assert_eq!(bindings.len(), 1);
    assert!(bindings[0].is_conditional());

    std::fs::write(&path, "bindings:\n  - key: \"alt+up\"\n    command: Fly\n").unwrap();
    assert!(load_keymap_file(&path).is_err());
    assert!(load_keymap_file(&dir.path().join("missing.yaml")).is_err());
}
