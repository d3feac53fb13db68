//! Keystrokes: a key plus the modifiers held with it
//!
//! Key and modifier names are shared between keymap files and shortcut
//! labels, so a label printed for a [`Keystroke`] parses back to it.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    /// Cmd on macOS, the Windows/Super key elsewhere
    pub const META: Modifiers = Modifiers(1 << 3);

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The platform "command" modifier: Cmd on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }

    /// Look up a modifier by its keymap-file name, case-insensitively
    pub fn from_name(name: &str) -> Option<Modifiers> {
        let mods = match name.to_ascii_lowercase().as_str() {
            "cmd" => Modifiers::cmd(),
            "ctrl" | "control" => Modifiers::CTRL,
            "shift" => Modifiers::SHIFT,
            "alt" | "option" | "opt" => Modifiers::ALT,
            "meta" | "super" | "win" => Modifiers::META,
            _ => return None,
        };
        Some(mods)
    }

    fn labels(self) -> impl Iterator<Item = &'static str> {
        let meta = if cfg!(target_os = "macos") { "Cmd" } else { "Meta" };
        [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::META, meta),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function keys F1 to F24
    F(u8),
}

const NAMED_KEYS: [(KeyCode, &str); 15] = [
    (KeyCode::Enter, "Enter"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Space, "Space"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
];

const KEY_ALIASES: [(&str, KeyCode); 12] = [
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Escape),
    ("back", KeyCode::Backspace),
    ("del", KeyCode::Delete),
    ("ins", KeyCode::Insert),
    ("arrowup", KeyCode::Up),
    ("arrowdown", KeyCode::Down),
    ("arrowleft", KeyCode::Left),
    ("arrowright", KeyCode::Right),
    ("pgup", KeyCode::PageUp),
    ("pgdown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
];

impl KeyCode {
    /// Parse a key name: a single character, a named key, an alias or `f1`..`f24`
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(c.to_ascii_lowercase()));
        }

        let lower = name.to_ascii_lowercase();
        NAMED_KEYS
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(&lower))
            .map(|&(key, _)| key)
            .or_else(|| {
                KEY_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .map(|&(_, key)| key)
            })
            .or_else(|| {
                lower
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=24).contains(n))
                    .map(KeyCode::F)
            })
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            key => {
                let label = NAMED_KEYS
                    .iter()
                    .find(|(k, _)| k == key)
                    .map_or("?", |(_, label)| label);
                f.write_str(label)
            }
        }
    }
}

/// A key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::char_with_mods(c, Modifiers::NONE)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), mods)
    }
}

/// Shortcut label such as `Ctrl+Shift+Z`
impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in self.mods.labels() {
            write!(f, "{label}+")?;
        }
        write!(f, "{}", self.key)
    }
}
