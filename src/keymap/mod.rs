//! Configurable keyboard mapping
//!
//! Maps keystrokes to editor [`Command`]s. Hosts translate their key events
//! into [`Keystroke`]s; users can override the defaults with a YAML file.
//!
//! ```text
//! host key event → Keystroke → Keymap::lookup_with_context() → Command → update()
//! ```
//!
//! ```ignore
//! let keymap = Keymap::with_bindings(default_bindings());
//! if let Some(command) = keymap.lookup(&Keystroke::char_with_mods('z', Modifiers::cmd())) {
//!     caret::update::update(&mut editor, &mut clipboard, command);
//! }
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{default_bindings, load_default_keymap, merge_bindings};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};
