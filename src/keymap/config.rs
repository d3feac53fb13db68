//! YAML keymap files
//!
//! ```yaml
//! bindings:
//!   - key: "ctrl+shift+d"
//!     command: SelectAllOccurrences
//!   - key: "escape"
//!     command: CollapseToSingleCursor
//!     when: [has_multiple_cursors]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    /// `macos`, `windows` or `linux`; other platforms skip the entry
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<Condition>>,
}

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("reading keymap: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing keymap: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path)?;
    parse_keymap_yaml(&content)
}

pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig = serde_yaml::from_str(yaml)?;
    let platform = current_platform();

    let mut bindings = Vec::with_capacity(config.bindings.len());
    for entry in config.bindings {
        if entry.platform.as_deref().is_some_and(|p| p != platform) {
            continue;
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command: Command = entry
            .command
            .parse()
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(conditions) = entry.when {
            binding = binding.when(conditions);
        }
        bindings.push(binding);
    }
    Ok(bindings)
}

/// Parse a key string like `ctrl+shift+k`
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key = None;

    // `ctrl++` binds the plus key
    let parts: Vec<&str> = match key_str.strip_suffix("++") {
        Some(rest) => rest.split('+').chain(std::iter::once("+")).collect(),
        None => key_str.split('+').collect(),
    };

    for part in parts.into_iter().map(str::trim) {
        if let Some(m) = Modifiers::from_name(part) {
            mods |= m;
            continue;
        }
        if key.is_some() {
            return Err(KeymapError::InvalidKey(format!(
                "multiple keys in binding: {}",
                key_str
            )));
        }
        key = Some(
            KeyCode::from_name(part)
                .ok_or_else(|| KeymapError::InvalidKey(format!("unknown key: {}", part)))?,
        );
    }

    let key = key.ok_or_else(|| KeymapError::InvalidKey(format!("no key in binding: {}", key_str)))?;
    Ok(Keystroke::new(key, mods))
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}
