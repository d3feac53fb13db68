//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::KeyContext;
use super::types::Keystroke;

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Indices into `bindings`; one keystroke may carry several bindings
    /// with different conditions
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// Unconditional binding for a keystroke
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.lookup_with_context(keystroke, None)
    }

    /// Conditional bindings whose conditions hold win over unconditional
    /// ones. Without a context conditional bindings are skipped.
    pub fn lookup_with_context(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let indices = self.lookup.get(keystroke)?;

        if let Some(ctx) = context {
            let conditional = indices
                .iter()
                .map(|&i| &self.bindings[i])
                .find(|b| b.matches_context(ctx));
            if let Some(binding) = conditional {
                return Some(binding.command);
            }
        }

        indices
            .iter()
            .map(|&i| &self.bindings[i])
            .find(|b| b.when.is_none())
            .map(|b| b.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// First binding for a command
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.keystroke.to_string())
    }
}
