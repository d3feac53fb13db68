//! A keystroke bound to a command, optionally gated on editor state

use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Conditions that must all hold for this binding to apply
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    pub fn when_single(self, condition: Condition) -> Self {
        self.when(vec![condition])
    }

    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }

    /// Whether a conditional binding's conditions all hold; unconditional
    /// bindings never match here
    pub fn matches_context(&self, ctx: &KeyContext) -> bool {
        self.when
            .as_deref()
            .is_some_and(|conditions| Condition::evaluate_all(conditions, ctx))
    }
}
