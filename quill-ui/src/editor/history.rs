// Undo/redo control state and keyboard shortcuts for the editor.
// Shortcuts are a binding over the same commands the front end sends.

use egui::{Key, Modifiers};

use super::Command;

/// Whether the history buttons should be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryControls {
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub command: bool,
    pub shift: bool,
    pub key: Key,
    pub action: Command,
}

impl Binding {
    fn new(command: bool, shift: bool, key: Key, action: Command) -> Self {
        Self {
            command,
            shift,
            key,
            action,
        }
    }

    // Exact match on command and shift so Ctrl+Z never fires alongside Ctrl+Shift+Z.
    fn matches(&self, modifiers: Modifiers, key: Key) -> bool {
        self.key == key
            && modifiers.command == self.command
            && modifiers.shift == self.shift
            && !modifiers.alt
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shortcuts {
    bindings: Vec<Binding>,
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            bindings: vec![
                // Ctrl+Z undo
                Binding::new(true, false, Key::Z, Command::Undo),
                // Ctrl+Shift+Z or Ctrl+Y redo
                Binding::new(true, true, Key::Z, Command::Redo),
                Binding::new(true, false, Key::Y, Command::Redo),
                Binding::new(true, false, Key::B, Command::ToggleBold),
                Binding::new(true, false, Key::I, Command::ToggleItalic),
                Binding::new(true, false, Key::U, Command::ToggleUnderline),
            ],
        }
    }
}

impl Shortcuts {
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn command_for(&self, modifiers: Modifiers, key: Key) -> Option<Command> {
        self.bindings
            .iter()
            .find(|b| b.matches(modifiers, key))
            .map(|b| b.action.clone())
    }

    /// Commands for shortcuts pressed this frame.
    pub fn poll(&self, ctx: &egui::Context) -> Vec<Command> {
        // Don't handle shortcuts when a text field is focused
        if ctx.memory(|m| m.focused().is_some()) {
            return Vec::new();
        }

        ctx.input(|i| {
            self.bindings
                .iter()
                .filter(|b| i.key_pressed(b.key) && b.matches(i.modifiers, b.key))
                .map(|b| b.action.clone())
                .collect()
        })
    }
}
