//! Keyboard shortcut handling

use serde::{Deserialize, Serialize};

use crate::state::ConfiguratorState;

/// Keys the configurator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Z,
    Y,
    D,
    Delete,
    Backspace,
    Escape,
    /// Any other key
    #[serde(other)]
    Other,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "z" => Key::Z,
            "y" => Key::Y,
            "d" => Key::D,
            "delete" | "del" => Key::Delete,
            "backspace" => Key::Backspace,
            "escape" | "esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// A key press with modifiers; `ctrl` also covers Cmd on macOS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
        }
    }
}

/// What a shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    Undo,
    Redo,
    Duplicate,
    DeleteSelected,
    Deselect,
}

/// Resolve a key press to a shortcut
pub fn resolve_shortcut(input: KeyInput) -> Option<ShortcutAction> {
    match (input.key, input.ctrl, input.shift) {
        // Ctrl+Z: undo, Ctrl+Shift+Z: redo
        (Key::Z, true, false) => Some(ShortcutAction::Undo),
        (Key::Z, true, true) => Some(ShortcutAction::Redo),
        (Key::Y, true, _) => Some(ShortcutAction::Redo),
        (Key::D, true, _) => Some(ShortcutAction::Duplicate),
        (Key::Delete | Key::Backspace, false, _) => Some(ShortcutAction::DeleteSelected),
        (Key::Escape, _, _) => Some(ShortcutAction::Deselect),
        _ => None,
    }
}

/// Handle a key press. Returns the action taken, if any.
pub fn handle_key(
    state: &mut ConfiguratorState,
    input: KeyInput,
    text_focused: bool,
) -> Option<ShortcutAction> {
    // Don't handle shortcuts when a text field is focused
    if text_focused {
        return None;
    }

    let action = resolve_shortcut(input)?;
    match action {
        ShortcutAction::Undo => {
            state.undo();
        }
        ShortcutAction::Redo => {
            state.redo();
        }
        ShortcutAction::Duplicate => {
            state.duplicate_selected();
        }
        ShortcutAction::DeleteSelected => {
            state.delete_selected();
        }
        ShortcutAction::Deselect => state.clear_selection(),
    }
    tracing::debug!(?action, "shortcut");
    Some(action)
}
