//! Pointer and keyboard events delivered to the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, meta: false };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Move { position: Point },
    Up { position: Point },
}

/// Keys the editing tools react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Copy,
    Paste,
    Cut,
    Undo,
    Redo,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Char(char),
}

/// A key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Translate command shortcuts (`Ctrl+C`, `Ctrl+Z`, ...) into editing keys.
    pub fn normalized(self) -> Self {
        if !self.modifiers.command() {
            return self;
        }
        let key = match self.key {
            Key::Char('c' | 'C') => Key::Copy,
            Key::Char('x' | 'X') => Key::Cut,
            Key::Char('v' | 'V') => Key::Paste,
            Key::Char('z') if !self.modifiers.shift => Key::Undo,
            Key::Char('z' | 'Z') => Key::Redo,
            Key::Char('y' | 'Y') => Key::Redo,
            other => other,
        };
        Self { key, ..self }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers { ctrl: true, ..Modifiers::NONE }
    }

    #[test]
    fn test_command_shortcuts_normalize() {
        assert_eq!(KeyEvent::new(Key::Char('c'), ctrl()).normalized().key, Key::Copy);
        assert_eq!(KeyEvent::new(Key::Char('x'), ctrl()).normalized().key, Key::Cut);
        assert_eq!(KeyEvent::new(Key::Char('z'), ctrl()).normalized().key, Key::Undo);
        let ctrl_shift = Modifiers { shift: true, ..ctrl() };
        assert_eq!(KeyEvent::new(Key::Char('Z'), ctrl_shift).normalized().key, Key::Redo);
    }

    #[test]
    fn test_plain_chars_pass_through() {
        assert_eq!(KeyEvent::from(Key::Char('c')).normalized().key, Key::Char('c'));
        assert_eq!(KeyEvent::new(Key::Delete, ctrl()).normalized().key, Key::Delete);
    }
}
