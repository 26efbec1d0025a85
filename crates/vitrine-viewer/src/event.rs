#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The viewer reacts to a handful of keys — Escape to close, arrows to
//! move the selection. Hosts translate whatever their input layer produces
//! into [`KeyEvent`]s; the controller never talks to a device directly.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Key codes the viewer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is the given key with no modifiers held.
    #[must_use]
    pub fn is_plain(&self, code: KeyCode) -> bool {
        self.code == code && self.modifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_checks_both_code_and_modifiers() {
        assert!(KeyEvent::new(KeyCode::Escape).is_plain(KeyCode::Escape));
        assert!(!KeyEvent::new(KeyCode::Escape).is_plain(KeyCode::Left));
        let shifted = KeyEvent::new(KeyCode::Escape).with_modifiers(Modifiers::SHIFT);
        assert!(!shifted.is_plain(KeyCode::Escape));
    }

    #[test]
    fn none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
