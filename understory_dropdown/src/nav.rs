// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state machine vocabulary.
//!
//! The menu is either [`MenuState::Closed`] or [`MenuState::Open`]. The open
//! state owns the [`KeyListener`], so the listener exists exactly as long as
//! the menu is open; leaving the state hands the listener back to be
//! released on the host.

/// Keyboard listener registration held by an open menu.
///
/// Only the dropdown core can create one, and it does so on the
/// `Closed -> Open` transition.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyListener {
    _attached: (),
}

impl KeyListener {
    pub(crate) const fn attach() -> Self {
        Self { _attached: () }
    }
}

/// Expansion state of the menu.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    /// Collapsed; no keyboard listener.
    #[default]
    Closed,
    /// Expanded, holding the keyboard listener.
    Open(KeyListener),
}

impl MenuState {
    /// Returns `true` if the menu is expanded.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Leaves the current state, returning the listener if it was open.
    pub(crate) fn close(&mut self) -> Option<KeyListener> {
        match core::mem::take(self) {
            Self::Open(listener) => Some(listener),
            Self::Closed => None,
        }
    }
}

/// Keys the navigation layer distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the highlight down, wrapping to the top.
    ArrowDown,
    /// Move the highlight up, wrapping to the bottom.
    ArrowUp,
    /// Commit the highlighted candidate.
    Enter,
    /// Consumed so the menu does not toggle while typing.
    Space,
    /// Anything else; left to the text input.
    Other,
}

impl Key {
    /// Maps a DOM-style key code (`"ArrowDown"`, `"Enter"`, ...) to a [`Key`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "Enter" | "NumpadEnter" => Self::Enter,
            "Space" => Self::Space,
            _ => Self::Other,
        }
    }
}

/// Whether the navigation layer consumed a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// Consumed; hosts should suppress the key's default action.
    Handled,
    /// Not consumed; forward to the text input.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyListener, MenuState};

    #[test]
    fn closing_hands_back_the_listener_once() {
        let mut state = MenuState::Open(KeyListener::attach());
        assert!(state.is_open());
        assert_eq!(state.close(), Some(KeyListener::attach()));
        assert!(!state.is_open());
        assert_eq!(state.close(), None);
    }

    #[test]
    fn key_codes_map_to_navigation_keys() {
        assert_eq!(Key::from_code("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_code("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_code("NumpadEnter"), Key::Enter);
        assert_eq!(Key::from_code("Space"), Key::Space);
        assert_eq!(Key::from_code("KeyA"), Key::Other);
    }
}
