//! Keyboard binding for the input field.
//!
//! Only one binding exists: Enter with no modifier submits and suppresses the
//! key's default action (inserting a line break). Everything else passes
//! through to the host untouched.

/// Key identity, reduced to what the binding needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Char(char),
}

/// Modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// A key press delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Key press with no modifier held.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// What the binding wants done with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the input and prevent the default action.
    Submit,
    /// Not handled; the host keeps its default behaviour.
    Ignore,
}

impl KeyAction {
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Submit)
    }
}

/// Map a key press to the binding's action.
#[must_use]
pub fn action_for(event: KeyEvent) -> KeyAction {
    if event.key == Key::Enter && event.modifiers.is_empty() {
        KeyAction::Submit
    } else {
        KeyAction::Ignore
    }
}
