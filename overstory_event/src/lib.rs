// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Event: normalized input descriptors and declarative binding tables.
//!
//! Interaction patterns should not parse raw platform events. Hosts translate
//! their native events into the small descriptors here — [`KeyboardInput`]
//! with a normalized [`Key`] and [`Modifiers`], [`PointerInput`] with a
//! pre-resolved target — and the pattern looks the descriptor up in a
//! declarative table ([`KeyBindings`] / [`PointerBindings`]) that maps it to
//! an action *value*. The pattern then interprets the action; the tables
//! themselves hold no behavior.
//!
//! Because a table is inert data (`Clone + PartialEq`, no closures), a
//! pattern can keep it inside a memoized cell and rebuild it only when the
//! configuration it was derived from (orientation, text direction) changes,
//! not once per event.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_event::{Key, KeyBindings, KeyboardInput, Modifiers};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Action {
//!     Next,
//!     SelectAll,
//! }
//!
//! let mut bindings = KeyBindings::new();
//! bindings.bind(Key::ArrowDown, Modifiers::empty(), Action::Next);
//! bindings.bind(Key::Character('a'), Modifiers::CONTROL, Action::SelectAll);
//!
//! let event = KeyboardInput::new(Key::ArrowDown, Modifiers::empty(), 0);
//! assert_eq!(bindings.resolve(&event), Some(Action::Next));
//!
//! // Unmatched input resolves to nothing; the caller leaves the event
//! // unconsumed so host defaults still apply.
//! let event = KeyboardInput::new(Key::ArrowDown, Modifiers::SHIFT, 0);
//! assert_eq!(bindings.resolve(&event), None);
//! ```
//!
//! Timestamps on [`KeyboardInput`] are host-supplied milliseconds; this crate
//! has no clock of its own.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// The Control key.
        const CONTROL = 1 << 0;
        /// The Shift key.
        const SHIFT = 1 << 1;
        /// The Alt (Option) key.
        const ALT = 1 << 2;
        /// The Meta (Command / Windows) key.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// True if Control or Meta is held.
    ///
    /// Toggle-style shortcuts conventionally accept either, so tables can
    /// bind both combinations and hosts need not distinguish platforms.
    pub const fn has_primary(self) -> bool {
        self.intersects(Self::CONTROL.union(Self::META))
    }
}

/// Normalized key identifier.
///
/// Hosts map their platform key events onto these values. Printable keys
/// arrive as [`Key::Character`] carrying the produced character (already
/// shifted, so `Shift+a` arrives as `'A'`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The up arrow key.
    ArrowUp,
    /// The down arrow key.
    ArrowDown,
    /// The left arrow key.
    ArrowLeft,
    /// The right arrow key.
    ArrowRight,
    /// The Home key.
    Home,
    /// The End key.
    End,
    /// The Enter key.
    Enter,
    /// The space bar.
    Space,
    /// The Escape key.
    Escape,
    /// A printable character key.
    Character(char),
}

impl Key {
    /// The printable character for this key, if any.
    ///
    /// [`Key::Space`] reports `' '`; other non-character keys report `None`.
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}

/// A keyboard event descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyboardInput {
    /// The normalized key.
    pub key: Key,
    /// Modifiers held when the key went down.
    pub modifiers: Modifiers,
    /// Host-supplied event time in milliseconds. Only deltas are meaningful.
    pub time_ms: u64,
}

impl KeyboardInput {
    /// Create a keyboard event descriptor.
    pub const fn new(key: Key, modifiers: Modifiers, time_ms: u64) -> Self {
        Self {
            key,
            modifiers,
            time_ms,
        }
    }
}

/// Mouse button identifier. `0` is the primary button.
pub type Button = u8;

/// A pointer event descriptor.
///
/// Hit testing happens upstream: the host resolves which item (if any) was
/// pressed and passes its key here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerInput<K> {
    /// The item under the pointer, if the press landed on one.
    pub target: Option<K>,
    /// The pressed button.
    pub button: Button,
    /// Modifiers held at press time.
    pub modifiers: Modifiers,
}

impl<K> PointerInput<K> {
    /// A primary-button press on `target` with the given modifiers.
    pub const fn press(target: K, modifiers: Modifiers) -> Self {
        Self {
            target: Some(target),
            button: 0,
            modifiers,
        }
    }
}

/// Declarative keyboard dispatch table.
///
/// Bindings are tried in insertion order and the first exact
/// `(key, modifiers)` match wins, so more specific bindings (for example a
/// literal `'*'`) should be registered before broad fallbacks are attempted
/// by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings<A> {
    entries: Vec<(Key, Modifiers, A)>,
}

impl<A: Clone> KeyBindings<A> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a binding.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: A) -> &mut Self {
        self.entries.push((key, modifiers, action));
        self
    }

    /// Look up the action for an event, or `None` if the event is unmatched.
    pub fn resolve(&self, event: &KeyboardInput) -> Option<A> {
        self.entries
            .iter()
            .find(|(key, modifiers, _)| *key == event.key && *modifiers == event.modifiers)
            .map(|(_, _, action)| action.clone())
    }

    /// Number of bindings in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Clone> Default for KeyBindings<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declarative pointer dispatch table keyed by button and modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerBindings<A> {
    entries: Vec<(Button, Modifiers, A)>,
}

impl<A: Clone> PointerBindings<A> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a binding.
    pub fn bind(&mut self, button: Button, modifiers: Modifiers, action: A) -> &mut Self {
        self.entries.push((button, modifiers, action));
        self
    }

    /// Look up the action for an event, or `None` if the event is unmatched.
    pub fn resolve<K>(&self, event: &PointerInput<K>) -> Option<A> {
        self.entries
            .iter()
            .find(|(button, modifiers, _)| {
                *button == event.button && *modifiers == event.modifiers
            })
            .map(|(_, _, action)| action.clone())
    }
}

impl<A: Clone> Default for PointerBindings<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Action {
        Prev,
        Next,
        Extend,
        SelectAll,
        Star,
    }

    #[test]
    fn first_exact_match_wins() {
        let mut bindings = KeyBindings::new();
        bindings
            .bind(Key::ArrowDown, Modifiers::empty(), Action::Next)
            .bind(Key::ArrowDown, Modifiers::SHIFT, Action::Extend)
            .bind(Key::ArrowDown, Modifiers::empty(), Action::Prev);

        let plain = KeyboardInput::new(Key::ArrowDown, Modifiers::empty(), 0);
        assert_eq!(bindings.resolve(&plain), Some(Action::Next));

        let shifted = KeyboardInput::new(Key::ArrowDown, Modifiers::SHIFT, 0);
        assert_eq!(bindings.resolve(&shifted), Some(Action::Extend));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let mut bindings = KeyBindings::new();
        bindings.bind(Key::Character('a'), Modifiers::CONTROL, Action::SelectAll);

        let ctrl_shift = KeyboardInput::new(
            Key::Character('a'),
            Modifiers::CONTROL | Modifiers::SHIFT,
            0,
        );
        assert_eq!(bindings.resolve(&ctrl_shift), None);

        let ctrl = KeyboardInput::new(Key::Character('a'), Modifiers::CONTROL, 0);
        assert_eq!(bindings.resolve(&ctrl), Some(Action::SelectAll));
    }

    #[test]
    fn unmatched_key_resolves_to_none() {
        let mut bindings = KeyBindings::new();
        bindings.bind(Key::ArrowLeft, Modifiers::empty(), Action::Prev);

        let up = KeyboardInput::new(Key::ArrowUp, Modifiers::empty(), 0);
        assert_eq!(bindings.resolve(&up), None);
        assert!(!bindings.is_empty());
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn character_bindings_beat_nothing_else() {
        let mut bindings = KeyBindings::new();
        bindings.bind(Key::Character('*'), Modifiers::empty(), Action::Star);

        let star = KeyboardInput::new(Key::Character('*'), Modifiers::empty(), 0);
        assert_eq!(bindings.resolve(&star), Some(Action::Star));

        // Other characters stay unmatched so a caller can treat them as
        // typeahead input instead.
        let plain = KeyboardInput::new(Key::Character('b'), Modifiers::empty(), 0);
        assert_eq!(bindings.resolve(&plain), None);
    }

    #[test]
    fn pointer_bindings_resolve_by_button_and_modifiers() {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        enum Click {
            Plain,
            Toggle,
        }

        let mut bindings = PointerBindings::new();
        bindings
            .bind(0, Modifiers::empty(), Click::Plain)
            .bind(0, Modifiers::CONTROL, Click::Toggle)
            .bind(0, Modifiers::META, Click::Toggle);

        let plain = PointerInput::press(7_u32, Modifiers::empty());
        assert_eq!(bindings.resolve(&plain), Some(Click::Plain));

        let meta = PointerInput::press(7_u32, Modifiers::META);
        assert_eq!(bindings.resolve(&meta), Some(Click::Toggle));

        let secondary = PointerInput {
            target: Some(7_u32),
            button: 2,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(bindings.resolve(&secondary), None);
    }

    #[test]
    fn space_reports_a_character() {
        assert_eq!(Key::Space.as_char(), Some(' '));
        assert_eq!(Key::Character('x').as_char(), Some('x'));
        assert_eq!(Key::Enter.as_char(), None);
    }

    #[test]
    fn primary_modifier_accepts_control_or_meta() {
        assert!(Modifiers::CONTROL.has_primary());
        assert!(Modifiers::META.has_primary());
        assert!(!(Modifiers::SHIFT | Modifiers::ALT).has_primary());
    }
}
