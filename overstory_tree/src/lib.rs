// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Tree: a headless interaction pattern for ARIA tree widgets.
//!
//! A tree widget is a hierarchical list where items expand and collapse.
//! This crate computes, from a registered item hierarchy and a stream of
//! normalized input events, everything a host needs to render an accessible
//! tree: which items are visible, which is active, which are selected or
//! expanded, each item's `aria-level` / `aria-posinset` / `aria-setsize`,
//! and the roving or activedescendant tab indices.
//!
//! The pattern is built from the other Overstory crates:
//!
//! - [`overstory_list`] supplies the flat-list behaviors (navigation,
//!   selection, expansion, typeahead), fed with the tree's *flattened,
//!   visibility-filtered* item sequence. That one indirection is what makes
//!   flat-list semantics hierarchical.
//! - [`overstory_event`] supplies the input descriptors and the declarative
//!   binding tables the keyboard and pointer handlers dispatch through.
//! - [`overstory_reactive`] supplies the memoized cells all derived state
//!   hangs on, so hosts can read attributes repeatedly without recomputation
//!   and writes only invalidate what actually depends on them.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_event::{Key, KeyboardInput, Modifiers};
//! use overstory_tree::{TreeConfig, TreeItemInputs, TreePattern};
//!
//! let mut tree: TreePattern<u32> = TreePattern::new(TreeConfig::default());
//! tree.register(TreeItemInputs::root(1, "Fruit")).unwrap();
//! tree.register(TreeItemInputs::child_of(1, 2, "Apple")).unwrap();
//! tree.register(TreeItemInputs::child_of(1, 3, "Banana")).unwrap();
//!
//! // Children are hidden until their parent expands.
//! assert_eq!(tree.visible_values(), [1]);
//!
//! tree.set_default_state();
//! let expand = KeyboardInput::new(Key::ArrowRight, Modifiers::empty(), 0);
//! assert!(tree.on_keydown(&expand));
//! assert_eq!(tree.visible_values(), [1, 2, 3]);
//! ```
//!
//! Hosts own the DOM (or equivalent): they register one item per rendered
//! node in document order, translate native events into
//! [`KeyboardInput`][overstory_event::KeyboardInput] /
//! [`PointerInput`][overstory_event::PointerInput], and read the derived
//! attributes back off the pattern after each event.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod item;
mod tree;

pub use item::{ExpansionControl, ParentLink, TreeItemInputs, TreeItemPattern};
pub use tree::{TreeAction, TreePattern};

/// Layout axis the tree's items flow along.
///
/// Orientation decides which arrow keys navigate and which expand and
/// collapse; see [`TreePattern::on_keydown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Items flow top to bottom.
    #[default]
    Vertical,
    /// Items flow along the reading direction.
    Horizontal,
}

/// Reading direction of the host document.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// How the host moves keyboard focus between items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusMode {
    /// Exactly one item carries `tabindex="0"` (the active one); the rest
    /// carry `-1`.
    #[default]
    Roving,
    /// The container keeps focus and announces the active item through
    /// `aria-activedescendant`.
    ActiveDescendant,
}

/// Construction-time configuration for a [`TreePattern`].
///
/// Orientation, direction, navigation mode, and focus mode stay adjustable
/// afterwards through the pattern's input cells; the rest is fixed for the
/// pattern's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Layout axis; decides the arrow-key mapping.
    pub orientation: Orientation,
    /// Reading direction; mirrors the arrow-key mapping when right-to-left.
    pub direction: TextDirection,
    /// Whether relative navigation wraps past the ends of the visible
    /// sequence.
    pub wrap: bool,
    /// Whether keyboard navigation and typeahead skip disabled items.
    pub skip_disabled: bool,
    /// Whether more than one item may be selected.
    pub multi: bool,
    /// Whether selection mirrors navigation (select-follows-focus).
    pub follow_focus: bool,
    /// Focus strategy the host renders with.
    pub focus_mode: FocusMode,
    /// Navigation mode: the selected item represents the current location
    /// (`aria-current`) rather than a selection.
    pub nav_mode: bool,
    /// Typeahead inactivity window, in milliseconds.
    pub typeahead_delay_ms: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            direction: TextDirection::Ltr,
            wrap: false,
            skip_disabled: true,
            multi: false,
            follow_focus: false,
            focus_mode: FocusMode::Roving,
            nav_mode: false,
            typeahead_delay_ms: 500,
        }
    }
}

/// Registration failure.
///
/// Both variants are adapter programming errors and are reported before any
/// state changes; a failed registration leaves the tree untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// An item with this value is already registered.
    DuplicateItem,
    /// The named parent has not been registered (parents must be registered
    /// before their children).
    UnknownParent,
}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateItem => f.write_str("an item with this value is already registered"),
            Self::UnknownParent => f.write_str("the referenced parent item is not registered"),
        }
    }
}

impl core::error::Error for TreeError {}
