// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory List: flat list interaction behaviors.
//!
//! This crate provides the generic behaviors shared by list-shaped widgets
//! (listboxes, trees over their flattened visible sequence, menus):
//!
//! - [`ListNavigation`]: which item is *active*, honoring wrap-around and a
//!   skip-disabled policy.
//! - [`ListSelection`]: the set of selected item keys, with toggle /
//!   select-one / range / select-all operations and a range anchor.
//! - [`ListExpansion`]: the set of expanded item keys, idempotent open /
//!   close / toggle.
//! - [`Typeahead`]: resolving focus by matching recently typed characters
//!   against item labels, with a host-timestamped expiry window.
//! - [`List`]: the composition of the above that widget patterns consume,
//!   including the [`SelectOptions`]-driven `goto` used for pointer input.
//!
//! Every operation runs over an immutable snapshot `&[ListItem<K>]` describing
//! the sequence *as currently presented* (for a tree: the visible items in
//! document order). The state types are plain data (`Clone + PartialEq`), so a
//! reactive layer can hold them in cells and cheaply detect effective change.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_list::{List, ListConfig, ListItem, SelectOptions};
//!
//! let items = [
//!     ListItem::new(1_u32, "Apple"),
//!     ListItem::new(2, "Banana"),
//!     ListItem::new(3, "Cherry"),
//! ];
//!
//! let mut list: List<u32> = List::new(ListConfig {
//!     follow_focus: true,
//!     ..ListConfig::default()
//! });
//!
//! list.first(&items, false);
//! assert_eq!(list.navigation.active(), Some(1));
//! assert_eq!(list.selection.selected(), &[1]);
//!
//! // Typeahead: "ch" resolves to Cherry.
//! list.typeahead_char(&items, 'c', 0);
//! list.typeahead_char(&items, 'h', 50);
//! assert_eq!(list.navigation.active(), Some(3));
//! ```
//!
//! Disabled items are skipped by keyboard navigation and typeahead when the
//! skip-disabled policy is on, and are never selected, but a pointer `goto`
//! still moves the active item onto them (clicking focuses a disabled item
//! without changing its selection).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod expansion;
mod list;
mod navigation;
mod selection;
mod typeahead;

pub use expansion::ListExpansion;
pub use list::{List, ListConfig};
pub use navigation::ListNavigation;
pub use selection::{ListSelection, SelectOptions};
pub use typeahead::Typeahead;

use alloc::string::String;

/// Bounds every list item key must satisfy.
///
/// Callers use any small copyable handle (an integer id, a slotmap key, an
/// interned symbol). Blanket-implemented; never implement it by hand.
pub trait ItemKey: Copy + Eq + core::hash::Hash + core::fmt::Debug {}

impl<T: Copy + Eq + core::hash::Hash + core::fmt::Debug> ItemKey for T {}

/// One entry in a list snapshot.
///
/// Snapshots describe the sequence as currently presented, in presentation
/// order. The label is only consulted by typeahead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem<K> {
    /// Key identifying this item.
    pub id: K,
    /// Disabled items are skipped by navigation (under the skip-disabled
    /// policy) and never selected.
    pub disabled: bool,
    /// Label used for typeahead matching.
    pub label: String,
}

impl<K> ListItem<K> {
    /// An enabled item with the given label.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            disabled: false,
            label: label.into(),
        }
    }

    /// A disabled item with the given label.
    pub fn disabled(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            disabled: true,
            label: label.into(),
        }
    }
}
