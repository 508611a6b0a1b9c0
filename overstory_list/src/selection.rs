// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selected-set tracking with toggle, select-one, range, and select-all.

use alloc::vec::Vec;

use crate::{ItemKey, ListItem};

/// One selection intent, disambiguating click/keyboard semantics.
///
/// A plain click is select-one, a Control/Meta click toggles membership, and
/// a Shift click selects the range between the anchor and the target. The
/// all-false default defers to the owning list's follow-focus policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Flip the target's membership in the selected set.
    pub toggle: bool,
    /// Clear other selections and select only the target.
    pub select_one: bool,
    /// Select the contiguous presented range between the anchor and the
    /// target.
    pub select_range: bool,
    /// Re-anchor subsequent range selections at the target.
    pub set_anchor: bool,
}

impl SelectOptions {
    /// No explicit intent; selection follows the list's follow-focus policy.
    pub const NONE: Self = Self {
        toggle: false,
        select_one: false,
        select_range: false,
        set_anchor: false,
    };

    /// Toggle the target and re-anchor there (Control/Meta click).
    pub const TOGGLE: Self = Self {
        toggle: true,
        select_one: false,
        select_range: false,
        set_anchor: true,
    };

    /// Select only the target (plain click).
    pub const ONE: Self = Self {
        toggle: false,
        select_one: true,
        select_range: false,
        set_anchor: true,
    };

    /// Select the anchor-to-target range, keeping the anchor (Shift click).
    pub const RANGE: Self = Self {
        toggle: false,
        select_one: false,
        select_range: true,
        set_anchor: false,
    };
}

/// Maintains the set of selected item keys.
///
/// Keys are kept in selection order (most recent last). Disabled items are
/// never added by the snapshot-aware operations ([`select_range`]
/// [`ListSelection::select_range`], [`select_all`]
/// [`ListSelection::select_all`]); key-only operations trust the caller to
/// have filtered disabled targets already.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSelection<K> {
    /// Whether more than one item may be selected at a time.
    pub multi: bool,
    selected: Vec<K>,
    anchor: Option<K>,
}

impl<K: ItemKey> ListSelection<K> {
    /// Create an empty selection.
    pub const fn new(multi: bool) -> Self {
        Self {
            multi,
            selected: Vec::new(),
            anchor: None,
        }
    }

    /// Selected keys in selection order, most recent last.
    pub fn selected(&self) -> &[K] {
        &self.selected
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: K) -> bool {
        self.selected.contains(&id)
    }

    /// The range anchor, if one has been established.
    pub const fn anchor(&self) -> Option<K> {
        self.anchor
    }

    /// Re-anchor subsequent range selections at `id`.
    pub const fn set_anchor(&mut self, id: K) {
        self.anchor = Some(id);
    }

    /// Select `id`. In single mode this replaces the selection.
    pub fn select(&mut self, id: K) {
        if !self.multi {
            self.select_one(id);
            return;
        }
        if !self.is_selected(id) {
            self.selected.push(id);
        }
        self.anchor = Some(id);
    }

    /// Remove `id` from the selection if present.
    pub fn deselect(&mut self, id: K) {
        self.selected.retain(|&k| k != id);
    }

    /// Flip `id`'s membership. In single mode, toggling a selected item
    /// clears the selection.
    pub fn toggle(&mut self, id: K) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
        self.anchor = Some(id);
    }

    /// Clear other selections and select only `id`.
    pub fn select_one(&mut self, id: K) {
        self.selected.clear();
        self.selected.push(id);
        self.anchor = Some(id);
    }

    /// Replace the selection with the contiguous presented range between the
    /// anchor and `target`, inclusive, excluding disabled items.
    ///
    /// Without an established anchor the target anchors itself, degrading to
    /// select-one. In single mode this is always select-one on the target.
    pub fn select_range(&mut self, items: &[ListItem<K>], target: K) {
        if !self.multi {
            self.select_one(target);
            return;
        }
        let anchor = self.anchor.unwrap_or(target);
        let anchor_pos = items.iter().position(|it| it.id == anchor);
        let target_pos = items.iter().position(|it| it.id == target);
        let (Some(a), Some(t)) = (anchor_pos, target_pos) else {
            // Anchor fell out of the presented sequence (collapsed away):
            // re-anchor at the target.
            self.select_one(target);
            return;
        };
        let (lo, hi) = if a <= t { (a, t) } else { (t, a) };
        self.selected.clear();
        self.selected.extend(
            items[lo..=hi]
                .iter()
                .filter(|it| !it.disabled)
                .map(|it| it.id),
        );
        self.anchor = Some(anchor);
    }

    /// Select every enabled item in the snapshot. Multi mode only; a no-op
    /// otherwise.
    pub fn select_all(&mut self, items: &[ListItem<K>]) {
        if !self.multi {
            return;
        }
        self.selected.clear();
        self.selected
            .extend(items.iter().filter(|it| !it.disabled).map(|it| it.id));
    }

    /// Clear the selection, keeping the anchor.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop state referring to keys not satisfying `keep`.
    ///
    /// Used when items are unregistered from the owning widget.
    pub fn retain(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.selected.retain(|&k| keep(k));
        if let Some(a) = self.anchor
            && !keep(a)
        {
            self.anchor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn items(ids: &[u32]) -> Vec<ListItem<u32>> {
        ids.iter().map(|&id| ListItem::new(id, "item")).collect()
    }

    #[test]
    fn single_mode_always_has_at_most_one_selected() {
        let mut sel: ListSelection<u32> = ListSelection::new(false);
        sel.select(1);
        sel.select(2);
        assert_eq!(sel.selected(), &[2]);

        sel.select_range(&items(&[1, 2, 3]), 3);
        assert_eq!(sel.selected(), &[3]);

        sel.toggle(3);
        assert!(sel.selected().is_empty());
    }

    #[test]
    fn multi_mode_accumulates_in_selection_order() {
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.select(3);
        sel.select(1);
        sel.select(1);
        assert_eq!(sel.selected(), &[3, 1]);

        sel.toggle(3);
        assert_eq!(sel.selected(), &[1]);
    }

    #[test]
    fn select_one_clears_others() {
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.select(1);
        sel.select(2);
        sel.select_one(3);
        assert_eq!(sel.selected(), &[3]);
        assert_eq!(sel.anchor(), Some(3));
    }

    #[test]
    fn range_equals_anchor_to_target_inclusive() {
        let items = items(&[1, 2, 3, 4, 5]);
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.select_one(2);
        sel.select_range(&items, 4);
        assert_eq!(sel.selected(), &[2, 3, 4]);

        // Backwards range, same anchor.
        sel.select_range(&items, 1);
        assert_eq!(sel.selected(), &[1, 2]);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn range_replaces_prior_toggles() {
        let items = items(&[1, 2, 3, 4]);
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.select(4);
        sel.set_anchor(1);
        sel.select_range(&items, 2);
        // The selected set equals exactly the range.
        assert_eq!(sel.selected(), &[1, 2]);
    }

    #[test]
    fn range_skips_disabled_items() {
        let items = [
            ListItem::new(1_u32, "a"),
            ListItem::disabled(2, "b"),
            ListItem::new(3, "c"),
        ];
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.set_anchor(1);
        sel.select_range(&items, 3);
        assert_eq!(sel.selected(), &[1, 3]);
    }

    #[test]
    fn range_with_vanished_anchor_reanchors_at_target() {
        let items = items(&[1, 2, 3]);
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.set_anchor(9);
        sel.select_range(&items, 2);
        assert_eq!(sel.selected(), &[2]);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn select_all_is_multi_only_and_skips_disabled() {
        let items = [
            ListItem::new(1_u32, "a"),
            ListItem::disabled(2, "b"),
            ListItem::new(3, "c"),
        ];

        let mut single: ListSelection<u32> = ListSelection::new(false);
        single.select_all(&items);
        assert!(single.selected().is_empty());

        let mut multi: ListSelection<u32> = ListSelection::new(true);
        multi.select_all(&items);
        assert_eq!(multi.selected(), &[1, 3]);
    }

    #[test]
    fn retain_scrubs_selection_and_anchor() {
        let mut sel: ListSelection<u32> = ListSelection::new(true);
        sel.select(1);
        sel.select(2);
        sel.set_anchor(2);
        sel.retain(|k| k != 2);
        assert_eq!(sel.selected(), &[1]);
        assert_eq!(sel.anchor(), None);
    }
}
