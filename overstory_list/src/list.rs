// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of navigation, selection, and typeahead.

use crate::{ItemKey, ListItem, ListNavigation, ListSelection, SelectOptions, Typeahead};

/// Configuration for a [`List`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Whether relative navigation wraps past the ends of the sequence.
    pub wrap: bool,
    /// Whether navigation and typeahead skip disabled items.
    pub skip_disabled: bool,
    /// Whether more than one item may be selected.
    pub multi: bool,
    /// Whether selection mirrors navigation (select-follows-focus).
    pub follow_focus: bool,
    /// Typeahead inactivity window, in milliseconds.
    pub typeahead_delay_ms: u64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            wrap: false,
            skip_disabled: true,
            multi: false,
            follow_focus: false,
            typeahead_delay_ms: 500,
        }
    }
}

/// The generic behavior of flat list widgets: an active item, a selected
/// set, and typeahead, kept coherent across operations.
///
/// Widget patterns own a `List` and feed every operation the snapshot of
/// currently presented items. A tree feeds its flattened, visibility-filtered
/// sequence, which is all it takes to make flat-list semantics hierarchical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List<K: ItemKey> {
    /// Active-item state.
    pub navigation: ListNavigation<K>,
    /// Selected-set state.
    pub selection: ListSelection<K>,
    /// Typeahead buffer state.
    pub typeahead: Typeahead,
    /// Whether selection mirrors navigation.
    pub follow_focus: bool,
}

impl<K: ItemKey> List<K> {
    /// Create a list behavior from configuration.
    pub const fn new(config: ListConfig) -> Self {
        Self {
            navigation: ListNavigation::new(config.wrap, config.skip_disabled),
            selection: ListSelection::new(config.multi),
            typeahead: Typeahead::new(config.typeahead_delay_ms),
            follow_focus: config.follow_focus,
        }
    }

    /// Move focus to `target` and apply the selection intent.
    ///
    /// Focus moves even onto disabled items (pointer presses focus whatever
    /// they land on), but a disabled target never changes selection. Returns
    /// whether the target was found in the snapshot.
    pub fn goto(&mut self, items: &[ListItem<K>], target: K, opts: SelectOptions) -> bool {
        let Some(item) = items.iter().find(|it| it.id == target) else {
            return false;
        };
        self.navigation.goto(items, target);
        if item.disabled {
            return true;
        }
        if opts.toggle {
            self.selection.toggle(target);
        } else if opts.select_range {
            self.selection.select_range(items, target);
        } else if opts.select_one {
            self.selection.select_one(target);
        } else if self.follow_focus {
            self.selection.select_one(target);
        }
        if opts.set_anchor {
            self.selection.set_anchor(target);
        }
        true
    }

    /// Move to the next navigable item; `extend` grows a range selection.
    pub fn next(&mut self, items: &[ListItem<K>], extend: bool) -> bool {
        let moved = self.navigation.next(items);
        self.after_move(items, extend);
        moved
    }

    /// Move to the previous navigable item; `extend` grows a range selection.
    pub fn prev(&mut self, items: &[ListItem<K>], extend: bool) -> bool {
        let moved = self.navigation.prev(items);
        self.after_move(items, extend);
        moved
    }

    /// Move to the first navigable item.
    pub fn first(&mut self, items: &[ListItem<K>], extend: bool) -> bool {
        let moved = self.navigation.first(items);
        self.after_move(items, extend);
        moved
    }

    /// Move to the last navigable item.
    pub fn last(&mut self, items: &[ListItem<K>], extend: bool) -> bool {
        let moved = self.navigation.last(items);
        self.after_move(items, extend);
        moved
    }

    /// Feed a typed character; on a match, focus moves there and
    /// follow-focus selection applies. Returns whether anything matched.
    pub fn typeahead_char(&mut self, items: &[ListItem<K>], ch: char, now_ms: u64) -> bool {
        let found = self.typeahead.search(
            items,
            self.navigation.active(),
            self.navigation.skip_disabled,
            ch,
            now_ms,
        );
        let Some(target) = found else {
            return false;
        };
        self.navigation.set_active(Some(target));
        self.after_move(items, false);
        true
    }

    /// Select every enabled item in the snapshot (multi mode only).
    pub fn select_all(&mut self, items: &[ListItem<K>]) {
        self.selection.select_all(items);
    }

    /// Apply post-navigation selection policy to the new active item.
    fn after_move(&mut self, items: &[ListItem<K>], extend: bool) {
        let Some(active) = self.navigation.active() else {
            return;
        };
        let enabled = items.iter().any(|it| it.id == active && !it.disabled);
        if !enabled {
            return;
        }
        if extend {
            if self.selection.multi {
                self.selection.select_range(items, active);
            }
        } else if self.follow_focus {
            self.selection.select_one(active);
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

    fn multi_list() -> List<u32> {
        List::new(ListConfig {
            multi: true,
            ..ListConfig::default()
        })
    }

    #[test]
    fn follow_focus_mirrors_navigation() {
        let items = items(&[1, 2, 3]);
        let mut list: List<u32> = List::new(ListConfig {
            follow_focus: true,
            ..ListConfig::default()
        });

        list.first(&items, false);
        assert_eq!(list.selection.selected(), &[1]);
        list.next(&items, false);
        assert_eq!(list.navigation.active(), Some(2));
        assert_eq!(list.selection.selected(), &[2]);
    }

    #[test]
    fn without_follow_focus_navigation_leaves_selection_alone() {
        let items = items(&[1, 2]);
        let mut list: List<u32> = List::new(ListConfig::default());
        list.first(&items, false);
        list.next(&items, false);
        assert!(list.selection.selected().is_empty());
    }

    #[test]
    fn extend_grows_a_range_while_moving() {
        let items = items(&[1, 2, 3, 4]);
        let mut list = multi_list();
        list.goto(&items, 2, SelectOptions::ONE);

        list.next(&items, true);
        list.next(&items, true);
        assert_eq!(list.navigation.active(), Some(4));
        assert_eq!(list.selection.selected(), &[2, 3, 4]);

        // Shrinking back keeps the anchor.
        list.prev(&items, true);
        assert_eq!(list.selection.selected(), &[2, 3]);
    }

    #[test]
    fn extend_in_single_mode_moves_without_selecting() {
        let items = items(&[1, 2]);
        let mut list: List<u32> = List::new(ListConfig::default());
        list.first(&items, false);
        list.next(&items, true);
        assert_eq!(list.navigation.active(), Some(2));
        assert!(list.selection.selected().is_empty());
    }

    #[test]
    fn goto_with_toggle_flips_membership() {
        let items = items(&[1, 2]);
        let mut list = multi_list();
        list.goto(&items, 1, SelectOptions::TOGGLE);
        list.goto(&items, 2, SelectOptions::TOGGLE);
        assert_eq!(list.selection.selected(), &[1, 2]);
        list.goto(&items, 1, SelectOptions::TOGGLE);
        assert_eq!(list.selection.selected(), &[2]);
    }

    #[test]
    fn goto_range_selects_between_anchor_and_target() {
        let items = items(&[1, 2, 3, 4]);
        let mut list = multi_list();
        list.goto(&items, 2, SelectOptions::ONE);
        list.goto(&items, 4, SelectOptions::RANGE);
        assert_eq!(list.selection.selected(), &[2, 3, 4]);
        assert_eq!(list.navigation.active(), Some(4));
    }

    #[test]
    fn goto_on_disabled_item_moves_focus_but_not_selection() {
        let items = [ListItem::new(1_u32, "a"), ListItem::disabled(2, "b")];
        let mut list = multi_list();
        list.goto(&items, 1, SelectOptions::ONE);
        assert!(list.goto(&items, 2, SelectOptions::ONE));
        assert_eq!(list.navigation.active(), Some(2));
        assert_eq!(list.selection.selected(), &[1]);
    }

    #[test]
    fn goto_unknown_target_is_rejected() {
        let items = items(&[1]);
        let mut list = multi_list();
        assert!(!list.goto(&items, 9, SelectOptions::ONE));
        assert_eq!(list.navigation.active(), None);
    }

    #[test]
    fn typeahead_moves_focus_and_follows() {
        let items = [
            ListItem::new(1_u32, "Oak"),
            ListItem::new(2, "Pine"),
            ListItem::new(3, "Willow"),
        ];
        let mut list: List<u32> = List::new(ListConfig {
            follow_focus: true,
            ..ListConfig::default()
        });
        assert!(list.typeahead_char(&items, 'w', 0));
        assert_eq!(list.navigation.active(), Some(3));
        assert_eq!(list.selection.selected(), &[3]);
        assert!(!list.typeahead_char(&items, 'z', 50));
    }
}
