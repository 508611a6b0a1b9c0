// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-item tracking over a list snapshot.

use crate::{ItemKey, ListItem};

/// Which way a relative move steps.
#[derive(Copy, Clone, Debug)]
enum Step {
    Forward,
    Backward,
}

/// Tracks which item is *active* among a sequence of navigable items.
///
/// Relative moves ([`next`](Self::next) / [`prev`](Self::prev)) honor the
/// wrap and skip-disabled policies. Hitting a boundary without wrap leaves
/// the active item in place; callers still treat the triggering event as
/// handled so host defaults (page scrolling) stay suppressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListNavigation<K> {
    /// Whether relative moves wrap past the ends of the sequence.
    pub wrap: bool,
    /// Whether relative moves skip disabled items.
    pub skip_disabled: bool,
    active: Option<K>,
}

impl<K: ItemKey> ListNavigation<K> {
    /// Create a navigation state with no active item.
    pub const fn new(wrap: bool, skip_disabled: bool) -> Self {
        Self {
            wrap,
            skip_disabled,
            active: None,
        }
    }

    /// The currently active item, if any.
    pub const fn active(&self) -> Option<K> {
        self.active
    }

    /// Set the active item without consulting the snapshot.
    ///
    /// Intended for restoring state; interactive moves should go through the
    /// snapshot-checked operations.
    pub const fn set_active(&mut self, active: Option<K>) {
        self.active = active;
    }

    /// Move to the next navigable item. Returns whether the active item moved.
    pub fn next(&mut self, items: &[ListItem<K>]) -> bool {
        self.step(items, Step::Forward)
    }

    /// Move to the previous navigable item. Returns whether the active item
    /// moved.
    pub fn prev(&mut self, items: &[ListItem<K>]) -> bool {
        self.step(items, Step::Backward)
    }

    /// Move to the first navigable item.
    pub fn first(&mut self, items: &[ListItem<K>]) -> bool {
        let target = items.iter().find(|it| self.can_target(it)).map(|it| it.id);
        self.move_to(target)
    }

    /// Move to the last navigable item.
    pub fn last(&mut self, items: &[ListItem<K>]) -> bool {
        let target = items
            .iter()
            .rev()
            .find(|it| self.can_target(it))
            .map(|it| it.id);
        self.move_to(target)
    }

    /// Move directly to `target`, disabled or not, as long as it is in the
    /// snapshot. Used by pointer input, which may focus disabled items.
    pub fn goto(&mut self, items: &[ListItem<K>], target: K) -> bool {
        if items.iter().any(|it| it.id == target) {
            self.move_to(Some(target))
        } else {
            false
        }
    }

    fn can_target(&self, item: &ListItem<K>) -> bool {
        !(self.skip_disabled && item.disabled)
    }

    fn move_to(&mut self, target: Option<K>) -> bool {
        match target {
            Some(id) if self.active != Some(id) => {
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, items: &[ListItem<K>], step: Step) -> bool {
        let navigable: alloc::vec::Vec<usize> = items
            .iter()
            .enumerate()
            .filter_map(|(i, it)| self.can_target(it).then_some(i))
            .collect();
        if navigable.is_empty() {
            return false;
        }

        // Scan from the active item's raw position: the active item itself
        // may not be navigable (pointer input focuses disabled items), and a
        // step from it still goes to its nearest navigable neighbor.
        let raw = self
            .active
            .and_then(|a| items.iter().position(|it| it.id == a));

        let target = match (step, raw) {
            (Step::Forward, None) => navigable[0],
            (Step::Backward, None) => navigable[navigable.len() - 1],
            (Step::Forward, Some(r)) => match navigable.iter().copied().find(|&i| i > r) {
                Some(i) => i,
                None if self.wrap => navigable[0],
                None => return false,
            },
            (Step::Backward, Some(r)) => match navigable.iter().rev().copied().find(|&i| i < r) {
                Some(i) => i,
                None if self.wrap => navigable[navigable.len() - 1],
                None => return false,
            },
        };
        self.move_to(Some(items[target].id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn items(spec: &[(u32, bool)]) -> Vec<ListItem<u32>> {
        spec.iter()
            .map(|&(id, disabled)| {
                if disabled {
                    ListItem::disabled(id, "item")
                } else {
                    ListItem::new(id, "item")
                }
            })
            .collect()
    }

    #[test]
    fn next_visits_in_order_then_stops_without_wrap() {
        let items = items(&[(1, false), (2, false), (3, false)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);

        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(1));
        assert!(nav.next(&items));
        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(3));

        // Boundary: no wrap, no move.
        assert!(!nav.next(&items));
        assert_eq!(nav.active(), Some(3));
    }

    #[test]
    fn next_wraps_when_enabled() {
        let items = items(&[(1, false), (2, false)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(true, true);
        nav.set_active(Some(2));

        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(1));
        assert!(nav.prev(&items));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn disabled_items_are_skipped() {
        let items = items(&[(1, false), (2, true), (3, false)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);
        nav.set_active(Some(1));

        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(3));
        assert!(nav.prev(&items));
        assert_eq!(nav.active(), Some(1));
    }

    #[test]
    fn disabled_items_are_navigable_when_policy_is_off() {
        let items = items(&[(1, false), (2, true)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, false);
        nav.set_active(Some(1));

        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn first_and_last_respect_skip_policy() {
        let items = items(&[(1, true), (2, false), (3, true)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);

        assert!(nav.first(&items));
        assert_eq!(nav.active(), Some(2));
        assert!(!nav.last(&items));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn step_from_a_disabled_active_item_reaches_its_neighbors() {
        let items = items(&[(1, false), (2, false), (3, true), (4, false)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);

        nav.goto(&items, 3);
        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(4));

        nav.goto(&items, 3);
        assert!(nav.prev(&items));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn step_from_a_disabled_trailing_item_honors_the_wrap_policy() {
        let items = items(&[(1, false), (2, false), (3, true)]);

        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);
        nav.goto(&items, 3);
        assert!(!nav.next(&items));
        assert_eq!(nav.active(), Some(3));

        let mut nav: ListNavigation<u32> = ListNavigation::new(true, true);
        nav.goto(&items, 3);
        assert!(nav.next(&items));
        assert_eq!(nav.active(), Some(1));
    }

    #[test]
    fn goto_targets_disabled_items() {
        let items = items(&[(1, false), (2, true)]);
        let mut nav: ListNavigation<u32> = ListNavigation::new(false, true);

        assert!(nav.goto(&items, 2));
        assert_eq!(nav.active(), Some(2));
        // Not in the snapshot: rejected.
        assert!(!nav.goto(&items, 9));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn empty_snapshot_is_inert() {
        let items: Vec<ListItem<u32>> = Vec::new();
        let mut nav: ListNavigation<u32> = ListNavigation::new(true, true);
        assert!(!nav.next(&items));
        assert!(!nav.first(&items));
        assert_eq!(nav.active(), None);
    }
}
