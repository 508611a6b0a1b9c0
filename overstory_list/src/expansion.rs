// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expanded-set tracking for disclosure widgets.

use hashbrown::HashSet;

use crate::ItemKey;

/// Maintains the set of expanded item keys.
///
/// All operations are idempotent and never fail: opening an already-open key
/// or closing an already-closed one is a no-op. Whether a key is *allowed*
/// to expand (leaf vs. parent) is a policy of the owning widget, enforced
/// there, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListExpansion<K: ItemKey> {
    /// Whether several keys may be open at once. Trees allow this;
    /// accordion-style widgets typically do not.
    pub multi_expandable: bool,
    expanded: HashSet<K>,
}

impl<K: ItemKey> ListExpansion<K> {
    /// Create an empty expansion set.
    pub fn new(multi_expandable: bool) -> Self {
        Self {
            multi_expandable,
            expanded: HashSet::new(),
        }
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: K) -> bool {
        self.expanded.contains(&id)
    }

    /// Open `id`. Returns whether the set changed.
    ///
    /// With `multi_expandable` off, any previously open key closes first.
    pub fn open(&mut self, id: K) -> bool {
        if self.expanded.contains(&id) {
            return false;
        }
        if !self.multi_expandable {
            self.expanded.clear();
        }
        self.expanded.insert(id);
        true
    }

    /// Close `id`. Returns whether the set changed.
    pub fn close(&mut self, id: K) -> bool {
        self.expanded.remove(&id)
    }

    /// Flip `id`'s expanded state.
    pub fn toggle(&mut self, id: K) {
        if !self.close(id) {
            self.open(id);
        }
    }

    /// Number of expanded keys.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// True if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Close everything.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Drop expansion state for keys not satisfying `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.expanded.retain(|&k| keep(k));
    }
}
