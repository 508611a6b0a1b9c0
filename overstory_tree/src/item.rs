// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node state: identity, structure links, and derived attributes.

use alloc::string::String;
use alloc::vec::Vec;

use overstory_list::{ItemKey, List, ListExpansion};
use overstory_reactive::{Graph, Input, Memo};

use crate::FocusMode;

/// What an item hangs off: the tree root or another item.
///
/// The root behaves like a permanently expanded item at level 0, which is
/// why top-level items are always visible and sit at level 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParentLink<V> {
    /// Directly under the tree root.
    Root,
    /// Nested under the item with this value.
    Item(V),
}

/// One structure entry, in registration (document) order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeRecord<V> {
    pub(crate) value: V,
    pub(crate) parent: ParentLink<V>,
}

/// Description of one item at registration time.
///
/// `label`, `disabled`, and `has_children` seed input cells on the created
/// [`TreeItemPattern`] and stay writable afterwards; `value` and `parent`
/// are fixed for the item's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeItemInputs<V> {
    /// Host-chosen value identifying the item.
    pub value: V,
    /// Where the item sits in the hierarchy.
    pub parent: ParentLink<V>,
    /// Label used for typeahead matching.
    pub label: String,
    /// Disabled items are skipped by keyboard navigation (under the
    /// skip-disabled policy) and never selected or expanded.
    pub disabled: bool,
    /// Declares the item expandable before any child is registered, for
    /// lazily loaded subtrees.
    pub has_children: bool,
}

impl<V> TreeItemInputs<V> {
    /// An enabled top-level item.
    pub fn root(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            parent: ParentLink::Root,
            label: label.into(),
            disabled: false,
            has_children: false,
        }
    }

    /// An enabled item nested under `parent`.
    pub fn child_of(parent: V, value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            parent: ParentLink::Item(parent),
            label: label.into(),
            disabled: false,
            has_children: false,
        }
    }
}

/// Handle on one item's open/closed state within the tree's expansion set.
///
/// Operations are idempotent and never fail: opening an open item or closing
/// a closed one is a no-op. The control does not check expandability or the
/// disabled state; those policies live on [`TreePattern`](crate::TreePattern),
/// whose keyboard and imperative entry points enforce them. Hosts wiring a
/// disclosure affordance directly to this control bypass them knowingly.
#[derive(Clone, Debug)]
pub struct ExpansionControl<V: ItemKey> {
    id: V,
    expansion: Input<ListExpansion<V>>,
}

impl<V: ItemKey> ExpansionControl<V> {
    /// Whether the item is currently expanded.
    pub fn is_expanded(&self) -> bool {
        self.expansion.with(|e| e.is_expanded(self.id))
    }

    /// Expand the item.
    pub fn open(&self) {
        let id = self.id;
        self.expansion.update(|e| {
            e.open(id);
        });
    }

    /// Collapse the item.
    pub fn close(&self) {
        let id = self.id;
        self.expansion.update(|e| {
            e.close(id);
        });
    }

    /// Flip the item's expanded state.
    pub fn toggle(&self) {
        let id = self.id;
        self.expansion.update(|e| e.toggle(id));
    }
}

/// One tree node's behavior: identity, structure links, and every derived
/// attribute the host renders from.
///
/// Created by [`TreePattern::register`](crate::TreePattern::register), never
/// directly. All derived attributes are memoized cells over the owning
/// tree's state; reading them is cheap and always consistent with the last
/// completed operation on the tree.
#[derive(Debug)]
pub struct TreeItemPattern<V: ItemKey> {
    value: V,
    parent: ParentLink<V>,
    /// Label used for typeahead matching. Writable by the host.
    pub label: Input<String>,
    /// Whether the item is disabled. Writable by the host.
    pub disabled: Input<bool>,
    /// Declares the item expandable ahead of its children arriving (lazy
    /// loading). Writable by the host.
    pub has_children: Input<bool>,
    expansion: ExpansionControl<V>,
    level: Memo<usize>,
    expandable: Memo<bool>,
    expanded: Memo<bool>,
    visible: Memo<bool>,
    active: Memo<bool>,
    selected: Memo<Option<bool>>,
    current: Memo<bool>,
    tabindex: Memo<i32>,
    posinset: Memo<usize>,
    setsize: Memo<usize>,
}

impl<V: ItemKey + 'static> TreeItemPattern<V> {
    pub(crate) fn build(
        graph: &Graph,
        inputs: TreeItemInputs<V>,
        structure: &Input<Vec<NodeRecord<V>>>,
        expansion: &Input<ListExpansion<V>>,
        list: &Input<List<V>>,
        nav_mode: &Input<bool>,
        focus_mode: &Input<FocusMode>,
    ) -> Self {
        let value = inputs.value;
        let parent = inputs.parent;
        let label = Input::new(graph, inputs.label);
        let disabled = Input::new(graph, inputs.disabled);
        let has_children = Input::new(graph, inputs.has_children);

        let st = structure.clone();
        let level = Memo::new(graph, move || st.with(|nodes| level_of(nodes, value)));

        let (hc, st) = (has_children.clone(), structure.clone());
        let expandable = Memo::new(graph, move || {
            hc.get() || st.with(|nodes| nodes.iter().any(|n| n.parent == ParentLink::Item(value)))
        });

        let ex = expansion.clone();
        let expanded = Memo::new(graph, move || ex.with(|e| e.is_expanded(value)));

        let (st, ex) = (structure.clone(), expansion.clone());
        let visible = Memo::new(graph, move || {
            st.with(|nodes| {
                ex.with(|e| ancestors_expanded(nodes, record_of(nodes, value).parent, e))
            })
        });

        let li = list.clone();
        let active = Memo::new(graph, move || {
            li.with(|l| l.navigation.active() == Some(value))
        });

        let (nm, li) = (nav_mode.clone(), list.clone());
        let selected = Memo::new(graph, move || {
            if nm.get() {
                None
            } else {
                Some(li.with(|l| l.selection.is_selected(value)))
            }
        });

        let (nm, li) = (nav_mode.clone(), list.clone());
        let current = Memo::new(graph, move || {
            nm.get() && li.with(|l| l.selection.is_selected(value))
        });

        let (fm, act) = (focus_mode.clone(), active.clone());
        let tabindex = Memo::new(graph, move || {
            if fm.get() == FocusMode::Roving && act.get() {
                0
            } else {
                -1
            }
        });

        let st = structure.clone();
        let posinset = Memo::new(graph, move || st.with(|nodes| among_siblings(nodes, value).0));
        let st = structure.clone();
        let setsize = Memo::new(graph, move || st.with(|nodes| among_siblings(nodes, value).1));

        Self {
            value,
            parent,
            label,
            disabled,
            has_children,
            expansion: ExpansionControl {
                id: value,
                expansion: expansion.clone(),
            },
            level,
            expandable,
            expanded,
            visible,
            active,
            selected,
            current,
            tabindex,
            posinset,
            setsize,
        }
    }
}

impl<V: ItemKey + 'static> TreeItemPattern<V> {
    /// The host-chosen value identifying this item.
    pub fn value(&self) -> V {
        self.value
    }

    /// Where the item sits in the hierarchy.
    pub fn parent(&self) -> ParentLink<V> {
        self.parent
    }

    /// This item's expansion handle.
    pub fn expansion(&self) -> &ExpansionControl<V> {
        &self.expansion
    }

    /// Nesting depth for `aria-level`: 1 for top-level items.
    pub fn level(&self) -> usize {
        self.level.get()
    }

    /// Whether the item can expand: it has registered children or has
    /// declared some through [`has_children`](Self::has_children).
    pub fn expandable(&self) -> bool {
        self.expandable.get()
    }

    /// Whether the item is expanded.
    pub fn expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Whether every ancestor up to the root is expanded.
    pub fn visible(&self) -> bool {
        self.visible.get()
    }

    /// Whether this item is the tree's active item.
    pub fn active(&self) -> bool {
        self.active.get()
    }

    /// Whether the item is selected, or `None` in navigation mode, where
    /// selection does not apply and [`current`](Self::current) is the
    /// meaningful attribute.
    pub fn selected(&self) -> Option<bool> {
        self.selected.get()
    }

    /// Whether the item is the current location (`aria-current`). Only ever
    /// true in navigation mode.
    pub fn current(&self) -> bool {
        self.current.get()
    }

    /// Tab index for the host to render: 0 only on the active item under the
    /// roving focus strategy.
    pub fn tabindex(&self) -> i32 {
        self.tabindex.get()
    }

    /// 1-based position among siblings, for `aria-posinset`.
    pub fn posinset(&self) -> usize {
        self.posinset.get()
    }

    /// Number of siblings including this item, for `aria-setsize`.
    pub fn setsize(&self) -> usize {
        self.setsize.get()
    }
}

pub(crate) fn record_of<V: ItemKey>(nodes: &[NodeRecord<V>], value: V) -> &NodeRecord<V> {
    nodes
        .iter()
        .find(|n| n.value == value)
        .unwrap_or_else(|| panic!("overstory_tree: item {value:?} is not registered"))
}

/// Nesting depth of `value`: 1 for top-level items.
pub(crate) fn level_of<V: ItemKey>(nodes: &[NodeRecord<V>], value: V) -> usize {
    let mut level = 1;
    let mut link = record_of(nodes, value).parent;
    while let ParentLink::Item(p) = link {
        level += 1;
        link = record_of(nodes, p).parent;
    }
    level
}

/// Whether every ancestor named by `link` up to the root is expanded.
pub(crate) fn ancestors_expanded<V: ItemKey>(
    nodes: &[NodeRecord<V>],
    mut link: ParentLink<V>,
    expansion: &ListExpansion<V>,
) -> bool {
    while let ParentLink::Item(p) = link {
        if !expansion.is_expanded(p) {
            return false;
        }
        link = record_of(nodes, p).parent;
    }
    true
}

/// 1-based position of `value` among its siblings and the sibling count.
pub(crate) fn among_siblings<V: ItemKey>(nodes: &[NodeRecord<V>], value: V) -> (usize, usize) {
    let parent = record_of(nodes, value).parent;
    let mut position = 0;
    let mut count = 0;
    for n in nodes.iter().filter(|n| n.parent == parent) {
        count += 1;
        if n.value == value {
            position = count;
        }
    }
    (position, count)
}
