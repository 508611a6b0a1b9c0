// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree root: registration, flattening, and event dispatch.

use alloc::rc::Rc;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use overstory_event::{
    Key, KeyBindings, KeyboardInput, Modifiers, PointerBindings, PointerInput,
};
use overstory_list::{ItemKey, List, ListConfig, ListExpansion, ListItem, SelectOptions};
use overstory_reactive::{Graph, Input, Memo};

use crate::item::{NodeRecord, record_of};
use crate::{
    FocusMode, Orientation, ParentLink, TextDirection, TreeConfig, TreeError, TreeItemInputs,
    TreeItemPattern,
};

/// One keyboard intent, resolved from the binding table.
///
/// The table maps normalized events to these values; the pattern interprets
/// them against its current state, so a binding stays valid as items come
/// and go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// Move to the previous visible item.
    Prev,
    /// Move to the next visible item.
    Next,
    /// Move to the previous visible item, extending a range selection.
    ExtendPrev,
    /// Move to the next visible item, extending a range selection.
    ExtendNext,
    /// Move to the first visible item.
    First,
    /// Move to the last visible item.
    Last,
    /// Expand the active item, or step into its first child if already
    /// expanded.
    Expand,
    /// Collapse the active item, or step out to its parent if already
    /// collapsed.
    Collapse,
    /// Expand every expandable sibling of the active item, itself included.
    ExpandSiblings,
    /// Toggle the active item's selection (multi mode) or select it alone.
    ToggleSelection,
    /// Select the active item alone.
    Select,
    /// Select every visible enabled item (multi mode).
    SelectAll,
}

/// The tree interaction pattern.
///
/// One instance per rendered tree. Hosts register an item per node in
/// document order (parents before their children, subtrees contiguous),
/// forward normalized input events to [`on_keydown`](Self::on_keydown) and
/// [`on_pointerdown`](Self::on_pointerdown), and read derived attributes
/// back off the pattern and its [`TreeItemPattern`] handles.
///
/// All flat-list behavior runs over the *visible* sequence: the registered
/// hierarchy flattened in preorder, descending only into expanded items.
/// Keyboard navigation, range selection, and typeahead therefore skip
/// collapsed subtrees without any special casing.
#[derive(Debug)]
pub struct TreePattern<V: ItemKey> {
    graph: Graph,
    /// Layout axis. Writing it rebuilds the key bindings.
    pub orientation: Input<Orientation>,
    /// Reading direction. Writing it rebuilds the key bindings.
    pub direction: Input<TextDirection>,
    /// Navigation mode: selection represents the current location.
    pub nav_mode: Input<bool>,
    /// Focus strategy the host renders with.
    pub focus_mode: Input<FocusMode>,
    list: Input<List<V>>,
    expansion: Input<ListExpansion<V>>,
    structure: Input<Vec<NodeRecord<V>>>,
    registry: HashMap<V, Rc<TreeItemPattern<V>>>,
    visible: Memo<Vec<V>>,
    keymap: Memo<KeyBindings<TreeAction>>,
    pointer_bindings: PointerBindings<SelectOptions>,
    activedescendant: Memo<Option<V>>,
    tabindex: Memo<i32>,
}

impl<V: ItemKey + 'static> TreePattern<V> {
    /// Create an empty tree pattern.
    pub fn new(config: TreeConfig) -> Self {
        let graph = Graph::new();
        let orientation = Input::new(&graph, config.orientation);
        let direction = Input::new(&graph, config.direction);
        let nav_mode = Input::new(&graph, config.nav_mode);
        let focus_mode = Input::new(&graph, config.focus_mode);
        let list = Input::new(
            &graph,
            List::new(ListConfig {
                wrap: config.wrap,
                skip_disabled: config.skip_disabled,
                multi: config.multi,
                follow_focus: config.follow_focus,
                typeahead_delay_ms: config.typeahead_delay_ms,
            }),
        );
        let expansion = Input::new(&graph, ListExpansion::new(true));
        let structure: Input<Vec<NodeRecord<V>>> = Input::new(&graph, Vec::new());

        let (st, ex) = (structure.clone(), expansion.clone());
        let visible = Memo::new(&graph, move || {
            st.with(|nodes| ex.with(|e| flatten_visible(nodes, e)))
        });

        let (ori, dir) = (orientation.clone(), direction.clone());
        let keymap = Memo::new(&graph, move || keymap_for(ori.get(), dir.get()));

        let (fm, li) = (focus_mode.clone(), list.clone());
        let activedescendant = Memo::new(&graph, move || {
            if fm.get() == FocusMode::ActiveDescendant {
                li.with(|l| l.navigation.active())
            } else {
                None
            }
        });

        let fm = focus_mode.clone();
        let tabindex = Memo::new(&graph, move || {
            if fm.get() == FocusMode::ActiveDescendant {
                0
            } else {
                -1
            }
        });

        Self {
            graph,
            orientation,
            direction,
            nav_mode,
            focus_mode,
            list,
            expansion,
            structure,
            registry: HashMap::new(),
            visible,
            keymap,
            pointer_bindings: pointer_bindings_for(config.multi),
            activedescendant,
            tabindex,
        }
    }

    // --- Registration lifecycle ---

    /// Register one item and return its behavior handle.
    ///
    /// Parents must be registered before their children; siblings are
    /// presented in registration order.
    pub fn register(
        &mut self,
        inputs: TreeItemInputs<V>,
    ) -> Result<Rc<TreeItemPattern<V>>, TreeError> {
        if self.registry.contains_key(&inputs.value) {
            return Err(TreeError::DuplicateItem);
        }
        if let ParentLink::Item(p) = inputs.parent
            && !self.registry.contains_key(&p)
        {
            return Err(TreeError::UnknownParent);
        }
        let record = NodeRecord {
            value: inputs.value,
            parent: inputs.parent,
        };
        self.structure.update(|nodes| nodes.push(record));
        let item = Rc::new(TreeItemPattern::build(
            &self.graph,
            inputs,
            &self.structure,
            &self.expansion,
            &self.list,
            &self.nav_mode,
            &self.focus_mode,
        ));
        self.registry.insert(item.value(), Rc::clone(&item));
        Ok(item)
    }

    /// Unregister an item together with its whole subtree.
    ///
    /// Selection and expansion state for the removed items is dropped. If
    /// the active item is removed, focus relocates to the removed subtree's
    /// parent. Returns whether the value was registered.
    pub fn unregister(&mut self, value: V) -> bool {
        if !self.registry.contains_key(&value) {
            return false;
        }
        let doomed = self.structure.with(|nodes| subtree_of(nodes, value));
        if let Some(active) = self.active_value()
            && doomed.contains(&active)
        {
            let fallback = self.structure.with(|nodes| match record_of(nodes, value).parent {
                ParentLink::Root => None,
                ParentLink::Item(p) => Some(p),
            });
            self.list.update(|l| l.navigation.set_active(fallback));
        }
        self.structure
            .update(|nodes| nodes.retain(|n| !doomed.contains(&n.value)));
        self.expansion.update(|e| e.retain(|k| !doomed.contains(&k)));
        self.list
            .update(|l| l.selection.retain(|k| !doomed.contains(&k)));
        for v in &doomed {
            self.registry.remove(v);
        }
        true
    }

    // --- Read surface ---

    /// The behavior handle for `value`, if registered.
    pub fn item(&self, value: V) -> Option<Rc<TreeItemPattern<V>>> {
        self.registry.get(&value).cloned()
    }

    /// Every registered item, in registration order.
    pub fn items(&self) -> Vec<Rc<TreeItemPattern<V>>> {
        self.structure.with(|nodes| {
            nodes
                .iter()
                .map(|n| Rc::clone(&self.registry[&n.value]))
                .collect()
        })
    }

    /// The top-level items, in registration order.
    pub fn children(&self) -> Vec<Rc<TreeItemPattern<V>>> {
        self.structure.with(|nodes| {
            nodes
                .iter()
                .filter(|n| n.parent == ParentLink::Root)
                .map(|n| Rc::clone(&self.registry[&n.value]))
                .collect()
        })
    }

    /// Values of the visible items, in document (preorder) order.
    pub fn visible_values(&self) -> Vec<V> {
        self.visible.get()
    }

    /// The visible items, in document (preorder) order.
    pub fn visible_items(&self) -> Vec<Rc<TreeItemPattern<V>>> {
        self.visible.with(|ids| {
            ids.iter()
                .map(|id| Rc::clone(&self.registry[id]))
                .collect()
        })
    }

    /// The active item's value, if any.
    pub fn active_value(&self) -> Option<V> {
        self.list.with(|l| l.navigation.active())
    }

    /// Selected values, most recently selected last.
    pub fn selected_values(&self) -> Vec<V> {
        self.list.with(|l| l.selection.selected().to_vec())
    }

    /// Value to announce through `aria-activedescendant`; `None` under the
    /// roving focus strategy.
    pub fn activedescendant(&self) -> Option<V> {
        self.activedescendant.get()
    }

    /// Tab index of the tree container: 0 under the activedescendant focus
    /// strategy, -1 when focus roves to the items.
    pub fn tabindex(&self) -> i32 {
        self.tabindex.get()
    }

    /// The current keyboard binding table. Rebuilt only when orientation or
    /// reading direction changes.
    pub fn keymap(&self) -> KeyBindings<TreeAction> {
        self.keymap.get()
    }

    /// Whether more than one item may be selected.
    pub fn multi(&self) -> bool {
        self.list.with(|l| l.selection.multi)
    }

    /// Change whether relative navigation wraps at the ends.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.list.update(|l| l.navigation.wrap = wrap);
    }

    /// Change whether keyboard navigation skips disabled items.
    pub fn set_skip_disabled(&mut self, skip: bool) {
        self.list.update(|l| l.navigation.skip_disabled = skip);
    }

    // --- Imperative operations ---

    /// Establish the initial active item: the first visible enabled item
    /// that is selected, else the first visible enabled item, else none.
    ///
    /// Safe to call again; it re-evaluates from scratch.
    pub fn set_default_state(&mut self) {
        let items = self.visible_snapshot();
        let target = self.list.with(|l| {
            items
                .iter()
                .find(|it| !it.disabled && l.selection.is_selected(it.id))
                .or_else(|| items.iter().find(|it| !it.disabled))
                .map(|it| it.id)
        });
        if target.is_some() {
            self.list.update(|l| l.navigation.set_active(target));
        }
    }

    /// Move focus to `target` and apply the selection intent, as a pointer
    /// press would. Returns whether the target is currently visible.
    pub fn goto(&mut self, target: V, options: SelectOptions) -> bool {
        let items = self.visible_snapshot();
        let mut moved = false;
        self.list.update(|l| moved = l.goto(&items, target, options));
        moved
    }

    /// Expand `value` if it is expandable and enabled.
    pub fn expand(&mut self, value: V) {
        let Some(item) = self.item(value) else {
            return;
        };
        if item.disabled.get() || !item.expandable() {
            return;
        }
        self.expansion.update(|e| {
            e.open(value);
        });
    }

    /// Collapse `value` if it is enabled.
    ///
    /// Only the targeted item closes; its ancestors stay expanded. When the
    /// active item disappears from view as a result, focus relocates to its
    /// nearest visible ancestor.
    pub fn collapse(&mut self, value: V) {
        let Some(item) = self.item(value) else {
            return;
        };
        if item.disabled.get() {
            return;
        }
        self.expansion.update(|e| {
            e.close(value);
        });
        self.relocate_active_into_view();
    }

    /// Flip the active item's expanded state. No-op on leaves.
    pub fn toggle_expansion(&mut self) {
        if let Some(active) = self.active_value() {
            self.toggle_expansion_of(active);
        }
    }

    /// Flip `value`'s expanded state. No-op on leaves. Never moves focus,
    /// except for the relocation [`collapse`](Self::collapse) performs.
    pub fn toggle_expansion_of(&mut self, value: V) {
        let Some(item) = self.item(value) else {
            return;
        };
        if item.disabled.get() || !item.expandable() {
            return;
        }
        if item.expanded() {
            self.collapse(value);
        } else {
            self.expand(value);
        }
    }

    /// Expand every expandable sibling of the active item, itself included.
    pub fn expand_siblings(&mut self) {
        if let Some(active) = self.active_value() {
            self.expand_siblings_of(active);
        }
    }

    /// Expand every expandable sibling of `value`, itself included.
    /// Already-expanded siblings are unaffected.
    pub fn expand_siblings_of(&mut self, value: V) {
        if !self.registry.contains_key(&value) {
            return;
        }
        let siblings = self.structure.with(|nodes| {
            let parent = record_of(nodes, value).parent;
            nodes
                .iter()
                .filter(|n| n.parent == parent)
                .map(|n| n.value)
                .collect::<Vec<_>>()
        });
        let openable: Vec<V> = siblings
            .into_iter()
            .filter(|&s| {
                let item = &self.registry[&s];
                !item.disabled.get() && item.expandable()
            })
            .collect();
        self.expansion.update(|e| {
            for s in openable {
                e.open(s);
            }
        });
    }

    // --- Event ingestion ---

    /// Dispatch one keyboard event. Returns whether the event was handled;
    /// unhandled events should keep their host default behavior.
    ///
    /// Bound keys resolve through the orientation- and direction-aware
    /// binding table; any other printable character feeds typeahead.
    pub fn on_keydown(&mut self, event: &KeyboardInput) -> bool {
        if let Some(action) = self.keymap.with(|map| map.resolve(event)) {
            self.apply(action);
            return true;
        }
        if event
            .modifiers
            .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META)
        {
            return false;
        }
        let Some(ch) = event.key.as_char() else {
            return false;
        };
        let items = self.visible_snapshot();
        self.list.update(|l| {
            l.typeahead_char(&items, ch, event.time_ms);
        });
        true
    }

    /// Dispatch one pointer event. Returns whether the event was handled.
    ///
    /// The press resolves to a selection intent by button and modifiers
    /// (plain primary press selects one, Control/Meta toggles, Shift selects
    /// a range when multi-selectable) and lands as a [`goto`](Self::goto) on
    /// the target.
    pub fn on_pointerdown(&mut self, event: &PointerInput<V>) -> bool {
        let Some(target) = event.target else {
            return false;
        };
        let Some(options) = self.pointer_bindings.resolve(event) else {
            return false;
        };
        self.goto(target, options)
    }

    // --- Internals ---

    /// Snapshot of the visible sequence for the flat-list operations.
    fn visible_snapshot(&self) -> Vec<ListItem<V>> {
        let ids = self.visible.get();
        ids.into_iter()
            .map(|id| {
                let item = &self.registry[&id];
                ListItem {
                    id,
                    disabled: item.disabled.get(),
                    label: item.label.get(),
                }
            })
            .collect()
    }

    fn apply(&mut self, action: TreeAction) {
        let items = self.visible_snapshot();
        match action {
            TreeAction::Prev => self.list.update(|l| {
                l.prev(&items, false);
            }),
            TreeAction::Next => self.list.update(|l| {
                l.next(&items, false);
            }),
            TreeAction::ExtendPrev => self.list.update(|l| {
                l.prev(&items, true);
            }),
            TreeAction::ExtendNext => self.list.update(|l| {
                l.next(&items, true);
            }),
            TreeAction::First => self.list.update(|l| {
                l.first(&items, false);
            }),
            TreeAction::Last => self.list.update(|l| {
                l.last(&items, false);
            }),
            TreeAction::Expand => self.expand_from_keyboard(&items),
            TreeAction::Collapse => self.collapse_from_keyboard(&items),
            TreeAction::ExpandSiblings => self.expand_siblings(),
            TreeAction::ToggleSelection => self.select_active(true),
            TreeAction::Select => self.select_active(false),
            TreeAction::SelectAll => self.list.update(|l| l.select_all(&items)),
        }
    }

    /// The expand key: open a collapsed item, step into an expanded one.
    fn expand_from_keyboard(&mut self, items: &[ListItem<V>]) {
        let Some(active) = self.active_value() else {
            return;
        };
        let Some(item) = self.item(active) else {
            return;
        };
        if !item.expandable() || item.disabled.get() {
            return;
        }
        if item.expanded() {
            let child = self.structure.with(|nodes| {
                nodes
                    .iter()
                    .find(|n| n.parent == ParentLink::Item(active))
                    .map(|n| n.value)
            });
            if let Some(child) = child {
                self.list.update(|l| {
                    l.goto(items, child, SelectOptions::NONE);
                });
            }
        } else {
            self.expand(active);
        }
    }

    /// The collapse key: close an expanded item, step out of a closed one.
    fn collapse_from_keyboard(&mut self, items: &[ListItem<V>]) {
        let Some(active) = self.active_value() else {
            return;
        };
        let Some(item) = self.item(active) else {
            return;
        };
        if item.expanded() && !item.disabled.get() {
            self.collapse(active);
            return;
        }
        if let ParentLink::Item(p) = item.parent() {
            self.list.update(|l| {
                l.goto(items, p, SelectOptions::NONE);
            });
        }
    }

    fn select_active(&mut self, toggle: bool) {
        let Some(active) = self.active_value() else {
            return;
        };
        if self.item(active).is_none_or(|it| it.disabled.get()) {
            return;
        }
        self.list.update(|l| {
            if toggle && l.selection.multi {
                l.selection.toggle(active);
            } else {
                l.selection.select_one(active);
            }
        });
    }

    /// If the active item is no longer visible, move focus to its nearest
    /// visible ancestor (or clear it when none remains).
    fn relocate_active_into_view(&mut self) {
        let Some(active) = self.active_value() else {
            return;
        };
        let ids = self.visible.get();
        if ids.contains(&active) {
            return;
        }
        let fallback = self.structure.with(|nodes| {
            let mut link = record_of(nodes, active).parent;
            while let ParentLink::Item(p) = link {
                if ids.contains(&p) {
                    return Some(p);
                }
                link = record_of(nodes, p).parent;
            }
            None
        });
        self.list.update(|l| l.navigation.set_active(fallback));
    }
}

/// Flatten the hierarchy in preorder, descending only into expanded items.
fn flatten_visible<V: ItemKey>(nodes: &[NodeRecord<V>], expansion: &ListExpansion<V>) -> Vec<V> {
    let mut out = Vec::new();
    push_visible(nodes, ParentLink::Root, expansion, &mut out);
    out
}

fn push_visible<V: ItemKey>(
    nodes: &[NodeRecord<V>],
    parent: ParentLink<V>,
    expansion: &ListExpansion<V>,
    out: &mut Vec<V>,
) {
    for n in nodes.iter().filter(|n| n.parent == parent) {
        out.push(n.value);
        if expansion.is_expanded(n.value) {
            push_visible(nodes, ParentLink::Item(n.value), expansion, out);
        }
    }
}

/// `root` and every registered descendant of it.
///
/// Children always follow their parent in registration order, so one pass
/// suffices.
fn subtree_of<V: ItemKey>(nodes: &[NodeRecord<V>], root: V) -> HashSet<V> {
    let mut members = HashSet::new();
    members.insert(root);
    for n in nodes {
        if let ParentLink::Item(p) = n.parent
            && members.contains(&p)
        {
            members.insert(n.value);
        }
    }
    members
}

/// Build the keyboard binding table for one orientation and direction.
///
/// Vertical trees navigate with ArrowUp/ArrowDown and expand toward the
/// reading direction. Horizontal trees fold everything onto
/// ArrowLeft/ArrowRight; the expand/collapse entries then coincide with
/// navigation and are shadowed by it (bindings resolve first-match), leaving
/// expansion to pointer input, `*`, and the imperative API. The vertical
/// arrows are unbound in horizontal orientation and stay unhandled.
fn keymap_for(orientation: Orientation, direction: TextDirection) -> KeyBindings<TreeAction> {
    let (next, prev) = match (orientation, direction) {
        (Orientation::Vertical, _) => (Key::ArrowDown, Key::ArrowUp),
        (Orientation::Horizontal, TextDirection::Ltr) => (Key::ArrowRight, Key::ArrowLeft),
        (Orientation::Horizontal, TextDirection::Rtl) => (Key::ArrowLeft, Key::ArrowRight),
    };
    let (expand, collapse) = match (orientation, direction) {
        (Orientation::Vertical, TextDirection::Ltr) => (Key::ArrowRight, Key::ArrowLeft),
        (Orientation::Vertical, TextDirection::Rtl) => (Key::ArrowLeft, Key::ArrowRight),
        (Orientation::Horizontal, _) => (next, prev),
    };

    let mut map = KeyBindings::new();
    map.bind(next, Modifiers::empty(), TreeAction::Next)
        .bind(prev, Modifiers::empty(), TreeAction::Prev)
        .bind(next, Modifiers::SHIFT, TreeAction::ExtendNext)
        .bind(prev, Modifiers::SHIFT, TreeAction::ExtendPrev)
        .bind(Key::Home, Modifiers::empty(), TreeAction::First)
        .bind(Key::End, Modifiers::empty(), TreeAction::Last)
        .bind(expand, Modifiers::empty(), TreeAction::Expand)
        .bind(collapse, Modifiers::empty(), TreeAction::Collapse)
        .bind(
            Key::Character('*'),
            Modifiers::empty(),
            TreeAction::ExpandSiblings,
        )
        .bind(Key::Space, Modifiers::empty(), TreeAction::ToggleSelection)
        .bind(Key::Enter, Modifiers::empty(), TreeAction::Select)
        .bind(Key::Character('a'), Modifiers::CONTROL, TreeAction::SelectAll)
        .bind(Key::Character('a'), Modifiers::META, TreeAction::SelectAll);
    map
}

/// Pointer intents: plain primary press selects one; with multi-selection,
/// Control/Meta toggles and Shift selects the anchor-to-target range.
fn pointer_bindings_for(multi: bool) -> PointerBindings<SelectOptions> {
    let mut bindings = PointerBindings::new();
    if multi {
        bindings
            .bind(0, Modifiers::SHIFT, SelectOptions::RANGE)
            .bind(0, Modifiers::CONTROL, SelectOptions::TOGGLE)
            .bind(0, Modifiers::META, SelectOptions::TOGGLE);
    }
    bindings.bind(0, Modifiers::empty(), SelectOptions::ONE);
    bindings
}
