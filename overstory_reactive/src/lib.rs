// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Reactive: dependency-tracked memoized cells.
//!
//! Headless widget patterns expose a lot of *derived* state (visibility,
//! tab indices, ARIA attributes) computed from a handful of writable inputs
//! (expansion sets, the active item, configuration). This crate provides the
//! small dataflow graph those patterns hang that state on:
//!
//! - [`Input`]: a writable source cell. Writing a value that compares equal
//!   to the current one is a no-op.
//! - [`Memo`]: a derived cell built from a closure. Each run records exactly
//!   which cells the closure read; a memo only recomputes when one of those
//!   dependencies has changed since, and only propagates further when its own
//!   value actually changed (equality cutoff).
//! - [`Graph`]: the shared registry both handle types point into.
//!
//! Cells live as long as any handle to them does: dropping the last handle
//! vacates the cell's slot, and the next created cell reuses it. Patterns
//! that create and drop cells over their lifetime keep the graph bounded.
//!
//! Writes mark dependents stale; reads revalidate lazily. Revalidation
//! recurses into dependencies first, so recomputation follows topological
//! dependency order and a reader always observes a consistent snapshot as of
//! the last completed write. There is no concurrency here at all: the graph
//! is single-threaded by construction and every operation runs to completion
//! before returning.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_reactive::{Graph, Input, Memo};
//!
//! let graph = Graph::new();
//! let celsius = Input::new(&graph, 20_i32);
//!
//! let c = celsius.clone();
//! let fahrenheit = Memo::new(&graph, move || c.get() * 9 / 5 + 32);
//!
//! assert_eq!(fahrenheit.get(), 68);
//! celsius.set(25);
//! assert_eq!(fahrenheit.get(), 77);
//! ```
//!
//! Dependencies are re-captured on every run, so a memo that branches only
//! depends on the cells the taken branch actually read.
//!
//! ## Failure semantics
//!
//! A dependency cycle (a memo that reads itself through any chain) and a
//! write performed from inside a memo's closure are programmer errors and
//! panic immediately rather than producing stale or torn values.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use smallvec::SmallVec;

/// Index of a cell within its [`Graph`].
type NodeId = usize;

/// Monotonic write counter. Bumped once per effective [`Input`] write.
type Tick = u64;

/// One recorded dependency edge: which cell a memo read, and that cell's
/// change tick at the moment of the read.
#[derive(Copy, Clone, Debug)]
struct Edge {
    source: NodeId,
    observed: Tick,
}

struct NodeState {
    /// Tick of the last write (inputs) or last value-changing recomputation
    /// (memos).
    changed_at: Tick,
    /// Tick this node was last confirmed up to date at.
    verified_at: Tick,
    /// Guards against re-entrant validation of the same memo.
    computing: bool,
    /// False until a memo has produced its first value.
    ever_computed: bool,
    /// Dependencies recorded during the most recent recomputation.
    deps: SmallVec<[Edge; 4]>,
    /// Recomputation hook; `None` for inputs. Returns whether the cached
    /// value changed.
    recompute: Option<Rc<dyn Fn() -> bool>>,
}

struct GraphState {
    nodes: Vec<NodeState>,
    /// Slots vacated by dropped cells, available for reuse.
    free: Vec<NodeId>,
    tick: Tick,
    /// Stack of memos currently recomputing; reads attach edges to the top.
    observers: Vec<NodeId>,
}

/// Shared handle to a cell graph.
///
/// Cloning is cheap (reference-counted); all [`Input`] and [`Memo`] handles
/// created from the same graph share one registry. The graph is
/// single-threaded and is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct Graph {
    state: Rc<RefCell<GraphState>>,
}

impl core::fmt::Debug for Graph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("Graph")
            .field("nodes", &(st.nodes.len() - st.free.len()))
            .field("tick", &st.tick)
            .finish()
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(GraphState {
                nodes: Vec::new(),
                free: Vec::new(),
                // Start at 1 so a fresh node's `verified_at` of 0 never
                // matches the current tick.
                tick: 1,
                observers: Vec::new(),
            })),
        }
    }

    /// True if `other` is a handle to the same underlying graph.
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Number of live cells in the graph.
    ///
    /// Slots vacated by dropped cells do not count; a pattern that registers
    /// and drops cells in equal measure keeps this stable.
    pub fn live_nodes(&self) -> usize {
        let st = self.state.borrow();
        st.nodes.len() - st.free.len()
    }

    fn add_node(&self, recompute: Option<Rc<dyn Fn() -> bool>>) -> NodeId {
        let mut st = self.state.borrow_mut();
        let tick = st.tick;
        let node = NodeState {
            changed_at: tick,
            verified_at: 0,
            computing: false,
            ever_computed: false,
            deps: SmallVec::new(),
            recompute,
        };
        match st.free.pop() {
            Some(id) => {
                st.nodes[id] = node;
                id
            }
            None => {
                st.nodes.push(node);
                st.nodes.len() - 1
            }
        }
    }

    /// Vacate `id` for reuse. Called when the last handle to a cell drops.
    ///
    /// The slot stays indexable but inert: a stale dependency edge pointing
    /// at it validates as an unchanged input until the slot is reused, and a
    /// reused slot at worst triggers one spurious recomputation of the
    /// dependent, which re-captures its true dependencies.
    fn release_node(&self, id: NodeId) {
        let recompute = {
            let mut st = self.state.borrow_mut();
            let node = &mut st.nodes[id];
            node.deps = SmallVec::new();
            node.ever_computed = false;
            let recompute = node.recompute.take();
            st.free.push(id);
            recompute
        };
        // Dropping the closure may drop handles it captured, which releases
        // further slots and re-borrows the state; no borrow may be held here.
        drop(recompute);
    }

    /// Record that the memo currently computing (if any) read `id`.
    fn record_read(&self, id: NodeId) {
        let mut st = self.state.borrow_mut();
        let Some(&observer) = st.observers.last() else {
            return;
        };
        let observed = st.nodes[id].changed_at;
        let deps = &mut st.nodes[observer].deps;
        // A cell cannot change mid-computation, so the first edge is enough.
        if !deps.iter().any(|e| e.source == id) {
            deps.push(Edge {
                source: id,
                observed,
            });
        }
    }

    /// Bump the global tick and stamp `id` as changed at the new tick.
    fn mark_changed(&self, id: NodeId) {
        let mut st = self.state.borrow_mut();
        assert!(
            st.observers.is_empty(),
            "overstory_reactive: write during a memo computation"
        );
        st.tick += 1;
        let tick = st.tick;
        st.nodes[id].changed_at = tick;
    }

    /// Bring `id` up to date, recomputing it (and any stale dependencies)
    /// as needed. No-op for inputs.
    fn validate(&self, id: NodeId) {
        let (recompute, deps, ever_computed) = {
            let st = self.state.borrow();
            let node = &st.nodes[id];
            let Some(recompute) = node.recompute.clone() else {
                return;
            };
            if node.verified_at == st.tick {
                return;
            }
            assert!(
                !node.computing,
                "overstory_reactive: dependency cycle detected"
            );
            (recompute, node.deps.clone(), node.ever_computed)
        };

        let mut stale = !ever_computed;
        if !stale {
            for edge in &deps {
                self.validate(edge.source);
                let st = self.state.borrow();
                if st.nodes[edge.source].changed_at > edge.observed {
                    stale = true;
                    break;
                }
            }
        }

        if stale {
            {
                let mut st = self.state.borrow_mut();
                st.observers.push(id);
                let node = &mut st.nodes[id];
                node.computing = true;
                node.deps.clear();
            }
            // User code runs with no borrow held; it will re-enter through
            // `record_read` and `validate`.
            let changed = recompute();
            let mut st = self.state.borrow_mut();
            st.observers.pop();
            let tick = st.tick;
            let node = &mut st.nodes[id];
            node.computing = false;
            node.ever_computed = true;
            if changed {
                node.changed_at = tick;
            }
            node.verified_at = tick;
        } else {
            let mut st = self.state.borrow_mut();
            let tick = st.tick;
            st.nodes[id].verified_at = tick;
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared by every handle to one cell; vacates the slot when the last
/// handle drops.
struct NodeGuard {
    graph: Graph,
    id: NodeId,
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        self.graph.release_node(self.id);
    }
}

/// A writable source cell.
///
/// Handles are cheap to clone and all refer to the same slot. Writes that
/// compare equal to the current value are dropped without invalidating
/// anything.
pub struct Input<T> {
    node: Rc<NodeGuard>,
    value: Rc<RefCell<T>>,
}

impl<T> Clone for Input<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Input<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Input")
            .field("id", &self.node.id)
            .field("value", &*self.value.borrow())
            .finish()
    }
}

impl<T> Input<T> {
    /// Create a new input cell holding `value`.
    pub fn new(graph: &Graph, value: T) -> Self {
        let id = graph.add_node(None);
        Self {
            node: Rc::new(NodeGuard {
                graph: graph.clone(),
                id,
            }),
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Read the current value by reference.
    ///
    /// When called from inside a memo's closure, the read is recorded as a
    /// dependency of that memo.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.node.graph.record_read(self.node.id);
        f(&self.value.borrow())
    }

    /// Read a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }
}

impl<T: PartialEq> Input<T> {
    /// Replace the value, invalidating dependents only if it differs.
    pub fn set(&self, value: T) {
        let differs = *self.value.borrow() != value;
        if differs {
            *self.value.borrow_mut() = value;
            self.node.graph.mark_changed(self.node.id);
        }
    }

    /// Mutate the value in place, invalidating dependents only if the result
    /// differs from the previous value.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let before = self.value.borrow().clone();
        f(&mut self.value.borrow_mut());
        let differs = *self.value.borrow() != before;
        if differs {
            self.node.graph.mark_changed(self.node.id);
        }
    }
}

/// A derived, lazily revalidated cell.
///
/// The closure given to [`Memo::new`] runs at most once per read generation:
/// a read first revalidates every recorded dependency, then recomputes only
/// if one of them changed since the previous run. A recomputation that
/// produces an equal value does not invalidate dependents.
pub struct Memo<T> {
    node: Rc<NodeGuard>,
    value: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Memo")
            .field("id", &self.node.id)
            .field("value", &*self.value.borrow())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Memo<T> {
    /// Create a derived cell computed by `compute`.
    ///
    /// The closure may read any [`Input`] or [`Memo`] belonging to the same
    /// graph; those reads become this memo's dependencies for the run.
    pub fn new(graph: &Graph, compute: impl Fn() -> T + 'static) -> Self {
        let value: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&value);
        let recompute = Rc::new(move || -> bool {
            let next = compute();
            let mut slot = slot.borrow_mut();
            let changed = match &*slot {
                Some(prev) => *prev != next,
                None => true,
            };
            if changed {
                *slot = Some(next);
            }
            changed
        });
        let id = graph.add_node(Some(recompute));
        Self {
            node: Rc::new(NodeGuard {
                graph: graph.clone(),
                id,
            }),
            value,
        }
    }

    /// Read the current value by reference, recomputing first if stale.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.node.graph.validate(self.node.id);
        self.node.graph.record_read(self.node.id);
        let slot = self.value.borrow();
        f(slot.as_ref().expect("validated memo holds a value"))
    }

    /// Read a clone of the current value, recomputing first if stale.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}
