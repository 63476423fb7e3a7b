// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer dispatcher: per-child watches over a shared raycast.
//!
//! Insertion of an event-bearing mesh registers a watch; each frame the
//! external render loop calls [`PointerDispatcher::run_frame`], and the
//! global input source calls [`PointerDispatcher::dispatch_click`] on click
//! events. Watches are independent: every watched child has its own
//! [`HitState`] and sees its own enter/move/leave sequence.
//!
//! Watches do not outlive their nodes. [`PointerDispatcher::release`] is the
//! explicit unsubscribe hook; the removal path in `sylva_ops` invokes it for
//! every disposed node so events are never dispatched to detached objects.
//! As a second line of defense, a frame skips any watch whose child or
//! parent is no longer alive.

use alloc::vec::Vec;

use sylva_graph::{NodeId, PointerHit, SceneTree};

use crate::state::{HitState, HitTransition};

/// The external ray-intersection query.
///
/// Implementations own the pointer position and the geometric test; this
/// crate only cares that intersections come back nearest-first.
pub trait Raycaster {
    /// Intersects the current pointer ray with `candidates`, nearest first.
    fn intersect(&self, tree: &SceneTree, candidates: &[NodeId]) -> Vec<PointerHit>;
}

struct Watch {
    child: NodeId,
    parent: NodeId,
    state: HitState,
}

/// Registry of per-child hit-test watches.
#[derive(Default)]
pub struct PointerDispatcher {
    watches: Vec<Watch>,
}

impl PointerDispatcher {
    /// Creates a dispatcher with no watches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts watching `child` against `parent`'s children.
    ///
    /// A second watch for the same child replaces the first and resets its
    /// hover state.
    pub fn watch(&mut self, child: NodeId, parent: NodeId) {
        if let Some(existing) = self.watches.iter_mut().find(|w| w.child == child) {
            existing.parent = parent;
            existing.state = HitState::new();
            return;
        }
        self.watches.push(Watch {
            child,
            parent,
            state: HitState::new(),
        });
    }

    /// Tears down the watch for `child`, if any. No further events are
    /// dispatched to it.
    pub fn release(&mut self, child: NodeId) {
        self.watches.retain(|w| w.child != child);
    }

    /// Returns `true` if `child` currently has a watch.
    #[must_use]
    pub fn is_watching(&self, child: NodeId) -> bool {
        self.watches.iter().any(|w| w.child == child)
    }

    /// Number of active watches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Returns `true` if no watches are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// One frame of hit testing: raycasts each watch's parent children and
    /// dispatches enter/move/leave to the watched child's handlers.
    ///
    /// A watch matches only when its child is the *first* intersection, so
    /// an occluded object is not hovered. Watches whose child or parent is
    /// no longer alive are skipped.
    pub fn run_frame(&mut self, tree: &mut SceneTree, raycaster: &impl Raycaster) {
        for watch in &mut self.watches {
            if !tree.is_alive(watch.child) || !tree.is_alive(watch.parent) {
                log::trace!("skipping watch on dead node {:?}", watch.child);
                continue;
            }
            let candidates = tree.children_of(watch.parent);
            let hits = raycaster.intersect(tree, candidates);
            let hit = hits.into_iter().next().filter(|h| h.target == watch.child);

            let transitions = watch.state.advance(hit);
            if transitions.is_empty() {
                continue;
            }
            let Some(node) = tree.get_mut(watch.child) else {
                continue;
            };
            for transition in transitions {
                match transition {
                    HitTransition::Enter(hit) => {
                        if let Some(handler) = node.handlers.enter.as_mut() {
                            handler(&hit);
                        }
                    }
                    HitTransition::Move(hit) => {
                        if let Some(handler) = node.handlers.motion.as_mut() {
                            handler(&hit);
                        }
                    }
                    HitTransition::Leave(hit) => {
                        if let Some(handler) = node.handlers.leave.as_mut() {
                            handler(&hit);
                        }
                    }
                }
            }
        }
    }

    /// A global click: every watch whose object is the current hit gets its
    /// click handler invoked with that hit. No current hit, no call.
    pub fn dispatch_click(&mut self, tree: &mut SceneTree) {
        for watch in &mut self.watches {
            let Some(hit) = watch.state.current().cloned() else {
                continue;
            };
            if let Some(node) = tree.get_mut(watch.child)
                && let Some(handler) = node.handlers.click.as_mut()
            {
                handler(&hit);
            }
        }
    }
}

impl core::fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("watches", &self.watches.len())
            .finish()
    }
}
