// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state for a single watched object.
//!
//! [`HitState`] is a two-field state machine (previous hit, current hit)
//! with a pure transition function, so enter/move/leave sequencing is
//! testable without any scheduler or raycaster:
//!
//! ```
//! use kurbo::Point;
//! use sylva_graph::{Caps, ObjectClass, ObjectValue, PointerHit, SceneNode, SceneTree};
//! use sylva_pointer::{HitState, HitTransition};
//!
//! let mut tree = SceneTree::new();
//! let mesh = tree.allocate(SceneNode::new(
//!     "Mesh",
//!     ObjectClass::Mesh,
//!     ObjectValue::new("Mesh", Caps::empty()),
//! ));
//! let hit = PointerHit { target: mesh, distance: 1.0, position: Point::ZERO };
//!
//! let mut state = HitState::new();
//!
//! // First frame with a hit: enter, then a move in the same frame.
//! let transitions = state.advance(Some(hit.clone()));
//! assert!(matches!(transitions[0], HitTransition::Enter(_)));
//! assert!(matches!(transitions[1], HitTransition::Move(_)));
//!
//! // Losing the hit leaves with the previous hit.
//! let transitions = state.advance(None);
//! assert!(matches!(&transitions[..], [HitTransition::Leave(h)] if *h == hit));
//! ```

use smallvec::SmallVec;
use sylva_graph::PointerHit;

/// Pointer transitions produced by one frame of hit testing.
///
/// The payload is the hit to hand to the matching handler: the fresh hit
/// for enter/move, the previous frame's hit for leave.
#[derive(Clone, Debug, PartialEq)]
pub enum HitTransition {
    /// The watched object started being hit.
    Enter(PointerHit),
    /// The watched object is still being hit this frame.
    Move(PointerHit),
    /// The watched object stopped being hit.
    Leave(PointerHit),
}

/// Transitions produced by a single frame; never more than two.
pub type Transitions = SmallVec<[HitTransition; 2]>;

/// Previous/current hit pair for one watched object.
///
/// The state is `Idle` when `current` is `None` and `Hovering` otherwise.
/// [`advance`](HitState::advance) consumes the frame's hit (or lack of one)
/// and returns the transitions to dispatch, updating the stored state for
/// the next frame and for the click handler.
#[derive(Debug, Default)]
pub struct HitState {
    previous: Option<PointerHit>,
    current: Option<PointerHit>,
}

impl HitState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The hit stored by the last [`advance`](HitState::advance), consumed
    /// by click dispatch.
    #[must_use]
    pub fn current(&self) -> Option<&PointerHit> {
        self.current.as_ref()
    }

    /// Feeds one frame's hit and returns the transitions to dispatch.
    ///
    /// - Idle → Hovering (a hit with no previous hit, or a previous hit on
    ///   a different object): enter, then a move in the same frame.
    /// - Hovering persisting: a move every frame.
    /// - Hovering → Idle (no hit, but a previous one): leave with the
    ///   previous hit.
    pub fn advance(&mut self, hit: Option<PointerHit>) -> Transitions {
        let mut out = Transitions::new();
        match hit {
            Some(hit) => {
                let fresh = self
                    .previous
                    .as_ref()
                    .is_none_or(|prev| prev.target != hit.target);
                if fresh {
                    out.push(HitTransition::Enter(hit.clone()));
                }
                out.push(HitTransition::Move(hit.clone()));
                self.current = Some(hit);
            }
            None => {
                self.current = None;
                if let Some(prev) = self.previous.take() {
                    out.push(HitTransition::Leave(prev));
                }
            }
        }
        self.previous = self.current.clone();
        out
    }
}
