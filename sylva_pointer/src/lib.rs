// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven pointer interaction for a [`sylva_graph`] scene tree.
//!
//! This crate turns raw per-frame ray intersections into the pointer events
//! an interactive object expects: enter when the pointer first lands on it,
//! move while it stays, leave when it departs, and click on demand. The
//! geometric test itself is external; callers supply it through the
//! [`Raycaster`] trait and drive [`PointerDispatcher::run_frame`] once per
//! rendered frame.
//!
//! ```rust
//! use sylva_pointer::{HitState, HitTransition};
//! use sylva_graph::{Caps, ObjectClass, ObjectValue, PointerHit, SceneNode, SceneTree};
//!
//! let mut tree = SceneTree::new();
//! let mesh = tree.allocate(SceneNode::new(
//!     "Mesh",
//!     ObjectClass::Mesh,
//!     ObjectValue::new("Mesh", Caps::empty()),
//! ));
//! let hit = PointerHit {
//!     target: mesh,
//!     distance: 1.0,
//!     position: kurbo::Point::ZERO,
//! };
//!
//! let mut state = HitState::new();
//! let transitions = state.advance(Some(hit.clone()));
//! assert!(matches!(transitions[0], HitTransition::Enter(_)));
//! assert!(matches!(transitions[1], HitTransition::Move(_)));
//!
//! let transitions = state.advance(None);
//! assert!(matches!(transitions[0], HitTransition::Leave(_)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod state;

#[cfg(test)]
mod test_support;

pub use dispatcher::{PointerDispatcher, Raycaster};
pub use state::{HitState, HitTransition, Transitions};
