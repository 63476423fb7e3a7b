// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by this crate's unit tests.

use kurbo::Point;
use sylva_graph::{Caps, ObjectClass, ObjectValue, PointerHit, SceneNode, SceneTree};

/// A deterministic hit whose target is distinct per `n`.
///
/// Allocates `n` mesh nodes in a throwaway tree and returns a hit on the
/// last one, so `hit_at(k)` yields the same target on every call and a
/// different one for every `k`.
pub(crate) fn hit_at(n: u32) -> PointerHit {
    let mut tree = SceneTree::new();
    let mut target = None;
    for _ in 0..n {
        target = Some(tree.allocate(SceneNode::new(
            "Mesh",
            ObjectClass::Mesh,
            ObjectValue::new("Mesh", Caps::empty()),
        )));
    }
    PointerHit {
        target: target.expect("n must be nonzero"),
        distance: 1.0,
        position: Point::ZERO,
    }
}
