// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property patching: pierced paths and assignment strategy selection.
//!
//! A property name like `position-x` addresses a nested component: the walk
//! pierces through `position` and assigns `x` on the object found there.
//! Once the target resolves, one of five strategies applies, in order:
//!
//! 1. A target without the atomic-set capability gets a plain field
//!    assignment on the nearest enclosing object.
//! 2. A next value of the target's own kind is copied structurally.
//! 3. A list spreads into the target's components positionally.
//! 4. A single number broadcasts to all components of a non-color target
//!    with the scalar capability.
//! 5. Anything else is a single-argument atomic assignment.
//!
//! Values arrive already typed; no numeric-string coercion is performed.

use smallvec::SmallVec;

use crate::value::{Caps, ObjectValue, Value};

/// Separator of pierced property paths (`position-x`).
pub const PIERCE_SEPARATOR: char = '-';

/// Patches `name` on `root` to `next`.
///
/// Patching is idempotent: applying the same `next` twice leaves the same
/// state. An unresolvable intermediate path segment makes the whole call a
/// no-op.
///
/// # Example
///
/// ```rust
/// use sylva_graph::{patch, Caps, ObjectValue, Value};
///
/// let mut root = ObjectValue::new("Mesh", Caps::empty())
///     .with_field("a", Value::Object(ObjectValue::new("Bag", Caps::empty())));
///
/// patch(&mut root, "a-b", Value::Number(5.0));
/// let a = root.get("a").unwrap().as_object().unwrap();
/// assert_eq!(a.get("b"), Some(&Value::Number(5.0)));
/// ```
pub fn patch(root: &mut ObjectValue, name: &str, next: Value) {
    if !name.contains(PIERCE_SEPARATOR) {
        assign(root, name, next);
        return;
    }

    let mut segments: SmallVec<[&str; 4]> = name.split(PIERCE_SEPARATOR).collect();
    let key = segments.pop().expect("split yields at least one segment");

    let mut holder = root;
    for segment in segments {
        holder = match holder.get_mut(segment).and_then(Value::as_object_mut) {
            Some(object) => object,
            None => {
                log::trace!("pierced path segment {segment:?} of {name:?} did not resolve");
                return;
            }
        };
    }
    assign(holder, key, next);
}

/// Assigns `next` under `key` on `holder`, choosing the strategy from the
/// current target's capabilities.
fn assign(holder: &mut ObjectValue, key: &str, next: Value) {
    let atomic = holder
        .get(key)
        .and_then(Value::as_object)
        .is_some_and(|o| o.caps().contains(Caps::ATOMIC_SET));
    if !atomic {
        holder.set_field(key, next);
        return;
    }

    let target = holder
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .expect("atomic target probed above");
    let caps = target.caps();
    match next {
        Value::Object(ref other) if other.kind() == target.kind() => target.copy_from(other),
        Value::List(items) => target.apply_positional(&items),
        Value::Number(n)
            if !caps.contains(Caps::COLOR_LIKE) && caps.contains(Caps::SCALAR_SET) =>
        {
            target.apply_scalar(n);
        }
        other => target.apply_single(other),
    }
}
