// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Graph: an arena scene tree driven by declarative reconciliation.
//!
//! This crate is the structural half of the Sylva reconciliation backend.
//! An external tree-differ decides *which* mutations to apply and in what
//! order; this crate applies them to a live scene graph while keeping its
//! invariants:
//!
//! - [`SceneTree`]: arena-backed tree with generational [`NodeId`]s.
//!   Object-category nodes live in ordered child lists; Attachment-category
//!   nodes install into a named slot of their parent and restore the slot's
//!   previous value when removed. Disposal is recursive and exactly-once.
//! - [`Value`] / [`ObjectValue`]: dynamically typed property state with
//!   explicit capabilities ([`Caps`]) fixed at construction, replacing
//!   per-call capability probing.
//! - [`patch`]: the property patcher — pierced `a-b-c` paths and a
//!   five-step assignment strategy (plain set, structural copy, positional
//!   spread, scalar broadcast, single-argument set).
//! - [`TreeEvent`]: drainable "added"/"disposed" lifecycle notifications
//!   for subscribers such as resource managers and the pointer dispatcher.
//!
//! Hit testing and pointer-event dispatch live in `sylva_pointer`; the
//! factory/registry surface consumed by the differ lives in `sylva_ops`.
//!
//! ## Minimal example
//!
//! ```rust
//! use sylva_graph::{patch, Caps, ObjectClass, ObjectValue, SceneNode, SceneTree, Value};
//!
//! let mut tree = SceneTree::new();
//! let scene = tree.allocate(SceneNode::new(
//!     "Group",
//!     ObjectClass::Group,
//!     ObjectValue::new("Group", Caps::empty()),
//! ));
//! let mesh = tree.allocate(SceneNode::new(
//!     "Mesh",
//!     ObjectClass::Mesh,
//!     ObjectValue::new("Mesh", Caps::empty())
//!         .with_field(
//!             "position",
//!             Value::Object(
//!                 ObjectValue::new("Vec3", Caps::ATOMIC_SET | Caps::SCALAR_SET)
//!                     .with_field("x", Value::Number(0.0))
//!                     .with_field("y", Value::Number(0.0))
//!                     .with_field("z", Value::Number(0.0)),
//!             ),
//!         ),
//! ));
//!
//! tree.insert(mesh, scene, None);
//! patch(&mut tree.get_mut(mesh).unwrap().object, "position-y", Value::Number(2.0));
//!
//! let position = tree.get(mesh).unwrap().object.get("position").unwrap();
//! assert_eq!(position.as_object().unwrap().get("y"), Some(&Value::Number(2.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod node;
mod patch;
mod tree;
mod types;
mod value;

pub use node::{Handler, PointerHandlers, SceneNode};
pub use patch::{PIERCE_SEPARATOR, patch};
pub use tree::SceneTree;
pub use types::{Category, NodeId, ObjectClass, PointerHit, TreeEvent};
pub use value::{Caps, ObjectValue, Value};
