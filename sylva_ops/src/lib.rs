// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Ops: the node-operations adapter a tree-diffing engine drives.
//!
//! This crate is the outward face of the Sylva reconciliation backend. An
//! external diffing engine emits create/insert/remove/patch operations
//! against [`NodeOps`]; this crate resolves tags through a [`Catalogue`],
//! applies the mutations to the `sylva_graph` scene tree, and keeps the
//! [`CameraStack`] and the `sylva_pointer` dispatcher consistent with the
//! tree as nodes come and go.
//!
//! ```rust
//! use sylva_graph::{Caps, ObjectClass, ObjectValue, Value};
//! use sylva_ops::{Catalogue, NodeOps, TypeSpec};
//!
//! let mut catalogue = Catalogue::new();
//! catalogue.register(TypeSpec {
//!     name: "Group",
//!     class: ObjectClass::Group,
//!     construct: |_| ObjectValue::new("Group", Caps::empty()),
//! });
//! catalogue.register(TypeSpec {
//!     name: "Mesh",
//!     class: ObjectClass::Mesh,
//!     construct: |_| ObjectValue::new("Mesh", Caps::empty()),
//! });
//!
//! let mut ops = NodeOps::new(catalogue);
//! let scene = ops.create_node("SylvaGroup", None, None)?.unwrap();
//! let mesh = ops.create_node("SylvaMesh", None, None)?.unwrap();
//! ops.insert(mesh, scene, None);
//!
//! assert_eq!(ops.parent_node(mesh), Some(scene));
//! # Ok::<(), sylva_ops::CreateError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod catalogue;
mod error;
mod ops;

pub use camera::CameraStack;
pub use catalogue::{Catalogue, Construct, TypeSpec};
pub use error::CreateError;
pub use ops::NodeOps;
