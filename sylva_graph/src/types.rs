// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene graph: node identifiers, categories, classes,
//! hits, and lifecycle events.

use kurbo::Point;

/// Identifier for a node in the scene tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On allocation, a fresh slot starts at generation `1`.
/// - On removal, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`SceneTree::is_alive`](crate::SceneTree::is_alive) to check whether a
/// `NodeId` still refers to a live node. Stale `NodeId`s never alias a
/// different live node because the generation must match, which is also what
/// makes removal idempotent: a second removal of a stale id is a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// How a node participates in the scene graph.
///
/// Object nodes live in their parent's ordered child list. Attachment nodes
/// are installed into a single named slot of their parent (for example, a
/// material attached to a mesh). Text and comment nodes exist only so the
/// reconciliation surface is complete; no work is ever performed for them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    /// Participates in the structural child-list hierarchy.
    Object,
    /// Installed into a named slot of its logical parent.
    Attachment,
    /// Accepted for interface completeness; never placed or patched.
    Text,
    /// Accepted for interface completeness; never placed or patched.
    Comment,
}

/// The constructible class of the underlying scene object.
///
/// The class is fixed at creation time and drives the factory conventions:
/// cameras register with the camera stack, materials and geometries default
/// to slot attachment, and meshes are eligible for pointer hit testing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObjectClass {
    /// A plain grouping object with no special behavior.
    Group,
    /// A renderable object; eligible for pointer hit testing.
    Mesh,
    /// A light source.
    Light,
    /// A camera; registered with the camera stack on creation.
    Camera,
    /// A material; attaches into the `"material"` slot by default.
    Material,
    /// A geometry; attaches into the `"geometry"` slot by default.
    Geometry,
}

impl ObjectClass {
    /// The conventional slot name for classes that attach rather than nest,
    /// or `None` for structural classes.
    #[must_use]
    pub const fn default_slot(self) -> Option<&'static str> {
        match self {
            Self::Material => Some("material"),
            Self::Geometry => Some("geometry"),
            Self::Group | Self::Mesh | Self::Light | Self::Camera => None,
        }
    }
}

/// The result of a ray-intersection query striking a scene object.
///
/// Hit identity is the target [`NodeId`]; two hits refer to the same object
/// exactly when their targets are equal. The geometric test producing hits is
/// external to this crate (see `sylva_pointer`).
#[derive(Clone, Debug, PartialEq)]
pub struct PointerHit {
    /// The node the ray struck.
    pub target: NodeId,
    /// Distance from the ray origin to the intersection.
    pub distance: f64,
    /// Pointer position in screen space at the time of the query.
    pub position: Point,
}

/// Lifecycle notifications emitted by the tree and drained by the caller.
///
/// These are the two observable effects the tree exposes outward: an "added"
/// notification on structural insertion, and a disposal notification when a
/// node is released. Subscribers use them to run setup hooks and to free
/// resources held by the underlying graphics objects.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TreeEvent {
    /// The node was spliced into a parent's child list.
    Added(NodeId),
    /// The node was released; its `NodeId` is now stale.
    Disposed(NodeId),
}
