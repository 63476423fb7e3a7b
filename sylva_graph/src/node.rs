// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node data: the scene node record and its pointer-event handlers.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::types::{Category, ObjectClass, PointerHit};
use crate::value::{ObjectValue, Value};

/// A pointer-event callback invoked with the hit that triggered it.
pub type Handler = Box<dyn FnMut(&PointerHit)>;

/// The pointer-event callbacks a node exposes.
///
/// Slots are explicit rather than discovered by probing; the `on*` naming
/// convention of the declarative caller survives only at the [`set`]
/// boundary. A node with at least one handler set is eligible for hit-test
/// registration when inserted.
///
/// [`set`]: PointerHandlers::set
#[derive(Default)]
pub struct PointerHandlers {
    /// Fired when the pointer starts hitting the node.
    pub enter: Option<Handler>,
    /// Fired every frame while the pointer keeps hitting the node.
    pub motion: Option<Handler>,
    /// Fired when the pointer stops hitting the node.
    pub leave: Option<Handler>,
    /// Fired on a global click while the node is the current hit.
    pub click: Option<Handler>,
}

impl PointerHandlers {
    /// Installs a handler under its conventional `on*` name.
    ///
    /// Recognized names are `onPointerEnter`, `onPointerMove`,
    /// `onPointerLeave`, and `onClick`. Returns `false` (dropping the
    /// handler) for anything else.
    pub fn set(&mut self, name: &str, handler: Handler) -> bool {
        let slot = match name {
            "onPointerEnter" => &mut self.enter,
            "onPointerMove" => &mut self.motion,
            "onPointerLeave" => &mut self.leave,
            "onClick" => &mut self.click,
            _ => return false,
        };
        *slot = Some(handler);
        true
    }

    /// Returns `true` if any handler is set.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.enter.is_some() || self.motion.is_some() || self.leave.is_some() || self.click.is_some()
    }
}

impl fmt::Debug for PointerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHandlers")
            .field("enter", &self.enter.is_some())
            .field("motion", &self.motion.is_some())
            .field("leave", &self.leave.is_some())
            .field("click", &self.click.is_some())
            .finish()
    }
}

/// Saved value of a parent slot while an attachment occupies it.
///
/// Distinguishing a previously absent slot from one that held a value keeps
/// the attach/detach round trip exact: detaching restores the old value, or
/// removes the slot again if there was none.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SavedSlot {
    Value(Value),
    Absent,
}

/// A node of the scene graph.
///
/// The node owns the mutable state of the underlying scene object (its
/// [`ObjectValue`]) and its pointer handlers. Structural position (parent,
/// children) lives in the [`SceneTree`](crate::SceneTree) arena, keyed by
/// non-owning [`NodeId`](crate::NodeId)s.
pub struct SceneNode {
    /// The resolved type name, e.g. `"Mesh"`.
    pub tag: String,
    /// How the node participates in the graph.
    pub category: Category,
    /// The constructible class of the underlying object.
    pub class: ObjectClass,
    /// The underlying object's mutable property state.
    pub object: ObjectValue,
    /// For attachments, the parent slot this node installs into.
    pub slot: Option<String>,
    /// The parent slot's prior value, held while attached.
    pub(crate) saved_slot: Option<SavedSlot>,
    /// Pointer-event callbacks.
    pub handlers: PointerHandlers,
}

impl SceneNode {
    /// Creates an Object-category node.
    #[must_use]
    pub fn new(tag: impl Into<String>, class: ObjectClass, object: ObjectValue) -> Self {
        Self {
            tag: tag.into(),
            category: Category::Object,
            class,
            object,
            slot: None,
            saved_slot: None,
            handlers: PointerHandlers::default(),
        }
    }

    /// Creates an Attachment-category node installing into the given slot.
    #[must_use]
    pub fn attachment(
        tag: impl Into<String>,
        class: ObjectClass,
        object: ObjectValue,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            category: Category::Attachment,
            class,
            object,
            slot: Some(slot.into()),
            saved_slot: None,
            handlers: PointerHandlers::default(),
        }
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("tag", &self.tag)
            .field("category", &self.category)
            .field("class", &self.class)
            .field("slot", &self.slot)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Caps;

    #[test]
    fn handler_names_follow_the_on_convention() {
        let mut handlers = PointerHandlers::default();
        assert!(!handlers.has_any());

        assert!(handlers.set("onClick", Box::new(|_| {})));
        assert!(handlers.set("onPointerEnter", Box::new(|_| {})));
        assert!(handlers.set("onPointerMove", Box::new(|_| {})));
        assert!(handlers.set("onPointerLeave", Box::new(|_| {})));
        assert!(handlers.has_any());

        assert!(!handlers.set("onWheel", Box::new(|_| {})));
        assert!(!handlers.set("click", Box::new(|_| {})));
    }

    #[test]
    fn attachment_constructor_records_slot_and_category() {
        let node = SceneNode::attachment(
            "MeshBasicMaterial",
            ObjectClass::Material,
            ObjectValue::new("MeshBasicMaterial", Caps::empty()),
            "material",
        );
        assert_eq!(node.category, Category::Attachment);
        assert_eq!(node.slot.as_deref(), Some("material"));
        assert!(node.saved_slot.is_none());
    }
}
