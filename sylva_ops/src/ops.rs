// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node-operations facade consumed by the diffing engine.

use alloc::string::ToString;

use sylva_graph::{
    Handler, NodeId, ObjectClass, SceneNode, SceneTree, TreeEvent, Value, patch,
};
use sylva_pointer::{PointerDispatcher, Raycaster};

use crate::camera::CameraStack;
use crate::catalogue::Catalogue;
use crate::error::CreateError;

/// The reserved no-op tag. Creation yields no node; the diffing engine
/// tolerates a null creation result.
const TEMPLATE_TAG: &str = "template";

/// The framework naming prefix stripped before catalogue lookup.
const TAG_PREFIX: &str = "Sylva";

/// The adapter surface a tree-diffing engine drives.
///
/// Owns the scene tree, the type catalogue, the camera stack, and the
/// pointer dispatcher, and keeps them consistent across mutations: cameras
/// register on creation and unregister on removal, and a mesh carrying
/// pointer handlers is watched from insertion until disposal.
///
/// All entry points run synchronously on the caller's thread, in call
/// order.
pub struct NodeOps {
    tree: SceneTree,
    catalogue: Catalogue,
    cameras: CameraStack,
    dispatcher: PointerDispatcher,
    camera_notice_emitted: bool,
}

impl NodeOps {
    /// Creates the adapter around a registered catalogue.
    #[must_use]
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            tree: SceneTree::new(),
            catalogue,
            cameras: CameraStack::new(),
            dispatcher: PointerDispatcher::new(),
            camera_notice_emitted: false,
        }
    }

    /// The scene tree.
    #[must_use]
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// Mutable access to the scene tree.
    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    /// The camera stack.
    #[must_use]
    pub fn cameras(&self) -> &CameraStack {
        &self.cameras
    }

    /// The pointer dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    /// Creates a scene node for `tag`.
    ///
    /// The reserved `"template"` tag yields `Ok(None)`. Otherwise the tag,
    /// stripped of its `"Sylva"` prefix, resolves in the catalogue and the
    /// type's constructor runs with `args` (or no arguments). Cameras are
    /// pushed onto the camera stack; materials and geometries become slot
    /// attachments under their conventional slot name unless `slot`
    /// overrides it. An explicit `slot` makes any node an attachment.
    ///
    /// # Errors
    ///
    /// [`CreateError::UnknownTag`] if the catalogue has no entry for the
    /// stripped tag.
    pub fn create_node(
        &mut self,
        tag: &str,
        args: Option<&[Value]>,
        slot: Option<&str>,
    ) -> Result<Option<NodeId>, CreateError> {
        if tag == TEMPLATE_TAG {
            return Ok(None);
        }
        let name = tag.strip_prefix(TAG_PREFIX).unwrap_or(tag);
        let spec = self
            .catalogue
            .lookup(name)
            .ok_or_else(|| CreateError::UnknownTag(tag.to_string()))?;

        let object = (spec.construct)(args.unwrap_or(&[]));
        let node = match slot.or(spec.class.default_slot()) {
            Some(slot) => SceneNode::attachment(name, spec.class, object, slot),
            None => SceneNode::new(name, spec.class, object),
        };
        let id = self.tree.allocate(node);

        if spec.class == ObjectClass::Camera {
            self.cameras.push(id);
            if !self.camera_notice_emitted {
                self.camera_notice_emitted = true;
                log::warn!(
                    "camera created at the graph origin; set its position before rendering"
                );
            }
        }
        log::debug!("created '{tag}' as {:?} ({:?})", id, spec.class);
        Ok(Some(id))
    }

    /// Inserts `child` under `parent`, before `before` when given.
    ///
    /// Object children splice into the parent's child list; attachment
    /// children install into their slot. After placement, a mesh exposing
    /// at least one pointer handler is watched by the dispatcher.
    pub fn insert(&mut self, child: NodeId, parent: NodeId, before: Option<NodeId>) {
        self.tree.insert(child, parent, before);
        self.absorb_events();
    }

    /// Removes `node` and disposes its subtree.
    ///
    /// Every disposed node loses its dispatcher watch and its camera-stack
    /// entry. Removing an already-removed node is a no-op.
    pub fn remove(&mut self, node: NodeId) {
        self.tree.remove(node);
        self.absorb_events();
    }

    /// Applies a property update to `node`'s object state. `prev` is
    /// accepted for interface completeness and ignored. Unknown nodes are
    /// ignored.
    pub fn patch_prop(&mut self, node: NodeId, name: &str, prev: Option<&Value>, next: Value) {
        let _ = prev;
        if let Some(node) = self.tree.get_mut(node) {
            patch(&mut node.object, name, next);
        } else {
            log::trace!("patch of '{name}' on dead node {node:?} ignored");
        }
    }

    /// Installs a pointer handler under its `on*` event name.
    ///
    /// Returns `false` for unknown event names and dead nodes. Handlers
    /// installed after insertion take effect once the node is reinserted.
    pub fn set_handler(&mut self, node: NodeId, name: &str, handler: Handler) -> bool {
        match self.tree.get_mut(node) {
            Some(node) => node.handlers.set(name, handler),
            None => false,
        }
    }

    /// The structural parent of `node`, if it is alive and inserted.
    #[must_use]
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent_of(node)
    }

    /// The sibling following `node` in its parent's child list.
    #[must_use]
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.next_sibling(node)
    }

    /// Text nodes have no scene-graph counterpart; creation yields nothing.
    #[must_use]
    pub fn create_text(&mut self, _text: &str) -> Option<NodeId> {
        None
    }

    /// Comment nodes have no scene-graph counterpart; creation yields
    /// nothing.
    #[must_use]
    pub fn create_comment(&mut self, _text: &str) -> Option<NodeId> {
        None
    }

    /// Accepted for interface completeness; performs no work.
    pub fn set_text(&mut self, _node: Option<NodeId>, _text: &str) {}

    /// Accepted for interface completeness; performs no work.
    pub fn set_element_text(&mut self, _node: Option<NodeId>, _text: &str) {}

    /// One frame of hit testing over all watches.
    pub fn run_frame(&mut self, raycaster: &impl Raycaster) {
        self.dispatcher.run_frame(&mut self.tree, raycaster);
    }

    /// Dispatches a global click to every currently hovered watch.
    pub fn dispatch_click(&mut self) {
        self.dispatcher.dispatch_click(&mut self.tree);
    }

    /// Reacts to the tree's lifecycle events: new mesh children with
    /// handlers gain a watch, disposed nodes lose their watch and their
    /// camera-stack entry.
    fn absorb_events(&mut self) {
        for event in self.tree.take_events() {
            match event {
                TreeEvent::Added(id) => {
                    let Some(parent) = self.tree.parent_of(id) else {
                        continue;
                    };
                    let Some(node) = self.tree.get(id) else {
                        continue;
                    };
                    if node.class == ObjectClass::Mesh && node.handlers.has_any() {
                        self.dispatcher.watch(id, parent);
                    }
                }
                TreeEvent::Disposed(id) => {
                    self.dispatcher.release(id);
                    self.cameras.remove(id);
                }
            }
        }
    }
}

impl core::fmt::Debug for NodeOps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeOps")
            .field("tree", &self.tree)
            .field("cameras", &self.cameras)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use sylva_graph::{Caps, ObjectValue};
    use crate::catalogue::TypeSpec;

    fn vec3(x: f64, y: f64, z: f64) -> ObjectValue {
        ObjectValue::new("Vec3", Caps::ATOMIC_SET | Caps::SCALAR_SET)
            .with_field("x", Value::Number(x))
            .with_field("y", Value::Number(y))
            .with_field("z", Value::Number(z))
    }

    fn catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new();
        catalogue.register(TypeSpec {
            name: "Group",
            class: ObjectClass::Group,
            construct: |_| ObjectValue::new("Group", Caps::empty()),
        });
        catalogue.register(TypeSpec {
            name: "Mesh",
            class: ObjectClass::Mesh,
            construct: |_| {
                ObjectValue::new("Mesh", Caps::empty())
                    .with_field("position", Value::Object(vec3(0.0, 0.0, 0.0)))
            },
        });
        catalogue.register(TypeSpec {
            name: "PerspectiveCamera",
            class: ObjectClass::Camera,
            construct: |args| {
                let fov = args.first().and_then(Value::as_number).unwrap_or(75.0);
                ObjectValue::new("PerspectiveCamera", Caps::empty())
                    .with_field("fov", Value::Number(fov))
            },
        });
        catalogue.register(TypeSpec {
            name: "MeshBasicMaterial",
            class: ObjectClass::Material,
            construct: |_| ObjectValue::new("MeshBasicMaterial", Caps::empty()),
        });
        catalogue
    }

    fn ops() -> NodeOps {
        NodeOps::new(catalogue())
    }

    #[test]
    fn template_tag_yields_no_node() {
        let mut ops = ops();
        assert_eq!(ops.create_node("template", None, None), Ok(None));
        assert!(ops.tree().is_empty());
    }

    #[test]
    fn prefix_is_stripped_before_lookup() {
        let mut ops = ops();
        let id = ops.create_node("SylvaMesh", None, None).unwrap().unwrap();
        assert_eq!(ops.tree().get(id).unwrap().tag, "Mesh");
    }

    #[test]
    fn unknown_tags_fail() {
        let mut ops = ops();
        assert_eq!(
            ops.create_node("SylvaTeapot", None, None),
            Err(CreateError::UnknownTag("SylvaTeapot".to_string()))
        );
    }

    #[test]
    fn constructor_receives_positional_args() {
        let mut ops = ops();
        let id = ops
            .create_node("PerspectiveCamera", Some(&[Value::Number(45.0)]), None)
            .unwrap()
            .unwrap();
        assert_eq!(
            ops.tree().get(id).unwrap().object.get("fov"),
            Some(&Value::Number(45.0))
        );
    }

    #[test]
    fn cameras_register_and_unregister_with_their_node() {
        let mut ops = ops();
        let camera = ops
            .create_node("PerspectiveCamera", None, None)
            .unwrap()
            .unwrap();
        assert_eq!(ops.cameras().active(), Some(camera));

        let scene = ops.create_node("Group", None, None).unwrap().unwrap();
        ops.insert(camera, scene, None);
        ops.remove(camera);
        assert!(ops.cameras().is_empty());
    }

    #[test]
    fn materials_default_to_their_slot_and_explicit_slots_override() {
        let mut ops = ops();
        let default = ops
            .create_node("MeshBasicMaterial", None, None)
            .unwrap()
            .unwrap();
        assert_eq!(ops.tree().get(default).unwrap().slot.as_deref(), Some("material"));

        let custom = ops
            .create_node("MeshBasicMaterial", None, Some("customDepthMaterial"))
            .unwrap()
            .unwrap();
        assert_eq!(
            ops.tree().get(custom).unwrap().slot.as_deref(),
            Some("customDepthMaterial")
        );

        // An explicit slot turns a structural class into an attachment too.
        let attached_mesh = ops
            .create_node("Mesh", None, Some("proxy"))
            .unwrap()
            .unwrap();
        assert_eq!(ops.tree().get(attached_mesh).unwrap().slot.as_deref(), Some("proxy"));
    }

    #[test]
    fn inserting_a_mesh_with_handlers_registers_a_watch() {
        let mut ops = ops();
        let scene = ops.create_node("Group", None, None).unwrap().unwrap();
        let plain = ops.create_node("Mesh", None, None).unwrap().unwrap();
        let wired = ops.create_node("Mesh", None, None).unwrap().unwrap();
        assert!(ops.set_handler(wired, "onClick", Box::new(|_| {})));

        ops.insert(plain, scene, None);
        ops.insert(wired, scene, None);

        assert!(!ops.dispatcher().is_watching(plain));
        assert!(ops.dispatcher().is_watching(wired));
    }

    #[test]
    fn removal_releases_watches_of_the_whole_subtree() {
        let mut ops = ops();
        let scene = ops.create_node("Group", None, None).unwrap().unwrap();
        let group = ops.create_node("Group", None, None).unwrap().unwrap();
        let mesh = ops.create_node("Mesh", None, None).unwrap().unwrap();
        assert!(ops.set_handler(mesh, "onPointerEnter", Box::new(|_| {})));

        ops.insert(group, scene, None);
        ops.insert(mesh, group, None);
        assert!(ops.dispatcher().is_watching(mesh));

        ops.remove(group);
        assert!(!ops.dispatcher().is_watching(mesh));
        assert!(ops.dispatcher().is_empty());
    }

    #[test]
    fn patch_prop_pierces_and_ignores_dead_nodes() {
        let mut ops = ops();
        let mesh = ops.create_node("Mesh", None, None).unwrap().unwrap();
        ops.patch_prop(mesh, "position-y", None, Value::Number(2.0));
        let position = ops.tree().get(mesh).unwrap().object.get("position").unwrap();
        assert_eq!(
            position.as_object().unwrap().get("y"),
            Some(&Value::Number(2.0))
        );

        ops.remove(mesh);
        // Must not panic or resurrect anything.
        ops.patch_prop(mesh, "position-y", None, Value::Number(3.0));
    }

    #[test]
    fn unknown_handler_names_are_rejected() {
        let mut ops = ops();
        let mesh = ops.create_node("Mesh", None, None).unwrap().unwrap();
        assert!(!ops.set_handler(mesh, "onDoubleClick", Box::new(|_| {})));
    }

    #[test]
    fn text_and_comment_operations_do_nothing() {
        let mut ops = ops();
        assert_eq!(ops.create_text("hello"), None);
        assert_eq!(ops.create_comment("note"), None);
        ops.set_text(None, "hello");
        ops.set_element_text(None, "hello");
        assert!(ops.tree().is_empty());
    }

    #[test]
    fn sibling_and_parent_queries_pass_through() {
        let mut ops = ops();
        let scene = ops.create_node("Group", None, None).unwrap().unwrap();
        let a = ops.create_node("Mesh", None, None).unwrap().unwrap();
        let b = ops.create_node("Mesh", None, None).unwrap().unwrap();
        ops.insert(a, scene, None);
        ops.insert(b, scene, Some(a));

        assert_eq!(ops.parent_node(a), Some(scene));
        assert_eq!(ops.next_sibling(b), Some(a));
        assert_eq!(ops.next_sibling(a), None);
        assert_eq!(ops.parent_node(scene), None);
    }
}
