// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The arena scene tree and its structural operations.

use alloc::vec::Vec;
use core::mem;

use crate::node::{SavedSlot, SceneNode};
use crate::types::{Category, NodeId, TreeEvent};
use crate::value::Value;

#[derive(Debug)]
struct Entry {
    node: SceneNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Arena-backed scene tree.
///
/// Nodes are allocated as orphans and placed by [`insert`]; parent and child
/// relations are plain non-owning [`NodeId`]s into the arena. Freed slots go
/// onto a free list and are reused with a bumped generation, so stale ids
/// never alias a live node.
///
/// Structural mutations that do not apply (wrong categories, stale ids) are
/// silent no-ops: the reconciliation caller is trusted but must not be able
/// to crash the tree on an edge case. Creation-time failures are the
/// caller's to surface; see `sylva_ops`.
///
/// Lifecycle effects ("added", "disposed") accumulate as [`TreeEvent`]s and
/// are drained with [`take_events`] after a batch of mutations.
///
/// [`insert`]: SceneTree::insert
/// [`take_events`]: SceneTree::take_events
///
/// # Example
///
/// ```rust
/// use sylva_graph::{Caps, ObjectClass, ObjectValue, SceneNode, SceneTree, TreeEvent};
///
/// let mut tree = SceneTree::new();
/// let scene = tree.allocate(SceneNode::new(
///     "Group",
///     ObjectClass::Group,
///     ObjectValue::new("Group", Caps::empty()),
/// ));
/// let mesh = tree.allocate(SceneNode::new(
///     "Mesh",
///     ObjectClass::Mesh,
///     ObjectValue::new("Mesh", Caps::empty()),
/// ));
///
/// tree.insert(mesh, scene, None);
/// assert_eq!(tree.parent_of(mesh), Some(scene));
/// assert_eq!(tree.take_events(), vec![TreeEvent::Added(mesh)]);
///
/// tree.remove(mesh);
/// assert!(!tree.is_alive(mesh));
/// assert_eq!(tree.take_events(), vec![TreeEvent::Disposed(mesh)]);
/// ```
#[derive(Debug, Default)]
pub struct SceneTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    events: Vec<TreeEvent>,
}

impl SceneTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node as an orphan and returns its id.
    ///
    /// The node participates in nothing until [`insert`](SceneTree::insert)
    /// places it.
    pub fn allocate(&mut self, node: SceneNode) -> NodeId {
        let entry = Entry {
            node,
            parent: None,
            children: Vec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.entry = Some(entry);
            return NodeId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).expect("arena slot index overflow");
        self.slots.push(Slot {
            generation: 1,
            entry: Some(entry),
        });
        NodeId::new(idx, 1)
    }

    /// Returns `true` if the id refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.idx())
            .is_some_and(|s| s.generation == id.1 && s.entry.is_some())
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns `true` if the tree holds no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows a live node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.entry(id).map(|e| &e.node)
    }

    /// Mutably borrows a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.entry_mut(id).map(|e| &mut e.node)
    }

    /// The structural or slot parent of a node, or `None` for orphans and
    /// stale ids.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id)?.parent
    }

    /// The ordered children of a node. Empty for leaves and stale ids.
    #[must_use]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.entry(id).map_or(&[], |e| e.children.as_slice())
    }

    /// The node immediately following `id` in its parent's child list.
    ///
    /// `None` when the node has no parent, is not in the parent's child list
    /// (attachments never are), or is the last child.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        let at = siblings.iter().position(|&c| c == id)?;
        siblings.get(at + 1).copied()
    }

    /// Places `child` under `parent`.
    ///
    /// - Object under Object: splices `child` into the parent's child list
    ///   at the position of `before` (or the front when `before` is absent
    ///   or not found) and emits [`TreeEvent::Added`].
    /// - Attachment: saves the parent slot's current value on the child and
    ///   installs the child into the slot; the slot, not the child list, is
    ///   the ownership relation.
    /// - Anything else is a silent no-op.
    ///
    /// A child that already has a parent is detached from it first, so a
    /// live node is always in exactly one place.
    pub fn insert(&mut self, child: NodeId, parent: NodeId, before: Option<NodeId>) {
        if !self.is_alive(child) || !self.is_alive(parent) || child == parent {
            return;
        }
        self.detach(child);

        let child_entry = self.entry(child).expect("live child");
        let child_category = child_entry.node.category;
        let child_slot = child_entry.node.slot.clone();
        let parent_category = self.entry(parent).expect("live parent").node.category;

        match (parent_category, child_category) {
            (Category::Object, Category::Object) => {
                let parent_entry = self.entry_mut(parent).expect("live parent");
                let at = before
                    .and_then(|b| parent_entry.children.iter().position(|&c| c == b))
                    .unwrap_or(0);
                parent_entry.children.insert(at, child);
                self.entry_mut(child).expect("live child").parent = Some(parent);
                self.events.push(TreeEvent::Added(child));
            }
            (_, Category::Attachment) => {
                let Some(slot_name) = child_slot else {
                    log::debug!("attachment node without a slot name; insert ignored");
                    return;
                };
                let parent_entry = self.entry_mut(parent).expect("live parent");
                let saved = match parent_entry.node.object.get(&slot_name) {
                    Some(value) => SavedSlot::Value(value.clone()),
                    None => SavedSlot::Absent,
                };
                parent_entry
                    .node
                    .object
                    .set_field(&slot_name, Value::Node(child));
                let child_entry = self.entry_mut(child).expect("live child");
                child_entry.node.saved_slot = Some(saved);
                child_entry.parent = Some(parent);
            }
            _ => {
                log::debug!("insert with incompatible categories ignored");
            }
        }
    }

    /// Removes a node: detaches it from its parent (restoring a slot's
    /// previous value for attachments), then disposes it and every
    /// descendant exactly once, emitting [`TreeEvent::Disposed`] per node.
    ///
    /// Removing a stale id is a no-op, which makes disposal idempotent.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        self.detach(id);

        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let Some(entry) = self.take_entry(current) else {
                continue;
            };
            // Reversed so disposal events come out in document order.
            stack.extend(entry.children.iter().rev());
            self.events.push(TreeEvent::Disposed(current));
        }
    }

    /// Drains the lifecycle events accumulated since the last drain.
    pub fn take_events(&mut self) -> Vec<TreeEvent> {
        mem::take(&mut self.events)
    }

    /// Unlinks `id` from its parent without disposing it.
    ///
    /// For a structural child this removes it from the parent's child list;
    /// for an attachment this restores the parent's slot to the value saved
    /// at attach time (removing the slot again if it was absent) and erases
    /// the saved value from the node being detached.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };

        let child_entry = self.entry_mut(id).expect("live child");
        let category = child_entry.node.category;
        let slot_name = child_entry.node.slot.clone();
        let saved = child_entry.node.saved_slot.take();
        child_entry.parent = None;

        if !self.is_alive(parent) {
            return;
        }
        match category {
            Category::Object => {
                let parent_entry = self.entry_mut(parent).expect("live parent");
                parent_entry.children.retain(|&c| c != id);
            }
            Category::Attachment => {
                let (Some(slot_name), Some(saved)) = (slot_name, saved) else {
                    return;
                };
                let parent_entry = self.entry_mut(parent).expect("live parent");
                match saved {
                    SavedSlot::Value(value) => {
                        parent_entry.node.object.set_field(&slot_name, value);
                    }
                    SavedSlot::Absent => {
                        parent_entry.node.object.remove_field(&slot_name);
                    }
                }
            }
            Category::Text | Category::Comment => {}
        }
    }

    fn entry(&self, id: NodeId) -> Option<&Entry> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_mut()
    }

    fn take_entry(&mut self, id: NodeId) -> Option<Entry> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        let entry = slot.entry.take()?;
        self.free.push(id.0);
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectClass;
    use crate::value::{Caps, ObjectValue};
    use alloc::string::String;
    use alloc::vec;

    fn object(tree: &mut SceneTree, tag: &str) -> NodeId {
        tree.allocate(SceneNode::new(
            String::from(tag),
            ObjectClass::Group,
            ObjectValue::new("Group", Caps::empty()),
        ))
    }

    fn mesh(tree: &mut SceneTree) -> NodeId {
        tree.allocate(SceneNode::new(
            "Mesh",
            ObjectClass::Mesh,
            ObjectValue::new("Mesh", Caps::empty()),
        ))
    }

    fn material(tree: &mut SceneTree) -> NodeId {
        tree.allocate(SceneNode::attachment(
            "MeshBasicMaterial",
            ObjectClass::Material,
            ObjectValue::new("MeshBasicMaterial", Caps::empty()),
            "material",
        ))
    }

    #[test]
    fn insert_without_before_splices_at_front() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let a = object(&mut tree, "a");
        let b = object(&mut tree, "b");

        tree.insert(a, root, None);
        tree.insert(b, root, None);

        assert_eq!(tree.children_of(root), &[b, a]);
    }

    #[test]
    fn insert_before_sibling_splices_at_its_position() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let a = object(&mut tree, "a");
        let b = object(&mut tree, "b");
        let c = object(&mut tree, "c");

        tree.insert(a, root, None);
        tree.insert(b, root, None); // [b, a]
        tree.insert(c, root, Some(a)); // before a -> [b, c, a]

        assert_eq!(tree.children_of(root), &[b, c, a]);
        assert_eq!(tree.parent_of(c), Some(root));
    }

    #[test]
    fn insert_with_unknown_before_falls_back_to_front() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let a = object(&mut tree, "a");
        let stranger = object(&mut tree, "stranger");
        let b = object(&mut tree, "b");

        tree.insert(a, root, None);
        tree.insert(b, root, Some(stranger));

        assert_eq!(tree.children_of(root), &[b, a]);
    }

    #[test]
    fn insert_emits_added_event_for_structural_children_only() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let child = object(&mut tree, "child");
        let mesh = mesh(&mut tree);
        let mat = material(&mut tree);

        tree.insert(child, root, None);
        tree.insert(mesh, root, None);
        tree.insert(mat, mesh, None);

        assert_eq!(
            tree.take_events(),
            vec![TreeEvent::Added(child), TreeEvent::Added(mesh)]
        );
    }

    #[test]
    fn reinserting_a_parented_child_detaches_it_first() {
        let mut tree = SceneTree::new();
        let first = object(&mut tree, "first");
        let second = object(&mut tree, "second");
        let child = object(&mut tree, "child");

        tree.insert(child, first, None);
        tree.insert(child, second, None);

        assert!(tree.children_of(first).is_empty());
        assert_eq!(tree.children_of(second), &[child]);
        assert_eq!(tree.parent_of(child), Some(second));
    }

    #[test]
    fn attachment_installs_into_slot_and_saves_previous_value() {
        let mut tree = SceneTree::new();
        let mesh = mesh(&mut tree);
        let mat = material(&mut tree);

        tree.get_mut(mesh)
            .unwrap()
            .object
            .set_field("material", Value::Text(String::from("default")));

        tree.insert(mat, mesh, None);
        assert_eq!(
            tree.get(mesh).unwrap().object.get("material"),
            Some(&Value::Node(mat))
        );
        // The slot, not the child list, carries the relation.
        assert!(tree.children_of(mesh).is_empty());
        assert_eq!(tree.parent_of(mat), Some(mesh));

        tree.remove(mat);
        assert_eq!(
            tree.get(mesh).unwrap().object.get("material"),
            Some(&Value::Text(String::from("default")))
        );
    }

    #[test]
    fn detaching_an_attachment_removes_a_previously_absent_slot() {
        let mut tree = SceneTree::new();
        let mesh = mesh(&mut tree);
        let mat = material(&mut tree);

        tree.insert(mat, mesh, None);
        assert!(tree.get(mesh).unwrap().object.contains("material"));

        tree.remove(mat);
        assert!(!tree.get(mesh).unwrap().object.contains("material"));
    }

    #[test]
    fn next_sibling_walks_the_child_list() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let a = object(&mut tree, "a");
        let b = object(&mut tree, "b");

        tree.insert(a, root, None);
        tree.insert(b, root, Some(a)); // [b, a]

        assert_eq!(tree.next_sibling(b), Some(a));
        assert_eq!(tree.next_sibling(a), None); // last child
        assert_eq!(tree.next_sibling(root), None); // no parent
    }

    #[test]
    fn next_sibling_of_attachment_is_none() {
        let mut tree = SceneTree::new();
        let mesh = mesh(&mut tree);
        let mat = material(&mut tree);
        tree.insert(mat, mesh, None);

        assert_eq!(tree.next_sibling(mat), None);
    }

    #[test]
    fn remove_disposes_descendants_exactly_once() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let branch = object(&mut tree, "branch");
        let leaf_a = object(&mut tree, "leaf_a");
        let leaf_b = object(&mut tree, "leaf_b");

        tree.insert(branch, root, None);
        tree.insert(leaf_b, branch, None);
        tree.insert(leaf_a, branch, None); // [leaf_a, leaf_b]
        let _ = tree.take_events();

        tree.remove(branch);

        assert_eq!(
            tree.take_events(),
            vec![
                TreeEvent::Disposed(branch),
                TreeEvent::Disposed(leaf_a),
                TreeEvent::Disposed(leaf_b),
            ]
        );
        assert!(!tree.is_alive(branch));
        assert!(!tree.is_alive(leaf_a));
        assert!(!tree.is_alive(leaf_b));
        assert!(tree.children_of(root).is_empty());
    }

    #[test]
    fn remove_twice_is_a_no_op() {
        let mut tree = SceneTree::new();
        let root = object(&mut tree, "root");
        let child = object(&mut tree, "child");
        tree.insert(child, root, None);
        let _ = tree.take_events();

        tree.remove(child);
        assert_eq!(tree.take_events(), vec![TreeEvent::Disposed(child)]);

        tree.remove(child);
        assert!(tree.take_events().is_empty());
    }

    #[test]
    fn freed_slots_are_reused_with_a_new_generation() {
        let mut tree = SceneTree::new();
        let first = object(&mut tree, "first");
        tree.remove(first);

        let second = object(&mut tree, "second");
        assert_eq!(first.idx(), second.idx());
        assert_ne!(first, second);
        assert!(!tree.is_alive(first));
        assert!(tree.is_alive(second));
        assert!(tree.get(first).is_none());
    }

    #[test]
    fn mismatched_categories_are_a_silent_no_op() {
        let mut tree = SceneTree::new();
        let mesh = mesh(&mut tree);
        let mat = material(&mut tree);

        // An Object child under an Attachment parent fits neither branch.
        tree.insert(mesh, mat, None);
        assert_eq!(tree.parent_of(mesh), None);
        assert!(tree.children_of(mat).is_empty());
        assert!(tree.take_events().is_empty());
    }

    #[test]
    fn orphan_queries_return_nothing() {
        let mut tree = SceneTree::new();
        let lonely = object(&mut tree, "lonely");
        assert_eq!(tree.parent_of(lonely), None);
        assert_eq!(tree.next_sibling(lonely), None);
        assert!(tree.children_of(lonely).is_empty());
    }
}
