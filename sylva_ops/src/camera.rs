// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera stack.

use alloc::vec::Vec;

use sylva_graph::NodeId;

/// Registered cameras, most recently created on top.
///
/// The node factory pushes every camera-class node it creates; removal of a
/// camera node drops it from the stack again. The active camera is the top
/// of the stack, so a newly created camera takes over until it is removed.
#[derive(Debug, Default)]
pub struct CameraStack {
    stack: Vec<NodeId>,
}

impl CameraStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a camera node on top of the stack.
    pub fn push(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    /// Drops a camera from the stack. A node that was never registered is
    /// ignored.
    pub fn remove(&mut self, id: NodeId) {
        self.stack.retain(|&c| c != id);
    }

    /// The active camera: the most recently registered one still present.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// All registered cameras, oldest first.
    #[must_use]
    pub fn cameras(&self) -> &[NodeId] {
        &self.stack
    }

    /// Returns `true` if no cameras are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
