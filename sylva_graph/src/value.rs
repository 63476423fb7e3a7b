// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamically typed property values with explicit per-object capabilities.
//!
//! The reconciliation caller hands us already-typed values; no string
//! coercion happens here. Structured objects ([`ObjectValue`]) carry a kind
//! tag and a capability set ([`Caps`]) fixed at construction time, so the
//! patcher selects an assignment strategy without probing for methods.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::NodeId;

bitflags::bitflags! {
    /// Capabilities of a structured object, resolved when it is constructed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Caps: u8 {
        /// The object accepts atomic positional assignment of its components.
        const ATOMIC_SET = 0b0000_0001;
        /// The object accepts a uniform scalar broadcast to all components.
        const SCALAR_SET = 0b0000_0010;
        /// The object is color-like; scalar broadcast does not apply and a
        /// single number assigns a packed `0xRRGGBB` value.
        const COLOR_LIKE = 0b0000_0100;
    }
}

/// A dynamically typed property value on a scene object.
///
/// Values are plain data: they clone and compare structurally. Pointer-event
/// callbacks are deliberately not values; they install through a typed entry
/// point instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. The caller is responsible for having parsed it already.
    Number(f64),
    /// A string.
    Text(String),
    /// An ordered sequence, spread positionally by the patcher.
    List(Vec<Value>),
    /// A structured object with named components.
    Object(ObjectValue),
    /// A reference to a scene node installed into a slot.
    Node(NodeId),
}

impl Value {
    /// Returns the contained number, if this is a [`Value::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained object, if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable variant of [`Value::as_object`].
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectValue> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// A structured object value: a kind tag, capabilities, and ordered named
/// components.
///
/// Field order is declaration order and doubles as the positional order for
/// atomic assignment, so a three-component vector constructed as `x, y, z`
/// spreads a `[1, 2, 3]` list into those components in that order.
///
/// # Example
///
/// ```rust
/// use sylva_graph::{Caps, ObjectValue, Value};
///
/// let mut v = ObjectValue::new("Vec3", Caps::ATOMIC_SET | Caps::SCALAR_SET)
///     .with_field("x", Value::Number(0.0))
///     .with_field("y", Value::Number(0.0))
///     .with_field("z", Value::Number(0.0));
///
/// v.apply_positional(&[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
/// assert_eq!(v.get("y"), Some(&Value::Number(2.0)));
///
/// v.apply_scalar(5.0);
/// assert_eq!(v.get("x"), Some(&Value::Number(5.0)));
/// assert_eq!(v.get("z"), Some(&Value::Number(5.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    kind: &'static str,
    caps: Caps,
    fields: Vec<(String, Value)>,
}

impl ObjectValue {
    /// Creates an empty object of the given kind with the given capabilities.
    #[must_use]
    pub fn new(kind: &'static str, caps: Caps) -> Self {
        Self {
            kind,
            caps,
            fields: Vec::new(),
        }
    }

    /// Builder-style field append, preserving declaration order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set_field(&name.into(), value);
        self
    }

    /// The kind tag. Two objects are structurally compatible when their
    /// kinds are equal.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The capability set fixed at construction.
    #[must_use]
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Looks up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Mutable variant of [`ObjectValue::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Plain assignment: replaces the named component or appends it.
    pub fn set_field(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
        } else {
            self.fields.push((String::from(name), value));
        }
    }

    /// Removes the named component, returning its value if present.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    /// Returns `true` if the named component exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates components in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Atomic positional assignment: the arguments replace the leading
    /// components in declaration order. Extra arguments beyond the declared
    /// components are ignored.
    pub fn apply_positional(&mut self, args: &[Value]) {
        for (slot, arg) in self.fields.iter_mut().zip(args) {
            slot.1 = arg.clone();
        }
    }

    /// Uniform scalar broadcast: every component becomes the given number.
    pub fn apply_scalar(&mut self, n: f64) {
        for slot in &mut self.fields {
            slot.1 = Value::Number(n);
        }
    }

    /// Structural copy from another object of the same kind. Value
    /// semantics: components are cloned, never aliased.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.kind, other.kind, "structural copy across kinds");
        self.fields = other.fields.clone();
    }

    /// Single-argument atomic assignment.
    ///
    /// Color-like objects unpack a packed `0xRRGGBB` number into their first
    /// three components, normalized to `0.0..=1.0`. Any other object assigns
    /// the value to its first component.
    pub fn apply_single(&mut self, value: Value) {
        if self.caps.contains(Caps::COLOR_LIKE)
            && let Some(n) = value.as_number()
        {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "packed colors fit in 24 bits"
            )]
            let packed = n as u32;
            let rgb = [
                f64::from((packed >> 16) & 0xFF) / 255.0,
                f64::from((packed >> 8) & 0xFF) / 255.0,
                f64::from(packed & 0xFF) / 255.0,
            ];
            for (slot, channel) in self.fields.iter_mut().zip(rgb) {
                slot.1 = Value::Number(channel);
            }
            return;
        }
        if let Some(slot) = self.fields.first_mut() {
            slot.1 = value;
        }
    }
}
