// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type catalogue.
//!
//! This module provides [`Catalogue`] for registering constructible scene
//! object types and resolving stripped tag names against them.

use hashbrown::HashMap;
use sylva_graph::{ObjectClass, ObjectValue, Value};

/// A constructor for an object type.
///
/// Receives the positional creation arguments, which may be empty for the
/// no-argument form. Extra arguments beyond what the type consumes are
/// ignored.
pub type Construct = fn(args: &[Value]) -> ObjectValue;

/// A registration entry for a constructible object type.
#[derive(Copy, Clone)]
pub struct TypeSpec {
    /// The type's name, matched against stripped tags.
    pub name: &'static str,
    /// The class driving factory conventions for instances.
    pub class: ObjectClass,
    /// The constructor invoked at creation time.
    pub construct: Construct,
}

impl core::fmt::Debug for TypeSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeSpec")
            .field("name", &self.name)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// A catalogue of constructible object types, keyed by name.
///
/// Types are registered once at startup; the node factory resolves tags
/// against the catalogue after stripping the framework naming prefix.
///
/// # Example
///
/// ```rust
/// use sylva_graph::{Caps, ObjectClass, ObjectValue};
/// use sylva_ops::{Catalogue, TypeSpec};
///
/// let mut catalogue = Catalogue::new();
/// catalogue.register(TypeSpec {
///     name: "Group",
///     class: ObjectClass::Group,
///     construct: |_| ObjectValue::new("Group", Caps::empty()),
/// });
///
/// assert!(catalogue.lookup("Group").is_some());
/// assert!(catalogue.lookup("Gruop").is_none());
/// ```
#[derive(Default)]
pub struct Catalogue {
    types: HashMap<&'static str, TypeSpec>,
}

impl Catalogue {
    /// Creates a new empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object type.
    ///
    /// # Panics
    ///
    /// Panics if a type with the same name is already registered.
    pub fn register(&mut self, spec: TypeSpec) {
        assert!(
            !self.types.contains_key(spec.name),
            "type '{}' is already registered",
            spec.name
        );
        self.types.insert(spec.name, spec);
    }

    /// Looks up a type by its stripped name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&TypeSpec> {
        self.types.get(name)
    }

    /// Returns the number of registered types.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl core::fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalogue")
            .field("types", &self.types.len())
            .finish()
    }
}
