// Copyright 2026 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the node factory.

use alloc::string::String;
use core::fmt;

/// Failure to create a scene node.
///
/// Structural mismatches elsewhere in the adapter are defensive no-ops;
/// creation is the one operation whose failure the diffing engine must see,
/// since it cannot insert an object that never existed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CreateError {
    /// The tag, after prefix stripping, matched no catalogue entry.
    UnknownTag(String),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag(tag) => write!(f, "unknown tag '{tag}': no catalogue entry"),
        }
    }
}

impl core::error::Error for CreateError {}
