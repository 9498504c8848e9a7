// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors found while walking ancestors.

use core::fmt;

use crate::capability::NodeCapabilities;

/// An ancestor advertises a capability it does not actually provide.
///
/// This indicates a bug in the host's [`FocusHierarchy`](crate::FocusHierarchy)
/// implementation. The `try_*` walks on
/// [`FocusTargetNode`](crate::FocusTargetNode) return it; the plain walks
/// panic with its message.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityError<K> {
    /// The ancestor whose capabilities are inconsistent.
    pub node: K,
    /// The capability that was advertised but missing.
    pub capability: NodeCapabilities,
}

impl<K: fmt::Debug> fmt::Debug for CapabilityError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CapabilityError {{ node: {:?}, capability: {:?} }}",
            self.node, self.capability
        )
    }
}

impl<K: fmt::Debug> fmt::Display for CapabilityError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {:?} advertises {:?} but does not implement it",
            self.node, self.capability
        )
    }
}

impl<K: fmt::Debug> core::error::Error for CapabilityError<K> {}
