// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node capabilities and the ancestor walk built on them.
//!
//! The host owns the tree. It exposes the parent chain and each node's
//! capability set through [`FocusHierarchy`]; [`visit_ancestors`] walks that
//! chain outward, filtered by a capability mask, until the visitor breaks.

use core::ops::ControlFlow;

use crate::properties::FocusPropertiesProvider;

bitflags::bitflags! {
    /// Focus-related capabilities a node in the host tree can have.
    ///
    /// A single node may carry several capabilities; for example, a
    /// container that both listens for focus events and overrides its
    /// children's focus properties.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeCapabilities: u8 {
        /// Node is a focus target and runs its own aggregation for the
        /// subtree above it.
        const FOCUS_TARGET         = 0b0000_0001;
        /// Node overrides descendants' focus properties; see
        /// [`FocusHierarchy::properties_provider`].
        const FOCUS_PROPERTIES     = 0b0000_0010;
        /// Node wants to be notified when a descendant's focus state changes.
        const FOCUS_EVENT          = 0b0000_0100;
        /// Node can lay out content beyond its visible bounds.
        const BEYOND_BOUNDS_LAYOUT = 0b0000_1000;
    }
}

impl Default for NodeCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

/// Read-only view of the host tree, as seen by focus targets.
///
/// Nodes are identified by a small copyable key. Implementations must
/// describe an acyclic parent chain; the walk follows `parent` until it
/// returns `None`.
pub trait FocusHierarchy<K> {
    /// Returns the parent of `node`, or `None` at the root.
    fn parent(&self, node: K) -> Option<K>;

    /// Returns the capabilities of `node`.
    fn capabilities(&self, node: K) -> NodeCapabilities;

    /// Returns the properties provider of `node`.
    ///
    /// Must return `Some` for every node whose capabilities contain
    /// [`NodeCapabilities::FOCUS_PROPERTIES`].
    fn properties_provider(&self, node: K) -> Option<&dyn FocusPropertiesProvider<K>>;
}

impl<K, H> FocusHierarchy<K> for &H
where
    H: FocusHierarchy<K> + ?Sized,
{
    #[inline]
    fn parent(&self, node: K) -> Option<K> {
        (**self).parent(node)
    }

    #[inline]
    fn capabilities(&self, node: K) -> NodeCapabilities {
        (**self).capabilities(node)
    }

    #[inline]
    fn properties_provider(&self, node: K) -> Option<&dyn FocusPropertiesProvider<K>> {
        (**self).properties_provider(node)
    }
}

/// Walks the strict ancestors of `node`, nearest first.
///
/// Only ancestors whose capabilities intersect `mask` are passed to
/// `visitor`, together with their full capability set. The walk stops when
/// the visitor returns [`ControlFlow::Break`], whose value is returned, or
/// when the root has been passed.
///
/// ```
/// use core::ops::ControlFlow;
/// use understory_focus_target::{
///     FocusHierarchy, FocusPropertiesProvider, NodeCapabilities, visit_ancestors,
/// };
///
/// // A chain 0 <- 1 <- 2 <- 3 where node 1 is a focus target.
/// struct Chain;
/// impl FocusHierarchy<u32> for Chain {
///     fn parent(&self, node: u32) -> Option<u32> {
///         node.checked_sub(1)
///     }
///     fn capabilities(&self, node: u32) -> NodeCapabilities {
///         if node == 1 { NodeCapabilities::FOCUS_TARGET } else { NodeCapabilities::FOCUS_EVENT }
///     }
///     fn properties_provider(&self, _: u32) -> Option<&dyn FocusPropertiesProvider<u32>> {
///         None
///     }
/// }
///
/// let mut seen = Vec::new();
/// let stopped_at = visit_ancestors(&Chain, 3, NodeCapabilities::all(), |node, caps| {
///     if caps.contains(NodeCapabilities::FOCUS_TARGET) {
///         return ControlFlow::Break(node);
///     }
///     seen.push(node);
///     ControlFlow::Continue(())
/// });
/// assert_eq!(seen, [2]);
/// assert_eq!(stopped_at, ControlFlow::Break(1));
/// ```
pub fn visit_ancestors<K, H, B, F>(
    hierarchy: &H,
    node: K,
    mask: NodeCapabilities,
    mut visitor: F,
) -> ControlFlow<B>
where
    K: Copy,
    H: FocusHierarchy<K> + ?Sized,
    F: FnMut(K, NodeCapabilities) -> ControlFlow<B>,
{
    let mut current = hierarchy.parent(node);
    while let Some(ancestor) = current {
        let capabilities = hierarchy.capabilities(ancestor);
        if capabilities.intersects(mask) {
            visitor(ancestor, capabilities)?;
        }
        current = hierarchy.parent(ancestor);
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Linear chain `0 <- 1 <- ... <- n`, each node with its own capabilities.
    struct Chain(Vec<NodeCapabilities>);

    impl FocusHierarchy<usize> for Chain {
        fn parent(&self, node: usize) -> Option<usize> {
            node.checked_sub(1)
        }

        fn capabilities(&self, node: usize) -> NodeCapabilities {
            self.0[node]
        }

        fn properties_provider(&self, _: usize) -> Option<&dyn FocusPropertiesProvider<usize>> {
            None
        }
    }

    #[test]
    fn walk_skips_self_and_filters_by_mask() {
        let chain = Chain(Vec::from([
            NodeCapabilities::FOCUS_EVENT,
            NodeCapabilities::empty(),
            NodeCapabilities::FOCUS_PROPERTIES,
            NodeCapabilities::FOCUS_EVENT,
        ]));
        let mut seen = Vec::new();
        let flow: ControlFlow<()> =
            visit_ancestors(&chain, 3, NodeCapabilities::FOCUS_EVENT, |node, _| {
                seen.push(node);
                ControlFlow::Continue(())
            });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen, [0]);
    }

    #[test]
    fn walk_is_nearest_first_and_stops_on_break() {
        let chain = Chain(Vec::from([NodeCapabilities::FOCUS_EVENT; 5]));
        let mut seen = Vec::new();
        let flow = visit_ancestors(&chain, 4, NodeCapabilities::FOCUS_EVENT, |node, _| {
            seen.push(node);
            if node == 2 {
                ControlFlow::Break("stopped")
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break("stopped"));
        assert_eq!(seen, [3, 2]);
    }

    #[test]
    fn root_has_no_ancestors() {
        let chain = Chain(Vec::from([NodeCapabilities::all()]));
        let flow: ControlFlow<()> =
            visit_ancestors(&chain, 0, NodeCapabilities::all(), |_, _| {
                panic!("root has no ancestors to visit")
            });
        assert_eq!(flow, ControlFlow::Continue(()));
    }
}
