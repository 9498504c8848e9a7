// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-construction hook for attaching focus targets to elements.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::node::FocusTargetNode;

/// Declarative description of a focus target, as seen by the tree layer.
///
/// The element carries no configuration, so every instance is equal and
/// hashes the same; a diffing layer comparing two of them always reuses the
/// existing node, and [`update`](Self::update) leaves it untouched.
///
/// ```
/// use understory_focus_target::{FocusState, FocusTargetElement};
///
/// let element = FocusTargetElement;
/// let mut node = element.create(5_u32);
/// node.set_focus_state(FocusState::Active);
///
/// let updated = element.update(&mut node);
/// assert_eq!(updated.key(), 5);
/// assert_eq!(updated.focus_state(), FocusState::Active);
/// assert_eq!(element.inspector_name(), "focusTarget");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusTargetElement;

impl FocusTargetElement {
    /// Stable identity of the element, also used as its inspector name.
    pub const NAME: &'static str = "focusTarget";

    /// Creates the node attached to the element `key`.
    #[must_use]
    pub fn create<K>(&self, key: K) -> FocusTargetNode<K>
    where
        K: Copy + Eq + fmt::Debug,
    {
        FocusTargetNode::new(key)
    }

    /// Reconciles an existing node on re-render.
    ///
    /// There is nothing to reconcile; the same node is returned unchanged.
    pub fn update<'a, K>(&self, node: &'a mut FocusTargetNode<K>) -> &'a mut FocusTargetNode<K>
    where
        K: Copy + Eq,
    {
        node
    }

    /// Name shown for this element in inspection tools.
    #[must_use]
    pub const fn inspector_name(&self) -> &'static str {
        Self::NAME
    }
}

impl Hash for FocusTargetElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::NAME.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::BuildHasher;

    use hashbrown::DefaultHashBuilder;

    #[test]
    fn all_elements_share_identity() {
        let hasher = DefaultHashBuilder::default();
        let a = FocusTargetElement;
        let b = FocusTargetElement;
        assert_eq!(a, b);
        assert_eq!(hasher.hash_one(a), hasher.hash_one(b));
        assert_eq!(hasher.hash_one(a), hasher.hash_one(FocusTargetElement::NAME));
    }

    #[test]
    fn update_returns_the_same_node() {
        let mut node = FocusTargetElement.create(1_u32);
        let before: *const FocusTargetNode<u32> = &node;
        let after: *const FocusTargetNode<u32> = FocusTargetElement.update(&mut node);
        assert!(core::ptr::eq(before, after));
    }
}
