// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus target node: focus state, property aggregation, custom
//! navigation, and listener invalidation.
//!
//! ## Reentrancy
//!
//! Every operation takes `&self`. Property providers and custom enter/exit
//! callbacks run inline and may call back into the same node, so all
//! mutable state lives in [`Cell`]s. Nodes are therefore `!Sync` and belong
//! to the thread that owns the UI tree.
//!
//! ## Ownership of the focus state
//!
//! A node only writes its own state in one place: resetting an
//! [`ActiveParent`](FocusState::ActiveParent) node to
//! [`Inactive`](FocusState::Inactive). Every other transition is made by
//! the [`FocusOwner`] through [`FocusTargetNode::set_focus_state`]; nodes
//! merely ask the owner to clear focus.

use core::cell::Cell;
use core::fmt;
use core::ops::ControlFlow;

use crate::capability::{FocusHierarchy, NodeCapabilities, visit_ancestors};
use crate::direction::FocusDirection;
use crate::error::CapabilityError;
use crate::owner::FocusOwner;
use crate::properties::FocusProperties;
use crate::requester::FocusRequester;
use crate::state::FocusState;
use crate::tracking::ReadTracker;

/// Per-element focus state machine.
///
/// Created by [`FocusTargetElement::create`](crate::FocusTargetElement::create)
/// when an element enters the tree, reset with [`on_reset`](Self::on_reset)
/// when the element is detached or recycled, and dropped by the host when the
/// element leaves for good.
///
/// ```
/// use understory_focus_target::{
///     Detached, FocusHierarchy, FocusPropertiesProvider, FocusState, FocusTargetElement,
///     NodeCapabilities,
/// };
///
/// // A host with a single root node.
/// struct Root;
/// impl FocusHierarchy<u32> for Root {
///     fn parent(&self, _: u32) -> Option<u32> {
///         None
///     }
///     fn capabilities(&self, _: u32) -> NodeCapabilities {
///         NodeCapabilities::FOCUS_TARGET
///     }
///     fn properties_provider(&self, _: u32) -> Option<&dyn FocusPropertiesProvider<u32>> {
///         None
///     }
/// }
///
/// let node = FocusTargetElement.create(0_u32);
/// assert_eq!(node.focus_state(), FocusState::Inactive);
/// assert!(node.fetch_focus_properties(&Root).can_focus);
///
/// // The owner moves focus here, then the element gets recycled.
/// node.set_focus_state(FocusState::ActiveParent);
/// node.on_reset(&Root, &mut Detached);
/// assert_eq!(node.focus_state(), FocusState::Inactive);
/// ```
#[derive(Debug)]
pub struct FocusTargetNode<K>
where
    K: Copy + Eq,
{
    key: K,
    state: Cell<FocusState>,
    processing_custom_enter: Cell<bool>,
    processing_custom_exit: Cell<bool>,
    /// `None` until looked up; then the nearest beyond-bounds ancestor, if any.
    beyond_bounds_parent: Cell<Option<Option<K>>>,
}

impl<K> FocusTargetNode<K>
where
    K: Copy + Eq + fmt::Debug,
{
    /// Creates an [`Inactive`](FocusState::Inactive) node for the element `key`.
    #[must_use]
    pub fn new(key: K) -> Self {
        Self {
            key,
            state: Cell::new(FocusState::Inactive),
            processing_custom_enter: Cell::new(false),
            processing_custom_exit: Cell::new(false),
            beyond_bounds_parent: Cell::new(None),
        }
    }

    /// The key of the element this node is attached to.
    #[must_use]
    pub fn key(&self) -> K {
        self.key
    }

    /// The current focus state.
    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.state.get()
    }

    /// Sets the focus state.
    ///
    /// This is the owner's hook for performing focus transfers; focus targets
    /// themselves only request changes through [`FocusOwner`].
    pub fn set_focus_state(&self, state: FocusState) {
        self.state.set(state);
    }

    /// Returns `true` while a custom enter resolution is running on this node.
    #[must_use]
    pub fn is_processing_custom_enter(&self) -> bool {
        self.processing_custom_enter.get()
    }

    /// Returns `true` while a custom exit resolution is running on this node.
    #[must_use]
    pub fn is_processing_custom_exit(&self) -> bool {
        self.processing_custom_exit.get()
    }

    /// Handles the element being detached or recycled.
    ///
    /// - [`Active`](FocusState::Active) / [`Captured`](FocusState::Captured):
    ///   asks the owner to clear focus with `force = true`. The state itself
    ///   is left to the owner.
    /// - [`ActiveParent`](FocusState::ActiveParent): schedules listener
    ///   invalidation, then resets the state to `Inactive` so a reused node
    ///   does not keep stale sub-hierarchy state.
    /// - [`Inactive`](FocusState::Inactive): schedules listener invalidation.
    ///
    /// The cached beyond-bounds ancestor is cleared in every case. The
    /// reentrancy flags are left alone: they are only set while a custom
    /// enter or exit is on the stack, and a callback that detaches its own
    /// element must still not be re-entered.
    pub fn on_reset<H, O>(&self, hierarchy: &H, owner: &mut O)
    where
        H: FocusHierarchy<K> + ?Sized,
        O: FocusOwner<K> + ?Sized,
    {
        self.beyond_bounds_parent.set(None);

        match self.focus_state() {
            state @ (FocusState::Active | FocusState::Captured) => {
                // Clears focus from the whole hierarchy, not just this target.
                let cleared = owner.clear_focus(true);
                tracing::debug!(node = ?self.key, ?state, cleared, "reset focused target");
            }
            FocusState::ActiveParent => {
                self.schedule_invalidation_for_focus_events(hierarchy, owner);
                self.state.set(FocusState::Inactive);
            }
            FocusState::Inactive => self.schedule_invalidation_for_focus_events(hierarchy, owner),
        }
    }

    /// Re-checks whether a focused node may keep focus.
    ///
    /// Only [`Active`](FocusState::Active) and [`Captured`](FocusState::Captured)
    /// nodes do any work: their properties are aggregated under `tracker`, so
    /// later changes to the inputs call back into
    /// [`on_observed_reads_changed`](Self::on_observed_reads_changed). If the
    /// aggregated `can_focus` is `false`, the owner is asked to clear focus
    /// with `force = true`. The node never changes its own state here.
    ///
    /// # Panics
    ///
    /// See [`fetch_focus_properties`](Self::fetch_focus_properties).
    pub fn invalidate_focus<H, O, T>(&self, hierarchy: &H, owner: &mut O, tracker: &mut T)
    where
        H: FocusHierarchy<K> + ?Sized,
        O: FocusOwner<K> + ?Sized,
        T: ReadTracker<K>,
    {
        match self.focus_state() {
            FocusState::Active | FocusState::Captured => {
                let properties =
                    tracker.observe_reads(self.key, || self.fetch_focus_properties(hierarchy));
                if !properties.can_focus {
                    let cleared = owner.clear_focus(true);
                    tracing::debug!(node = ?self.key, cleared, "focused target can no longer focus");
                }
            }
            FocusState::ActiveParent | FocusState::Inactive => {}
        }
    }

    /// Entry point for the reactive engine when a tracked read changed.
    ///
    /// Runs [`invalidate_focus`](Self::invalidate_focus) and, if the focus
    /// state differs afterwards (an owner that clears synchronously), schedules
    /// listener invalidation.
    ///
    /// # Panics
    ///
    /// See [`fetch_focus_properties`](Self::fetch_focus_properties).
    pub fn on_observed_reads_changed<H, O, T>(&self, hierarchy: &H, owner: &mut O, tracker: &mut T)
    where
        H: FocusHierarchy<K> + ?Sized,
        O: FocusOwner<K> + ?Sized,
        T: ReadTracker<K>,
    {
        let previous = self.focus_state();
        self.invalidate_focus(hierarchy, owner, tracker);
        let current = self.focus_state();
        if previous != current {
            tracing::trace!(node = ?self.key, ?previous, ?current, "focus state changed");
            self.schedule_invalidation_for_focus_events(hierarchy, owner);
        }
    }

    /// Aggregates the effective focus properties of this node.
    ///
    /// Starts from [`FocusProperties::default`] and walks the ancestors nearest
    /// first. The walk stops at the first ancestor that is a focus target:
    /// that target's own aggregation covers the tree above it. Every
    /// properties provider before it edits the shared record, nearest first,
    /// so the outermost provider wins any conflict.
    ///
    /// This only reads the tree; repeated calls without tree changes return
    /// equal records.
    ///
    /// # Panics
    ///
    /// Panics if an ancestor advertises
    /// [`FOCUS_PROPERTIES`](NodeCapabilities::FOCUS_PROPERTIES) without
    /// providing a [`FocusPropertiesProvider`](crate::FocusPropertiesProvider).
    /// Use [`try_fetch_focus_properties`](Self::try_fetch_focus_properties) to
    /// get the error instead.
    #[must_use]
    pub fn fetch_focus_properties<H>(&self, hierarchy: &H) -> FocusProperties<K>
    where
        H: FocusHierarchy<K> + ?Sized,
    {
        self.try_fetch_focus_properties(hierarchy)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fallible form of [`fetch_focus_properties`](Self::fetch_focus_properties).
    pub fn try_fetch_focus_properties<H>(
        &self,
        hierarchy: &H,
    ) -> Result<FocusProperties<K>, CapabilityError<K>>
    where
        H: FocusHierarchy<K> + ?Sized,
    {
        let mut properties = FocusProperties::default();
        let flow = visit_ancestors(
            hierarchy,
            self.key,
            NodeCapabilities::FOCUS_PROPERTIES | NodeCapabilities::FOCUS_TARGET,
            |ancestor, capabilities| {
                if capabilities.contains(NodeCapabilities::FOCUS_TARGET) {
                    return ControlFlow::Break(None);
                }
                match hierarchy.properties_provider(ancestor) {
                    Some(provider) => {
                        provider.modify_focus_properties(&mut properties);
                        ControlFlow::Continue(())
                    }
                    None => ControlFlow::Break(Some(CapabilityError {
                        node: ancestor,
                        capability: NodeCapabilities::FOCUS_PROPERTIES,
                    })),
                }
            },
        );
        match flow {
            ControlFlow::Break(Some(err)) => Err(err),
            ControlFlow::Break(None) | ControlFlow::Continue(()) => Ok(properties),
        }
    }

    /// Resolves the custom enter target for `direction` and hands it to `block`.
    ///
    /// `block` is not called when the aggregated properties have no enter
    /// override ([`FocusRequester::Default`]). If a custom enter resolution is
    /// already running on this node, for example because `block` started a
    /// focus search that came back here, the request is dropped and `None` is
    /// returned. The guard is released on every exit path, including a
    /// panicking `block`.
    ///
    /// Returns `block`'s result when it ran.
    ///
    /// # Panics
    ///
    /// See [`fetch_focus_properties`](Self::fetch_focus_properties).
    pub fn fetch_custom_enter<H, R>(
        &self,
        hierarchy: &H,
        direction: FocusDirection,
        block: impl FnOnce(FocusRequester<K>) -> R,
    ) -> Option<R>
    where
        H: FocusHierarchy<K> + ?Sized,
    {
        let Some(_guard) = ProcessingGuard::acquire(&self.processing_custom_enter) else {
            tracing::trace!(node = ?self.key, ?direction, "dropped reentrant custom enter");
            return None;
        };
        let target = self.fetch_focus_properties(hierarchy).enter(direction);
        if target.is_default() {
            return None;
        }
        Some(block(target))
    }

    /// Resolves the custom exit target for `direction` and hands it to `block`.
    ///
    /// Guarded independently of [`fetch_custom_enter`](Self::fetch_custom_enter),
    /// with the same semantics.
    ///
    /// # Panics
    ///
    /// See [`fetch_focus_properties`](Self::fetch_focus_properties).
    pub fn fetch_custom_exit<H, R>(
        &self,
        hierarchy: &H,
        direction: FocusDirection,
        block: impl FnOnce(FocusRequester<K>) -> R,
    ) -> Option<R>
    where
        H: FocusHierarchy<K> + ?Sized,
    {
        let Some(_guard) = ProcessingGuard::acquire(&self.processing_custom_exit) else {
            tracing::trace!(node = ?self.key, ?direction, "dropped reentrant custom exit");
            return None;
        };
        let target = self.fetch_focus_properties(hierarchy).exit(direction);
        if target.is_default() {
            return None;
        }
        Some(block(target))
    }

    /// Schedules every focus-event listener above this node with the owner.
    ///
    /// Walks the ancestors nearest first and stops at the first focus target;
    /// listeners beyond it are that target's business. Listeners are only
    /// scheduled, never invoked; de-duplication and delivery are up to the
    /// owner.
    pub fn schedule_invalidation_for_focus_events<H, O>(&self, hierarchy: &H, owner: &mut O)
    where
        H: FocusHierarchy<K> + ?Sized,
        O: FocusOwner<K> + ?Sized,
    {
        let _ = visit_ancestors(
            hierarchy,
            self.key,
            NodeCapabilities::FOCUS_EVENT | NodeCapabilities::FOCUS_TARGET,
            |ancestor, capabilities| {
                if capabilities.contains(NodeCapabilities::FOCUS_TARGET) {
                    return ControlFlow::Break(());
                }
                tracing::trace!(node = ?self.key, listener = ?ancestor, "schedule focus event");
                owner.schedule_invalidation(ancestor);
                ControlFlow::Continue(())
            },
        );
    }

    /// The nearest ancestor able to lay out content beyond its bounds.
    ///
    /// Looked up on first use and cached until [`on_reset`](Self::on_reset).
    #[must_use]
    pub fn beyond_bounds_layout_parent<H>(&self, hierarchy: &H) -> Option<K>
    where
        H: FocusHierarchy<K> + ?Sized,
    {
        if let Some(cached) = self.beyond_bounds_parent.get() {
            return cached;
        }
        let found = match visit_ancestors(
            hierarchy,
            self.key,
            NodeCapabilities::BEYOND_BOUNDS_LAYOUT,
            |ancestor, _| ControlFlow::Break(ancestor),
        ) {
            ControlFlow::Break(ancestor) => Some(ancestor),
            ControlFlow::Continue(()) => None,
        };
        self.beyond_bounds_parent.set(Some(found));
        found
    }
}

/// Holds a reentrancy flag for the duration of a custom navigation call.
struct ProcessingGuard<'a>(&'a Cell<bool>);

impl<'a> ProcessingGuard<'a> {
    /// Sets `flag`, or returns `None` if it was already set.
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        (!flag.replace(true)).then_some(Self(flag))
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
