// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus Target: the per-element focus state machine.
//!
//! ## Overview
//!
//! Each focusable element in a UI tree gets a [`FocusTargetNode`]. The node
//! holds a four-valued [`FocusState`] and knows how to:
//!
//! - **Aggregate properties** ([`FocusTargetNode::fetch_focus_properties`]):
//!   walk the ancestors up to the next focus target and let every
//!   [`FocusPropertiesProvider`] edit a fresh [`FocusProperties`] record.
//!   The outermost provider wins.
//! - **Resolve custom navigation** ([`FocusTargetNode::fetch_custom_enter`],
//!   [`FocusTargetNode::fetch_custom_exit`]): run user enter/exit overrides
//!   with a per-node reentrancy guard, so a callback that searches back into
//!   the same node is dropped instead of recursing.
//! - **Schedule invalidation**
//!   ([`FocusTargetNode::schedule_invalidation_for_focus_events`]): queue
//!   the focus-event listeners above it with the [`FocusOwner`].
//! - **React to change** ([`FocusTargetNode::on_reset`],
//!   [`FocusTargetNode::invalidate_focus`],
//!   [`FocusTargetNode::on_observed_reads_changed`]): give up focus when the
//!   element goes away or may no longer be focused.
//!
//! ## Collaborators
//!
//! The crate does not own the tree, the focused node, or the reactive engine.
//! Hosts plug those in through three traits:
//!
//! - [`FocusHierarchy`]: parent chain and per-node [`NodeCapabilities`].
//! - [`FocusOwner`]: clears focus and queues listener invalidations. Use
//!   [`Detached`] before an owner exists, and [`InvalidationQueue`] to
//!   implement the queueing side.
//! - [`ReadTracker`]: runs property aggregation under dependency tracking.
//!   Use [`Untracked`] without a reactive engine.
//!
//! ## Example
//!
//! ```rust
//! use understory_focus_target::{
//!     FocusHierarchy, FocusOwner, FocusProperties, FocusPropertiesProvider, FocusState,
//!     FocusTargetElement, FocusTargetNode, InvalidationQueue, NodeCapabilities, Untracked,
//! };
//!
//! // 0: listener, 1: provider that disables focus, 2: the focus target.
//! struct Host {
//!     disable: fn(&mut FocusProperties<u32>),
//! }
//!
//! impl FocusHierarchy<u32> for Host {
//!     fn parent(&self, node: u32) -> Option<u32> {
//!         node.checked_sub(1)
//!     }
//!     fn capabilities(&self, node: u32) -> NodeCapabilities {
//!         match node {
//!             0 => NodeCapabilities::FOCUS_EVENT,
//!             1 => NodeCapabilities::FOCUS_PROPERTIES,
//!             _ => NodeCapabilities::FOCUS_TARGET,
//!         }
//!     }
//!     fn properties_provider(&self, node: u32) -> Option<&dyn FocusPropertiesProvider<u32>> {
//!         (node == 1).then_some(&self.disable as &dyn FocusPropertiesProvider<u32>)
//!     }
//! }
//!
//! // An owner that clears synchronously.
//! struct Owner<'a> {
//!     focused: Option<&'a FocusTargetNode<u32>>,
//!     queue: InvalidationQueue<u32>,
//! }
//!
//! impl FocusOwner<u32> for Owner<'_> {
//!     fn clear_focus(&mut self, _force: bool) -> bool {
//!         let Some(node) = self.focused.take() else {
//!             return false;
//!         };
//!         node.set_focus_state(FocusState::Inactive);
//!         true
//!     }
//!     fn schedule_invalidation(&mut self, listener: u32) {
//!         self.queue.schedule(listener);
//!     }
//! }
//!
//! let host = Host { disable: |props| props.can_focus = false };
//! let node = FocusTargetElement.create(2_u32);
//! node.set_focus_state(FocusState::Active);
//!
//! let mut owner = Owner { focused: Some(&node), queue: InvalidationQueue::new() };
//! node.on_observed_reads_changed(&host, &mut owner, &mut Untracked);
//!
//! assert_eq!(node.focus_state(), FocusState::Inactive);
//! assert_eq!(owner.queue.drain().collect::<Vec<_>>(), [0]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `tracing`.
//!
//! Diagnostics are emitted as `tracing` events at `debug` and `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod capability;
mod direction;
mod element;
mod error;
mod node;
mod owner;
mod properties;
mod requester;
mod state;
mod tracking;

pub use capability::{FocusHierarchy, NodeCapabilities, visit_ancestors};
pub use direction::{FocusDirection, LayoutDirection};
pub use element::FocusTargetElement;
pub use error::CapabilityError;
pub use node::FocusTargetNode;
pub use owner::{Detached, FocusOwner, InvalidationQueue};
pub use properties::{FocusProperties, FocusPropertiesProvider, NavigationFn};
pub use requester::FocusRequester;
pub use state::FocusState;
pub use tracking::{ReadTracker, Untracked};
