// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus owner interface and an owner-side invalidation queue.

use core::hash::Hash;

use hashbrown::HashSet;
use smallvec::SmallVec;

/// The single authority holding the globally focused node.
///
/// Focus targets never change the focused node themselves; they ask the
/// owner. One owner exists per tree root and is passed by reference to
/// every focus target operation.
pub trait FocusOwner<K> {
    /// Releases focus from whatever node holds it.
    ///
    /// With `force` set, captured focus is released too. Returns `true` if
    /// focus was cleared. Whether target states are updated synchronously or
    /// on the owner's next pass is up to the owner.
    fn clear_focus(&mut self, force: bool) -> bool;

    /// Enqueues a focus-event listener for notification.
    ///
    /// The owner de-duplicates and delivers later in the same synchronous
    /// pass; see [`InvalidationQueue`].
    fn schedule_invalidation(&mut self, listener: K);
}

impl<K, O> FocusOwner<K> for &mut O
where
    O: FocusOwner<K> + ?Sized,
{
    #[inline]
    fn clear_focus(&mut self, force: bool) -> bool {
        (**self).clear_focus(force)
    }

    #[inline]
    fn schedule_invalidation(&mut self, listener: K) {
        (**self).schedule_invalidation(listener);
    }
}

/// Stand-in owner for a tree that is not attached to an owner yet.
///
/// Clearing focus reports `false` and invalidations are dropped: with no
/// owner there is no focused node and nobody to deliver notifications.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Detached;

impl<K> FocusOwner<K> for Detached {
    fn clear_focus(&mut self, _force: bool) -> bool {
        false
    }

    fn schedule_invalidation(&mut self, _listener: K) {}
}

/// Inline capacity for queued listeners; a focus change rarely touches more.
const INLINE_LISTENERS: usize = 8;

/// Insertion-ordered, de-duplicating queue of listeners awaiting delivery.
///
/// Owners use this to implement [`FocusOwner::schedule_invalidation`]: a
/// listener scheduled several times in one pass is delivered once, in the
/// order it was first scheduled.
///
/// ```
/// use understory_focus_target::InvalidationQueue;
///
/// let mut queue = InvalidationQueue::<u32>::new();
/// assert!(queue.schedule(3));
/// assert!(queue.schedule(1));
/// assert!(!queue.schedule(3));
///
/// let delivered: Vec<_> = queue.drain().collect();
/// assert_eq!(delivered, [3, 1]);
/// assert!(queue.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct InvalidationQueue<K>
where
    K: Copy + Eq + Hash,
{
    order: SmallVec<[K; INLINE_LISTENERS]>,
    pending: HashSet<K>,
}

impl<K> Default for InvalidationQueue<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InvalidationQueue<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: SmallVec::new(),
            pending: HashSet::new(),
        }
    }

    /// Schedules `listener` for delivery.
    ///
    /// Returns `true` if it was not already pending.
    pub fn schedule(&mut self, listener: K) -> bool {
        if !self.pending.insert(listener) {
            return false;
        }
        self.order.push(listener);
        true
    }

    /// Returns `true` if `listener` is awaiting delivery.
    #[must_use]
    pub fn contains(&self, listener: K) -> bool {
        self.pending.contains(&listener)
    }

    /// Returns the number of pending listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pending listeners in scheduling order, without removing them.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    /// Removes and yields every pending listener in scheduling order.
    ///
    /// The queue is emptied eagerly, so listeners scheduled while the drained
    /// batch is being delivered start a new batch.
    pub fn drain(&mut self) -> impl Iterator<Item = K> + use<K> {
        self.pending.clear();
        core::mem::take(&mut self.order).into_iter()
    }
}
