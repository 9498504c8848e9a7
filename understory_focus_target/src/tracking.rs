// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read tracking hook supplied by the host's reactive engine.

/// Scoped read tracking.
///
/// The engine runs `reads`, records every tracked value it touches, and
/// arranges for [`FocusTargetNode::on_observed_reads_changed`] to be called
/// on `observer` once any of those values changes.
///
/// Focus targets only ever read tracked state through this hook, so the
/// dependency scope is always explicit.
///
/// [`FocusTargetNode::on_observed_reads_changed`]: crate::FocusTargetNode::on_observed_reads_changed
pub trait ReadTracker<K> {
    /// Runs `reads` on behalf of `observer`, registering its dependencies.
    fn observe_reads<R>(&mut self, observer: K, reads: impl FnOnce() -> R) -> R;
}

impl<K, T> ReadTracker<K> for &mut T
where
    T: ReadTracker<K> + ?Sized,
{
    #[inline]
    fn observe_reads<R>(&mut self, observer: K, reads: impl FnOnce() -> R) -> R {
        (**self).observe_reads(observer, reads)
    }
}

/// A [`ReadTracker`] that runs the block without recording anything.
///
/// Use this when the host has no reactive engine; focus targets then only
/// re-check their properties when explicitly invalidated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Untracked;

impl<K> ReadTracker<K> for Untracked {
    #[inline]
    fn observe_reads<R>(&mut self, _observer: K, reads: impl FnOnce() -> R) -> R {
        reads()
    }
}
