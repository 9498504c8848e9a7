// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation override targets.

/// Where a custom navigation override sends focus.
///
/// [`Default`](Self::Default) is the "no override" sentinel: it is what every
/// field of a fresh [`FocusProperties`](crate::FocusProperties) holds, and the
/// custom navigation resolver never hands it to a callback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusRequester<K> {
    /// No override; the focus search decides.
    #[default]
    Default,
    /// Abort the focus search and keep focus where it is.
    Cancel,
    /// Move focus to the given node.
    Node(K),
}

impl<K> FocusRequester<K> {
    /// Returns `true` for the [`Default`](Self::Default) sentinel.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns `self` unless it is the [`Default`](Self::Default) sentinel, in
    /// which case `fallback` is returned.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        match self {
            Self::Default => fallback,
            other => other,
        }
    }
}

impl<K: Copy> FocusRequester<K> {
    /// Returns the target node, if this requester names one.
    #[must_use]
    pub fn node(self) -> Option<K> {
        match self {
            Self::Node(key) => Some(key),
            Self::Default | Self::Cancel => None,
        }
    }
}
