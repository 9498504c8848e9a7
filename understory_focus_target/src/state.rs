// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four-valued focus state held by every focus target.

/// Focus state of a single focus target.
///
/// At most one focus target in a tree is [`Active`](Self::Active) or
/// [`Captured`](Self::Captured) at a time. That uniqueness is maintained by
/// the [`FocusOwner`](crate::FocusOwner), not by individual nodes.
///
/// ```
/// use understory_focus_target::FocusState;
///
/// assert!(FocusState::Captured.is_focused());
/// assert!(FocusState::ActiveParent.has_focus());
/// assert!(!FocusState::ActiveParent.is_focused());
/// assert_eq!(FocusState::default(), FocusState::Inactive);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Not focused, and no descendant focus target is focused.
    #[default]
    Inactive,
    /// Not focused itself, but a descendant focus target is
    /// [`Active`](Self::Active) or [`Captured`](Self::Captured).
    ActiveParent,
    /// Holds focus; focus may be moved elsewhere.
    Active,
    /// Holds focus and refuses to give it up until released or forced.
    Captured,
}

impl FocusState {
    /// Returns `true` if this target itself holds focus.
    #[must_use]
    pub const fn is_focused(self) -> bool {
        matches!(self, Self::Active | Self::Captured)
    }

    /// Returns `true` if this target or one of its descendants holds focus.
    #[must_use]
    pub const fn has_focus(self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Returns `true` if this target holds captured focus.
    #[must_use]
    pub const fn is_captured(self) -> bool {
        matches!(self, Self::Captured)
    }

    /// Folds the states of a listener's nearest child focus targets into the
    /// single state that listener observes.
    ///
    /// The first state that is not [`Inactive`](Self::Inactive) wins; since
    /// only one branch of the tree can hold focus, at most one child target
    /// is expected to contribute. An empty iterator yields `Inactive`.
    ///
    /// ```
    /// use understory_focus_target::FocusState;
    ///
    /// let children = [FocusState::Inactive, FocusState::Active, FocusState::Inactive];
    /// assert_eq!(FocusState::aggregate(children), FocusState::Active);
    /// assert_eq!(FocusState::aggregate([]), FocusState::Inactive);
    /// ```
    #[must_use]
    pub fn aggregate<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        children
            .into_iter()
            .find(|state| state.has_focus())
            .unwrap_or(Self::Inactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_cover_all_states() {
        let all = [
            FocusState::Inactive,
            FocusState::ActiveParent,
            FocusState::Active,
            FocusState::Captured,
        ];
        let focused: [bool; 4] = all.map(FocusState::is_focused);
        let has: [bool; 4] = all.map(FocusState::has_focus);
        let captured: [bool; 4] = all.map(FocusState::is_captured);
        assert_eq!(focused, [false, false, true, true]);
        assert_eq!(has, [false, true, true, true]);
        assert_eq!(captured, [false, false, false, true]);
    }

    #[test]
    fn aggregate_prefers_first_focused_branch() {
        assert_eq!(
            FocusState::aggregate([FocusState::Inactive, FocusState::ActiveParent]),
            FocusState::ActiveParent
        );
        assert_eq!(
            FocusState::aggregate([FocusState::Captured, FocusState::Active]),
            FocusState::Captured
        );
        assert_eq!(
            FocusState::aggregate([FocusState::Inactive, FocusState::Inactive]),
            FocusState::Inactive
        );
    }
}
