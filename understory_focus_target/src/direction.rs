// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation directions and layout direction.

/// Direction of a focus search that consults custom navigation overrides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Forward in traversal order (for example, Tab).
    Next,
    /// Backward in traversal order (for example, Shift+Tab).
    Previous,
    /// Leftwards.
    Left,
    /// Rightwards.
    Right,
    /// Upwards.
    Up,
    /// Downwards.
    Down,
    /// Into the children of the current target.
    Enter,
    /// Out of the current target towards its parent.
    Exit,
}

impl FocusDirection {
    /// Returns `true` for [`Next`](Self::Next) and [`Previous`](Self::Previous).
    #[must_use]
    pub const fn is_one_dimensional(self) -> bool {
        matches!(self, Self::Next | Self::Previous)
    }

    /// Returns `true` for the four arrow directions.
    #[must_use]
    pub const fn is_two_dimensional(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }
}

/// Horizontal reading direction, used to resolve `start`/`end` overrides.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left to right: `start` is left.
    #[default]
    Ltr,
    /// Right to left: `start` is right.
    Rtl,
}
