// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregated focus properties and the provider capability that edits them.

use alloc::rc::Rc;
use core::fmt;

use crate::direction::{FocusDirection, LayoutDirection};
use crate::requester::FocusRequester;

/// A custom enter/exit resolver: maps the search direction to an override.
pub type NavigationFn<K> = Rc<dyn Fn(FocusDirection) -> FocusRequester<K>>;

/// Effective focus properties of a focus target.
///
/// A fresh record is built on every aggregation (see
/// [`FocusTargetNode::fetch_focus_properties`](crate::FocusTargetNode::fetch_focus_properties))
/// and then handed to each [`FocusPropertiesProvider`] ancestor in turn.
/// Records are never cached: the providers above a target can change
/// between two calls.
///
/// Two records compare equal when all fields are equal; the `enter` and
/// `exit` resolvers are compared by identity.
///
/// ```
/// use understory_focus_target::{FocusDirection, FocusProperties, FocusRequester};
///
/// let mut props = FocusProperties::<u32>::default();
/// assert!(props.can_focus);
/// assert_eq!(props.enter(FocusDirection::Down), FocusRequester::Default);
///
/// props.set_enter(|_| FocusRequester::Node(7));
/// assert_eq!(props.enter(FocusDirection::Down), FocusRequester::Node(7));
/// ```
pub struct FocusProperties<K> {
    /// Whether the target may hold focus.
    pub can_focus: bool,
    /// Override for [`FocusDirection::Next`].
    pub next: FocusRequester<K>,
    /// Override for [`FocusDirection::Previous`].
    pub previous: FocusRequester<K>,
    /// Override for [`FocusDirection::Up`].
    pub up: FocusRequester<K>,
    /// Override for [`FocusDirection::Down`].
    pub down: FocusRequester<K>,
    /// Override for [`FocusDirection::Left`]; takes precedence over `start`/`end`.
    pub left: FocusRequester<K>,
    /// Override for [`FocusDirection::Right`]; takes precedence over `start`/`end`.
    pub right: FocusRequester<K>,
    /// Override for the leading side (left in LTR, right in RTL).
    pub start: FocusRequester<K>,
    /// Override for the trailing side (right in LTR, left in RTL).
    pub end: FocusRequester<K>,
    /// Resolver consulted when focus enters this target's children.
    pub enter: Option<NavigationFn<K>>,
    /// Resolver consulted when focus leaves this target's children.
    pub exit: Option<NavigationFn<K>>,
}

impl<K> Default for FocusProperties<K> {
    fn default() -> Self {
        Self {
            can_focus: true,
            next: FocusRequester::Default,
            previous: FocusRequester::Default,
            up: FocusRequester::Default,
            down: FocusRequester::Default,
            left: FocusRequester::Default,
            right: FocusRequester::Default,
            start: FocusRequester::Default,
            end: FocusRequester::Default,
            enter: None,
            exit: None,
        }
    }
}

impl<K: Copy> FocusProperties<K> {
    /// Resolves the enter override for `direction`.
    ///
    /// Returns [`FocusRequester::Default`] when no resolver is installed.
    #[must_use]
    pub fn enter(&self, direction: FocusDirection) -> FocusRequester<K> {
        self.enter
            .as_ref()
            .map_or(FocusRequester::Default, |enter| enter(direction))
    }

    /// Resolves the exit override for `direction`.
    ///
    /// Returns [`FocusRequester::Default`] when no resolver is installed.
    #[must_use]
    pub fn exit(&self, direction: FocusDirection) -> FocusRequester<K> {
        self.exit
            .as_ref()
            .map_or(FocusRequester::Default, |exit| exit(direction))
    }

    /// Resolves the fixed override for a one- or two-dimensional move.
    ///
    /// `Left` and `Right` fall back to `start`/`end` according to
    /// `layout_direction` when the explicit side is unset. [`FocusDirection::Enter`]
    /// and [`FocusDirection::Exit`] have no fixed override and always yield
    /// [`FocusRequester::Default`]; use [`enter`](Self::enter) and
    /// [`exit`](Self::exit) for those.
    #[must_use]
    pub fn directional_target(
        &self,
        direction: FocusDirection,
        layout_direction: LayoutDirection,
    ) -> FocusRequester<K> {
        let (leading, trailing) = match layout_direction {
            LayoutDirection::Ltr => (self.start, self.end),
            LayoutDirection::Rtl => (self.end, self.start),
        };
        match direction {
            FocusDirection::Next => self.next,
            FocusDirection::Previous => self.previous,
            FocusDirection::Up => self.up,
            FocusDirection::Down => self.down,
            FocusDirection::Left => self.left.or(leading),
            FocusDirection::Right => self.right.or(trailing),
            FocusDirection::Enter | FocusDirection::Exit => FocusRequester::Default,
        }
    }
}

impl<K> FocusProperties<K> {
    /// Installs a custom enter resolver, replacing any previous one.
    pub fn set_enter(&mut self, enter: impl Fn(FocusDirection) -> FocusRequester<K> + 'static) {
        self.enter = Some(Rc::new(enter));
    }

    /// Installs a custom exit resolver, replacing any previous one.
    pub fn set_exit(&mut self, exit: impl Fn(FocusDirection) -> FocusRequester<K> + 'static) {
        self.exit = Some(Rc::new(exit));
    }
}

impl<K: Clone> Clone for FocusProperties<K> {
    fn clone(&self) -> Self {
        Self {
            can_focus: self.can_focus,
            next: self.next.clone(),
            previous: self.previous.clone(),
            up: self.up.clone(),
            down: self.down.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            enter: self.enter.clone(),
            exit: self.exit.clone(),
        }
    }
}

impl<K: PartialEq> PartialEq for FocusProperties<K> {
    fn eq(&self, other: &Self) -> bool {
        fn same_fn<K>(a: Option<&NavigationFn<K>>, b: Option<&NavigationFn<K>>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
        }
        self.can_focus == other.can_focus
            && self.next == other.next
            && self.previous == other.previous
            && self.up == other.up
            && self.down == other.down
            && self.left == other.left
            && self.right == other.right
            && self.start == other.start
            && self.end == other.end
            && same_fn(self.enter.as_ref(), other.enter.as_ref())
            && same_fn(self.exit.as_ref(), other.exit.as_ref())
    }
}

impl<K: fmt::Debug> fmt::Debug for FocusProperties<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusProperties")
            .field("can_focus", &self.can_focus)
            .field("next", &self.next)
            .field("previous", &self.previous)
            .field("up", &self.up)
            .field("down", &self.down)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// Capability of an ancestor that overrides the focus properties of the
/// focus targets below it.
///
/// Providers are applied nearest first, so the outermost provider has the
/// final say on any field it writes.
///
/// Any `Fn(&mut FocusProperties<K>)` closure is a provider:
///
/// ```
/// use understory_focus_target::{FocusProperties, FocusPropertiesProvider};
///
/// let disable = |props: &mut FocusProperties<u32>| props.can_focus = false;
/// let mut props = FocusProperties::default();
/// disable.modify_focus_properties(&mut props);
/// assert!(!props.can_focus);
/// ```
pub trait FocusPropertiesProvider<K> {
    /// Edits the shared properties record in place.
    fn modify_focus_properties(&self, properties: &mut FocusProperties<K>);
}

impl<K, F> FocusPropertiesProvider<K> for F
where
    F: Fn(&mut FocusProperties<K>),
{
    #[inline]
    fn modify_focus_properties(&self, properties: &mut FocusProperties<K>) {
        self(properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_overrides() {
        let props = FocusProperties::<u32>::default();
        assert!(props.can_focus);
        for direction in [
            FocusDirection::Next,
            FocusDirection::Previous,
            FocusDirection::Left,
            FocusDirection::Right,
            FocusDirection::Up,
            FocusDirection::Down,
            FocusDirection::Enter,
            FocusDirection::Exit,
        ] {
            assert!(props.enter(direction).is_default());
            assert!(props.exit(direction).is_default());
            assert!(
                props
                    .directional_target(direction, LayoutDirection::Ltr)
                    .is_default()
            );
        }
    }

    #[test]
    fn left_and_right_fall_back_to_start_and_end() {
        let props = FocusProperties::<u32> {
            start: FocusRequester::Node(1),
            end: FocusRequester::Node(2),
            ..FocusProperties::default()
        };
        let ltr = LayoutDirection::Ltr;
        let rtl = LayoutDirection::Rtl;
        assert_eq!(
            props.directional_target(FocusDirection::Left, ltr),
            FocusRequester::Node(1)
        );
        assert_eq!(
            props.directional_target(FocusDirection::Right, ltr),
            FocusRequester::Node(2)
        );
        assert_eq!(
            props.directional_target(FocusDirection::Left, rtl),
            FocusRequester::Node(2)
        );
        assert_eq!(
            props.directional_target(FocusDirection::Right, rtl),
            FocusRequester::Node(1)
        );
    }

    #[test]
    fn explicit_side_beats_start_end() {
        let props = FocusProperties::<u32> {
            left: FocusRequester::Cancel,
            start: FocusRequester::Node(1),
            ..FocusProperties::default()
        };
        assert_eq!(
            props.directional_target(FocusDirection::Left, LayoutDirection::Ltr),
            FocusRequester::Cancel
        );
    }

    #[test]
    fn equality_compares_resolvers_by_identity() {
        let resolver: NavigationFn<u32> = Rc::new(|_: FocusDirection| FocusRequester::Cancel);
        let a = FocusProperties::<u32> {
            enter: Some(resolver.clone()),
            ..FocusProperties::default()
        };
        let b = FocusProperties::<u32> {
            enter: Some(resolver),
            ..FocusProperties::default()
        };
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set_enter(|_| FocusRequester::Cancel);
        assert_ne!(b, c);
    }
}
