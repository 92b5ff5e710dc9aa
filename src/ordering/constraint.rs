//! Constraint value types.

use std::fmt;

/// One entry of an `after` item's before-set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Before<R> {
    pub before: R,
    pub required: bool,
}

impl<R> Before<R> {
    pub fn new(before: R, required: bool) -> Self {
        Self { before, required }
    }
}

impl<R: fmt::Debug> fmt::Display for Before<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.required { "required" } else { "optional" };
        write!(f, "{:?} ({kind})", self.before)
    }
}

/// A full `(before, after, required)` constraint triple.
///
/// `before` must appear earlier than `after` in the resolved order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constraint<R> {
    pub before: R,
    pub after: R,
    pub required: bool,
}

impl<R> Constraint<R> {
    pub fn new(before: R, after: R, required: bool) -> Self {
        Self {
            before,
            after,
            required,
        }
    }

    /// Shorthand for a required constraint.
    pub fn required(before: R, after: R) -> Self {
        Self::new(before, after, true)
    }

    /// Shorthand for an optional constraint.
    pub fn optional(before: R, after: R) -> Self {
        Self::new(before, after, false)
    }
}

/// Sorted by `after`, then `before`, then required before optional.
impl<R: Ord> Ord for Constraint<R> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.after
            .cmp(&other.after)
            .then_with(|| self.before.cmp(&other.before))
            .then_with(|| other.required.cmp(&self.required))
    }
}

impl<R: Ord> PartialOrd for Constraint<R> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: fmt::Debug> fmt::Display for Constraint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.required { "required" } else { "optional" };
        write!(f, "{:?} -> {:?} ({kind})", self.before, self.after)
    }
}
