//! RegistryError: Unified error type for resource-registry public APIs
//!
//! Every fallible operation in this crate returns this error. Item values are
//! rendered into the error with their `Debug` form so the type stays
//! non-generic and can cross container boundaries freely.

use std::fmt;
use thiserror::Error;

/// Which endpoint of a required constraint was missing at resolution time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MissingEndpoint {
    /// The `before` item is absent.
    Before,
    /// The `after` item is absent.
    After,
    /// Neither item is present.
    Both,
}

impl fmt::Display for MissingEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingEndpoint::Before => f.write_str("before"),
            MissingEndpoint::After => f.write_str("after"),
            MissingEndpoint::Both => f.write_str("before and after"),
        }
    }
}

/// Unified error type for resource-registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A required constraint names an item absent from the container.
    #[error("Required resource not found ({missing} missing): before = {before}, after = {after}")]
    MissingRequiredEndpoint {
        before: String,
        after: String,
        missing: MissingEndpoint,
    },
    /// Constraints form a cycle that cannot be broken.
    #[error("Ordering cycle detected among {total} resource(s): {}", .items.join(", "))]
    CycleDetected {
        /// Participating items, possibly truncated; see `total`.
        items: Vec<String>,
        total: usize,
    },
    /// A type-specific ordering rule rejected the constraint.
    #[error("Illegal ordering constraint: {0}")]
    IllegalConstraint(String),
    /// An identifier (such as a group name) failed validation.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// Internal consistency check failed; reported by [`DebugInvariants`].
    ///
    /// [`DebugInvariants`]: crate::debug_invariants::DebugInvariants
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl RegistryError {
    pub(crate) fn missing_endpoint<R: fmt::Debug>(
        before: &R,
        after: &R,
        missing: MissingEndpoint,
    ) -> Self {
        RegistryError::MissingRequiredEndpoint {
            before: format!("{before:?}"),
            after: format!("{after:?}"),
            missing,
        }
    }

    /// Build a cycle error from the participating items, keeping at most
    /// `limit` of them in the report.
    pub(crate) fn cycle<'a, R, I>(items: I, limit: usize) -> Self
    where
        R: fmt::Debug + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut total = 0;
        let mut shown = Vec::new();
        for item in items {
            if shown.len() < limit {
                shown.push(format!("{item:?}"));
            }
            total += 1;
        }
        RegistryError::CycleDetected {
            items: shown,
            total,
        }
    }

    /// `true` for errors produced by `resolve()`.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            RegistryError::MissingRequiredEndpoint { .. } | RegistryError::CycleDetected { .. }
        )
    }
}
