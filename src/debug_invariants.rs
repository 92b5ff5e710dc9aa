//! Invariant checking for containers and resolved orders.
//!
//! Checks run in debug builds, or in release builds with the
//! `check-invariants` / `strict-invariants` features.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::registry_error::RegistryError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), RegistryError>;
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Check that `order` lists every item of `items` exactly once and that every
/// edge `(before, after)` whose endpoints are both listed is honoured.
///
/// Edges naming items outside `order` are ignored.
pub fn validate_order<'a, R, E>(
    order: &[R],
    items: &HashSet<R>,
    edges: E,
) -> Result<(), RegistryError>
where
    R: Eq + Hash + std::fmt::Debug + 'a,
    E: IntoIterator<Item = (&'a R, &'a R)>,
{
    if order.len() != items.len() {
        return Err(RegistryError::InvariantViolation(format!(
            "resolved order has {} item(s) but the container holds {}",
            order.len(),
            items.len()
        )));
    }
    let mut position: HashMap<&R, usize> = HashMap::with_capacity(order.len());
    for (i, item) in order.iter().enumerate() {
        if !items.contains(item) {
            return Err(RegistryError::InvariantViolation(format!(
                "resolved order lists {item:?} which is not in the container"
            )));
        }
        if position.insert(item, i).is_some() {
            return Err(RegistryError::InvariantViolation(format!(
                "resolved order lists {item:?} twice"
            )));
        }
    }
    for (before, after) in edges {
        if let (Some(b), Some(a)) = (position.get(before), position.get(after)) {
            if b >= a {
                return Err(RegistryError::InvariantViolation(format!(
                    "resolved order places {after:?} before {before:?}"
                )));
            }
        }
    }
    Ok(())
}
