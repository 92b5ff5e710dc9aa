//! Type-specific constraint validation strategies.
//!
//! A container runs its [`ConstraintCheck`] synchronously on every
//! add/remove-constraint call, before touching its state. A failed check
//! leaves the container unchanged.

use crate::registry_error::RegistryError;

/// Validates a `(before, after)` pair against a type-specific partial order.
pub trait ConstraintCheck<R>: Clone + Send + Sync {
    /// Returns [`RegistryError::IllegalConstraint`] when `before` may never
    /// precede `after`.
    fn check(&self, before: &R, after: &R) -> Result<(), RegistryError>;
}

/// Accepts every constraint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Unchecked;

impl<R> ConstraintCheck<R> for Unchecked {
    #[inline]
    fn check(&self, _before: &R, _after: &R) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Any `Fn(&R, &R) -> Result<(), RegistryError>` closure is a check.
#[derive(Clone)]
pub struct CheckFn<F>(pub F);

impl<R, F> ConstraintCheck<R> for CheckFn<F>
where
    F: Fn(&R, &R) -> Result<(), RegistryError> + Clone + Send + Sync,
{
    #[inline]
    fn check(&self, before: &R, after: &R) -> Result<(), RegistryError> {
        (self.0)(before, after)
    }
}
