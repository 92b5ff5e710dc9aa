//! [`OrderedContainer`]: a thread-safe set of items plus ordering constraints,
//! with a memoized resolved order.
//!
//! One `parking_lot::Mutex` guards the item set, the constraint graph, the
//! cached order and the recompute counter together, so every operation on a
//! container is linearizable. The cached order is dropped on every successful
//! mutation and rebuilt lazily by the next [`OrderedContainer::resolve`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use parking_lot::Mutex;
use static_assertions::assert_impl_all;

use super::bounds::ItemLike;
use super::cache::InvalidateCache;
use super::check::{ConstraintCheck, Unchecked};
use super::config::ResolveConfig;
use super::constraint::Constraint;
use super::graph::ConstraintGraph;
use super::resolve::resolve_order;
use crate::debug_invariants::{DebugInvariants, validate_order};
use crate::registry_error::RegistryError;

/// State guarded by the container lock.
#[derive(Clone, Debug)]
struct ContainerState<R: ItemLike> {
    items: HashSet<R>,
    ordering: ConstraintGraph<R>,
    sorted: Option<Arc<[R]>>,
    resolutions: u64,
}

impl<R: ItemLike> Default for ContainerState<R> {
    fn default() -> Self {
        Self {
            items: HashSet::new(),
            ordering: ConstraintGraph::new(),
            sorted: None,
            resolutions: 0,
        }
    }
}

impl<R: ItemLike> InvalidateCache for ContainerState<R> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.sorted.take();
    }
}

impl<R: ItemLike> ContainerState<R> {
    fn validate(&self) -> Result<(), RegistryError> {
        let Some(sorted) = &self.sorted else {
            return Ok(());
        };
        let required: Vec<(&R, &R)> = self
            .ordering
            .iter()
            .filter(|(_, b)| b.required)
            .map(|(after, b)| (&b.before, after))
            .collect();
        validate_order(&sorted[..], &self.items, required)
    }
}

/// A set of items with before/after constraints and a cached resolved order.
///
/// # Type Parameters
/// - `R`: the item type; see [`ItemLike`].
/// - `C`: the constraint check run on every add/remove-constraint call.
///   Defaults to [`Unchecked`].
///
/// # Example
/// ```rust
/// use resource_registry::ordering::OrderedContainer;
///
/// let c = OrderedContainer::<&str>::new();
/// c.add("a.css");
/// c.add("b.css");
/// c.add_constraint("b.css", "a.css", true).unwrap();
/// assert_eq!(&*c.resolve().unwrap(), &["b.css", "a.css"]);
/// ```
pub struct OrderedContainer<R, C = Unchecked>
where
    R: ItemLike,
{
    state: Mutex<ContainerState<R>>,
    check: C,
    config: ResolveConfig,
}

assert_impl_all!(OrderedContainer<String>: Send, Sync);

impl<R: ItemLike, C: ConstraintCheck<R> + Default> Default for OrderedContainer<R, C> {
    fn default() -> Self {
        Self::with_check(C::default())
    }
}

impl<R: ItemLike> OrderedContainer<R, Unchecked> {
    /// Creates a new, empty container without a constraint check.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ItemLike, C: ConstraintCheck<R>> OrderedContainer<R, C> {
    /// Creates an empty container that validates constraints with `check`.
    pub fn with_check(check: C) -> Self {
        Self {
            state: Mutex::new(ContainerState::default()),
            check,
            config: ResolveConfig::default(),
        }
    }

    /// Replaces the resolution settings.
    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self.state.get_mut().invalidate_cache();
        self
    }

    pub(crate) fn from_parts(
        items: HashSet<R>,
        ordering: ConstraintGraph<R>,
        check: C,
        config: ResolveConfig,
    ) -> Self {
        Self {
            state: Mutex::new(ContainerState {
                items,
                ordering,
                sorted: None,
                resolutions: 0,
            }),
            check,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    #[inline]
    pub fn constraint_check(&self) -> &C {
        &self.check
    }

    /// Adds `item` if not already present.
    ///
    /// Returns `true` if the item was added.
    pub fn add(&self, item: R) -> bool {
        let mut state = self.state.lock();
        let added = state.items.insert(item);
        if added {
            state.invalidate_cache();
        }
        added
    }

    /// Adds every item, returning how many were new.
    pub fn add_all<I: IntoIterator<Item = R>>(&self, items: I) -> usize {
        let mut state = self.state.lock();
        let mut added = 0;
        for item in items {
            if state.items.insert(item) {
                added += 1;
            }
        }
        if added > 0 {
            state.invalidate_cache();
        }
        added
    }

    /// Removes `item`. Constraints mentioning it are kept.
    ///
    /// Returns `true` if the item was present.
    pub fn remove(&self, item: &R) -> bool {
        let mut state = self.state.lock();
        let removed = state.items.remove(item);
        if removed {
            state.invalidate_cache();
        }
        removed
    }

    /// Removes every item, returning how many were present.
    pub fn remove_all<'a, I>(&self, items: I) -> usize
    where
        R: 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut state = self.state.lock();
        let removed = items.into_iter().filter(|r| state.items.remove(*r)).count();
        if removed > 0 {
            state.invalidate_cache();
        }
        removed
    }

    /// Declares that `before` must precede `after`.
    ///
    /// Returns `Ok(true)` if the triple was new.
    ///
    /// # Errors
    /// [`RegistryError::IllegalConstraint`] if the container's check rejects
    /// the pair; the container is left unchanged.
    pub fn add_constraint(&self, before: R, after: R, required: bool) -> Result<bool, RegistryError> {
        self.check.check(&before, &after)?;
        let mut state = self.state.lock();
        let added = state.ordering.insert(before, after, required);
        if added {
            state.invalidate_cache();
        }
        Ok(added)
    }

    /// Removes the exact `(before, after, required)` triple.
    ///
    /// # Errors
    /// [`RegistryError::IllegalConstraint`] if the container's check rejects
    /// the pair.
    pub fn remove_constraint(&self, before: &R, after: &R, required: bool) -> Result<bool, RegistryError> {
        self.check.check(before, after)?;
        let mut state = self.state.lock();
        let removed = state.ordering.remove(before, after, required);
        if removed {
            state.invalidate_cache();
        }
        Ok(removed)
    }

    /// Adds a constraint between each pair of consecutive items:
    /// `a before b`, `b before c`, ...
    ///
    /// Every pair is checked before anything is inserted, so a rejected pair
    /// leaves the container unchanged. Returns how many triples were new.
    pub fn add_chain<I: IntoIterator<Item = R>>(&self, required: bool, items: I) -> Result<usize, RegistryError> {
        let pairs = self.checked_pairs(items)?;
        let mut state = self.state.lock();
        let mut added = 0;
        for (before, after) in pairs {
            if state.ordering.insert(before, after, required) {
                added += 1;
            }
        }
        if added > 0 {
            state.invalidate_cache();
        }
        Ok(added)
    }

    /// Removes the constraints [`add_chain`](Self::add_chain) would add.
    pub fn remove_chain<I: IntoIterator<Item = R>>(&self, required: bool, items: I) -> Result<usize, RegistryError> {
        let pairs = self.checked_pairs(items)?;
        let mut state = self.state.lock();
        let removed = pairs
            .iter()
            .filter(|(b, a)| state.ordering.remove(b, a, required))
            .count();
        if removed > 0 {
            state.invalidate_cache();
        }
        Ok(removed)
    }

    fn checked_pairs<I: IntoIterator<Item = R>>(&self, items: I) -> Result<Vec<(R, R)>, RegistryError> {
        let pairs: Vec<(R, R)> = items.into_iter().tuple_windows().collect();
        for (b, a) in &pairs {
            self.check.check(b, a)?;
        }
        Ok(pairs)
    }

    /// Returns the items in their resolved order.
    ///
    /// The order is computed on first call after a mutation and cached until
    /// the next one; repeated calls return the same `Arc`.
    ///
    /// # Errors
    /// * [`RegistryError::MissingRequiredEndpoint`]
    /// * [`RegistryError::CycleDetected`]
    ///
    /// Failures are not cached.
    pub fn resolve(&self) -> Result<Arc<[R]>, RegistryError> {
        let mut state = self.state.lock();
        if let Some(sorted) = &state.sorted {
            return Ok(Arc::clone(sorted));
        }
        state.resolutions += 1;
        let resolution = resolve_order(&state.items, &state.ordering, &self.config)?;
        let sorted: Arc<[R]> = resolution.order.into();
        state.sorted = Some(Arc::clone(&sorted));
        crate::debug_invariants!(state.validate(), "OrderedContainer::resolve");
        Ok(sorted)
    }

    /// Number of times the order has been recomputed, failed attempts
    /// included.
    pub fn resolve_count(&self) -> u64 {
        self.state.lock().resolutions
    }

    /// `true` iff there are no items and no constraints.
    pub fn is_empty(&self) -> bool {
        let state = self.state.lock();
        state.items.is_empty() && state.ordering.is_empty()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn contains(&self, item: &R) -> bool {
        self.state.lock().items.contains(item)
    }

    /// Number of stored constraint triples.
    pub fn constraint_count(&self) -> usize {
        self.state.lock().ordering.len()
    }

    /// Every stored constraint, sorted by `after` then `before`.
    pub fn constraints(&self) -> Vec<Constraint<R>> {
        self.state.lock().ordering.constraints_sorted()
    }

    /// Copy of the current items, in no particular order.
    pub fn snapshot(&self) -> HashSet<R> {
        self.state.lock().items.clone()
    }

    /// Deep copy. Mutating the copy never affects `self`.
    pub fn copy(&self) -> Self {
        let state = {
            let guard = self.state.lock();
            ContainerState {
                resolutions: 0,
                ..(*guard).clone()
            }
        };
        Self {
            state: Mutex::new(state),
            check: self.check.clone(),
            config: self.config.clone(),
        }
    }

    /// Copies this container's items and constraints into the given sets,
    /// holding the lock only for the duration of the copy.
    pub(crate) fn copy_into(&self, items: &mut HashSet<R>, ordering: &mut ConstraintGraph<R>) {
        let state = self.state.lock();
        log::trace!("union: copying {} item(s), {} constraint(s)", state.items.len(), state.ordering.len());
        items.extend(state.items.iter().cloned());
        ordering.extend_from(&state.ordering);
    }
}

impl<R: ItemLike, C: ConstraintCheck<R>> Clone for OrderedContainer<R, C> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<R: ItemLike, C: ConstraintCheck<R> + Default> FromIterator<R> for OrderedContainer<R, C> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let container = Self::default();
        container.add_all(iter);
        container
    }
}

impl<R: ItemLike, C> fmt::Debug for OrderedContainer<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OrderedContainer")
            .field("items", &state.items.len())
            .field("constraints", &state.ordering.len())
            .field("cached", &state.sorted.is_some())
            .finish()
    }
}

impl<R: ItemLike, C> DebugInvariants for OrderedContainer<R, C> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "OrderedContainer");
    }

    fn validate_invariants(&self) -> Result<(), RegistryError> {
        let state = self.state.lock();
        #[cfg(debug_assertions)]
        state.ordering.debug_assert_consistent();
        state.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::check::CheckFn;

    #[test]
    fn add_and_remove_are_idempotent() {
        let c = OrderedContainer::<u32>::new();
        assert!(c.add(1));
        assert!(!c.add(1));
        assert_eq!(c.len(), 1);
        assert!(c.remove(&1));
        assert!(!c.remove(&1));
        assert!(c.is_empty());
    }

    #[test]
    fn constraint_without_items_is_not_empty() {
        let c = OrderedContainer::<u32>::new();
        assert!(c.add_constraint(1, 2, false).unwrap());
        assert!(!c.add_constraint(1, 2, false).unwrap());
        assert!(!c.is_empty());
        assert!(c.remove_constraint(&1, &2, false).unwrap());
        assert!(c.is_empty());
    }

    #[test]
    fn cache_is_reused_until_mutation() {
        let c: OrderedContainer<u32> = [3, 1, 2].into_iter().collect();
        let first = c.resolve().unwrap();
        let second = c.resolve().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(c.resolve_count(), 1);

        // no-op mutations keep the cache
        assert!(!c.add(1));
        assert!(!c.remove(&9));
        c.resolve().unwrap();
        assert_eq!(c.resolve_count(), 1);

        c.add(0);
        assert_eq!(&*c.resolve().unwrap(), &[0, 1, 2, 3]);
        assert_eq!(c.resolve_count(), 2);
        c.debug_assert_invariants();
    }

    #[test]
    fn failed_resolution_is_retried() {
        let c = OrderedContainer::<u32>::new();
        c.add(1);
        c.add_constraint(2, 1, true).unwrap();
        assert!(c.resolve().is_err());
        assert!(c.resolve().is_err());
        assert_eq!(c.resolve_count(), 2);
        c.add(2);
        assert_eq!(&*c.resolve().unwrap(), &[2, 1]);
    }

    #[test]
    fn rejected_constraint_leaves_state_unchanged() {
        let even_first = CheckFn(|b: &u32, a: &u32| {
            if b % 2 == 1 && a % 2 == 0 {
                Err(RegistryError::IllegalConstraint(format!("{b} is odd, {a} is even")))
            } else {
                Ok(())
            }
        });
        let c: OrderedContainer<u32, _> = OrderedContainer::with_check(even_first);
        c.add_all([1, 2, 3]);
        let before = c.resolve().unwrap();
        assert!(matches!(c.add_constraint(1, 2, true), Err(RegistryError::IllegalConstraint(_))));
        assert_eq!(c.constraint_count(), 0);
        // a chain with one bad pair inserts nothing
        assert!(c.add_chain(true, [2, 3, 4]).is_err());
        assert_eq!(c.constraint_count(), 0);
        assert!(Arc::ptr_eq(&before, &c.resolve().unwrap()));
    }

    #[test]
    fn chains_add_and_remove_consecutive_pairs() {
        let c: OrderedContainer<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(c.add_chain(true, [3, 2, 1]).unwrap(), 2);
        assert_eq!(&*c.resolve().unwrap(), &[3, 2, 1]);
        assert_eq!(c.remove_chain(true, [3, 2, 1]).unwrap(), 2);
        assert_eq!(&*c.resolve().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn copy_is_independent() {
        let c: OrderedContainer<u32> = [1, 2].into_iter().collect();
        let original = c.resolve().unwrap();
        let copy = c.copy();
        copy.add(0);
        copy.add_constraint(2, 1, true).unwrap();
        assert_eq!(&*copy.resolve().unwrap(), &[0, 2, 1]);
        assert_eq!(c.resolve().unwrap(), original);
        assert_eq!(c.constraint_count(), 0);
    }
}
