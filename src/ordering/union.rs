//! Union of independently built containers.

use std::collections::HashSet;

use super::bounds::ItemLike;
use super::check::ConstraintCheck;
use super::container::OrderedContainer;
use super::graph::ConstraintGraph;

/// Combine `containers` into a new, independent container.
///
/// - no input: a new empty container;
/// - one input: a deep copy of it;
/// - otherwise: the union of all item sets and of all constraint triples,
///   with the check and config of the first input.
///
/// Inputs are never modified. Each input is locked only while its own state is
/// copied, and never together with another input, so unions may run while
/// other threads mutate the sources. A source mutated concurrently
/// contributes the state it had when it was copied.
pub fn union<'a, R, C, I>(containers: I) -> OrderedContainer<R, C>
where
    R: ItemLike + 'a,
    C: ConstraintCheck<R> + Default + 'a,
    I: IntoIterator<Item = &'a OrderedContainer<R, C>>,
{
    let mut iter = containers.into_iter();
    let Some(first) = iter.next() else {
        return OrderedContainer::default();
    };
    let Some(second) = iter.next() else {
        return first.copy();
    };

    let mut items = HashSet::new();
    let mut ordering = ConstraintGraph::new();
    let mut sources = 0usize;
    for source in [first, second].into_iter().chain(iter) {
        source.copy_into(&mut items, &mut ordering);
        sources += 1;
    }
    log::debug!(
        "union of {sources} containers: {} item(s), {} constraint(s)",
        items.len(),
        ordering.len()
    );
    OrderedContainer::from_parts(
        items,
        ordering,
        first.constraint_check().clone(),
        first.config().clone(),
    )
}

impl<R: ItemLike, C: ConstraintCheck<R> + Default> OrderedContainer<R, C> {
    /// See [`union`].
    pub fn union<'a, I>(containers: I) -> Self
    where
        R: 'a,
        C: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        union(containers)
    }
}
