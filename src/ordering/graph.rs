//! Constraint storage: `after -> { before, required }` multimap.
//!
//! [`ConstraintGraph`] is pure data. It never inspects which items are present
//! in a container; that happens at resolution time.

use std::collections::{HashMap, HashSet};

use super::bounds::ItemLike;
use super::constraint::{Before, Constraint};

/// Multimap of ordering constraints keyed by the `after` item.
///
/// Constraints are deduplicated by the full `(before, after, required)`
/// triple, so the same pair may be stored once as required and once as
/// optional. An `after` key never maps to an empty set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintGraph<R>
where
    R: ItemLike,
{
    ordering: HashMap<R, HashSet<Before<R>>>,
    len: usize,
}

impl<R: ItemLike> Default for ConstraintGraph<R> {
    fn default() -> Self {
        Self {
            ordering: HashMap::new(),
            len: 0,
        }
    }
}

impl<R: ItemLike> ConstraintGraph<R> {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the triple; returns `false` if it was already present.
    pub fn insert(&mut self, before: R, after: R, required: bool) -> bool {
        let added = self
            .ordering
            .entry(after)
            .or_default()
            .insert(Before::new(before, required));
        if added {
            self.len += 1;
        }
        added
    }

    /// Removes the exact triple; returns `false` if it was not present.
    pub fn remove(&mut self, before: &R, after: &R, required: bool) -> bool {
        let Some(set) = self.ordering.get_mut(after) else {
            return false;
        };
        let removed = set.remove(&Before::new(before.clone(), required));
        if removed {
            self.len -= 1;
            if set.is_empty() {
                self.ordering.remove(after);
            }
        }
        removed
    }

    #[inline]
    pub fn contains(&self, before: &R, after: &R, required: bool) -> bool {
        self.ordering
            .get(after)
            .is_some_and(|set| set.contains(&Before::new(before.clone(), required)))
    }

    /// Everything declared to come before `after`, in no particular order.
    pub fn befores<'a>(&'a self, after: &R) -> impl Iterator<Item = &'a Before<R>> + 'a {
        self.ordering.get(after).into_iter().flatten()
    }

    /// All `(after, before)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &Before<R>)> + '_ {
        self.ordering
            .iter()
            .flat_map(|(after, set)| set.iter().map(move |b| (after, b)))
    }

    /// All constraints as triples, sorted by `after` then `before`.
    pub fn constraints_sorted(&self) -> Vec<Constraint<R>> {
        let mut out: Vec<_> = self
            .iter()
            .map(|(after, b)| Constraint::new(b.before.clone(), after.clone(), b.required))
            .collect();
        out.sort_unstable();
        out
    }

    /// Adds every triple of `other`; returns how many were new.
    pub fn extend_from(&mut self, other: &ConstraintGraph<R>) -> usize {
        let mut added = 0;
        for (after, set) in &other.ordering {
            let mine = self.ordering.entry(after.clone()).or_default();
            for b in set {
                if mine.insert(b.clone()) {
                    added += 1;
                }
            }
        }
        self.len += added;
        added
    }

    /// Number of stored triples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(debug_assertions)]
    pub fn debug_assert_consistent(&self) {
        let counted: usize = self.ordering.values().map(HashSet::len).sum();
        debug_assert_eq!(counted, self.len, "constraint count out of sync");
        for (after, set) in &self.ordering {
            debug_assert!(!set.is_empty(), "empty before-set left for {after:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_by_triple() {
        let mut g = ConstraintGraph::<&str>::new();
        assert!(g.insert("a", "b", true));
        assert!(!g.insert("a", "b", true));
        // same pair, different flag is a distinct constraint
        assert!(g.insert("a", "b", false));
        assert_eq!(g.len(), 2);
        assert_eq!(g.befores(&"b").count(), 2);
        assert!(g.contains(&"a", &"b", false));
        g.debug_assert_consistent();
    }

    #[test]
    fn remove_drops_empty_keys() {
        let mut g = ConstraintGraph::<&str>::new();
        g.insert("a", "b", true);
        assert!(!g.remove(&"a", &"b", false));
        assert!(g.remove(&"a", &"b", true));
        assert!(!g.remove(&"a", &"b", true));
        assert!(g.is_empty());
        assert_eq!(g.iter().count(), 0);
        g.debug_assert_consistent();
    }

    #[test]
    fn extend_counts_only_new_triples() {
        let mut a = ConstraintGraph::<u32>::new();
        a.insert(1, 2, true);
        let mut b = ConstraintGraph::<u32>::new();
        b.insert(1, 2, true);
        b.insert(2, 3, false);
        assert_eq!(a.extend_from(&b), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(
            a.constraints_sorted(),
            vec![Constraint::required(1, 2), Constraint::optional(2, 3)]
        );
        a.debug_assert_consistent();
    }
}
