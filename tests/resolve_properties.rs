use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use resource_registry::ordering::{ConstraintGraph, OrderedContainer, ResolveConfig, resolve_order};

/// `n` items plus required edges that are acyclic by construction: every
/// edge goes forward in a random permutation of the items.
fn acyclic_case() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
    (1u32..12)
        .prop_flat_map(|n| {
            let perm = Just((0..n).collect::<Vec<u32>>()).prop_shuffle();
            let raw = prop::collection::vec((0..n, 0..n), 0..(2 * n as usize));
            (perm, raw)
        })
        .prop_map(|(perm, raw)| {
            let edges = raw
                .into_iter()
                .filter(|(i, j)| i != j)
                .map(|(i, j)| {
                    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                    (perm[lo as usize], perm[hi as usize])
                })
                .collect();
            (perm.len() as u32, edges)
        })
}

fn any_edges() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
    (1u32..10).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..20)))
}

proptest! {
    #[test]
    fn required_order_is_smallest_valid_permutation((n, edges) in acyclic_case()) {
        let c: OrderedContainer<u32> = (0..n).collect();
        for &(b, a) in &edges {
            c.add_constraint(b, a, true).unwrap();
        }
        let order = c.resolve().unwrap();

        // permutation
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());

        // every edge honoured
        let pos: HashMap<u32, usize> = order.iter().enumerate().map(|(i, &x)| (x, i)).collect();
        for &(b, a) in &edges {
            prop_assert!(pos[&b] < pos[&a]);
        }

        // each step takes the smallest item whose befores are all placed
        let mut placed = HashSet::new();
        for &x in order.iter() {
            let ready = (0..n)
                .filter(|v| !placed.contains(v))
                .filter(|v| edges.iter().all(|&(b, a)| a != *v || placed.contains(&b)))
                .min();
            prop_assert_eq!(ready, Some(x));
            placed.insert(x);
        }
    }

    #[test]
    fn optional_constraints_never_fail((n, edges) in any_edges()) {
        let items: HashSet<u32> = (0..n).collect();
        let mut graph = ConstraintGraph::new();
        for &(b, a) in &edges {
            graph.insert(b, a, false);
        }
        let resolution = resolve_order(&items, &graph, &ResolveConfig::default()).unwrap();
        prop_assert_eq!(resolution.order.len(), n as usize);

        let pos: HashMap<u32, usize> =
            resolution.order.iter().enumerate().map(|(i, &x)| (x, i)).collect();
        let dropped: HashSet<(u32, u32)> =
            resolution.dropped.iter().map(|c| (c.before, c.after)).collect();
        for &(b, a) in &edges {
            prop_assert!(dropped.contains(&(b, a)) || pos[&b] < pos[&a]);
        }
    }

    #[test]
    fn resolution_ignores_insertion_order((n, mut edges) in any_edges()) {
        let forward: OrderedContainer<u32> = (0..n).collect();
        let backward: OrderedContainer<u32> = (0..n).rev().collect();
        for &(b, a) in &edges {
            forward.add_constraint(b, a, false).unwrap();
        }
        edges.reverse();
        for &(b, a) in &edges {
            backward.add_constraint(b, a, false).unwrap();
        }
        prop_assert_eq!(forward.resolve().unwrap(), backward.resolve().unwrap());
    }
}
