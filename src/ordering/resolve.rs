//! Constraint resolution: natural sort followed by a stable topological sort.
//!
//! [`resolve_order`] is the algorithm behind
//! [`OrderedContainer::resolve`](super::OrderedContainer::resolve). It is a
//! pure function of the item set, the constraint graph and the config.
//!
//! 1. Items are sorted by their natural order. Each item's position in this
//!    list is its *snapshot index*.
//! 2. Constraints are visited sorted by `(after, before)`. Constraints with
//!    both endpoints present become edges `before -> after`; a required
//!    constraint with a missing endpoint fails the resolution.
//! 3. Required edges must be acyclic.
//! 4. Optional edges are admitted in ascending `(after index, before index)`
//!    order, skipping any edge that would close a cycle.
//! 5. Kahn's algorithm with a min-heap on snapshot index produces the
//!    smallest order, in snapshot terms, that honours every admitted edge.
//!
//! ## Complexity
//! - Time: **O(V log V + E log E)** plus **O(E_opt · (V + E))** for the
//!   optional-edge reachability checks.
//! - Space: **O(V + E)**.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use itertools::Itertools;

use super::bounds::ItemLike;
use super::config::{OptionalCycles, ResolveConfig};
use super::constraint::Constraint;
use super::graph::ConstraintGraph;
use crate::registry_error::{MissingEndpoint, RegistryError};

/// Outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution<R> {
    /// Items in their final order.
    pub order: Vec<R>,
    /// Optional constraints that were not applied, because an endpoint was
    /// missing or because they would have closed a cycle. Sorted.
    pub dropped: Vec<Constraint<R>>,
}

/// Resolve `items` under `ordering`.
///
/// # Errors
/// * [`RegistryError::MissingRequiredEndpoint`]: a required constraint names
///   an item not in `items`. The first such constraint in `(after, before)`
///   order is reported.
/// * [`RegistryError::CycleDetected`]: required constraints form a cycle, or
///   optional ones do under [`OptionalCycles::Reject`].
pub fn resolve_order<R: ItemLike>(
    items: &HashSet<R>,
    ordering: &ConstraintGraph<R>,
    config: &ResolveConfig,
) -> Result<Resolution<R>, RegistryError> {
    // 1) natural order
    let mut list: Vec<R> = items.iter().cloned().collect();
    list.sort_unstable();
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("natural order: [{}]", list.iter().map(|r| format!("{r:?}")).join(", "));
    }
    let index: HashMap<&R, usize> = list.iter().enumerate().map(|(i, r)| (r, i)).collect();

    // 2) edges over present items
    let mut required: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut optional: Vec<(usize, usize, Constraint<R>)> = Vec::new();
    let mut dropped: Vec<Constraint<R>> = Vec::new();
    for c in ordering.constraints_sorted() {
        match (index.get(&c.before), index.get(&c.after)) {
            (Some(&b), Some(&a)) => {
                if c.required {
                    if b == a {
                        return Err(RegistryError::cycle([&c.after], config.max_reported_items));
                    }
                    required.insert((b, a));
                } else {
                    optional.push((b, a, c));
                }
            }
            (b, a) if c.required => {
                let missing = match (b, a) {
                    (None, None) => MissingEndpoint::Both,
                    (None, _) => MissingEndpoint::Before,
                    _ => MissingEndpoint::After,
                };
                return Err(RegistryError::missing_endpoint(&c.before, &c.after, missing));
            }
            _ => {
                log::debug!("skipping optional constraint with missing endpoint: {c}");
                dropped.push(c);
            }
        }
    }

    // 3) required edges must be acyclic
    let n = list.len();
    let mut dag = Dag::new(n);
    for &(b, a) in &required {
        dag.add_edge(b, a);
    }
    let members = dag.cycle_members();
    if !members.is_empty() {
        return Err(RegistryError::cycle(
            members.iter().map(|&i| &list[i]),
            config.max_reported_items,
        ));
    }

    // 4) optional edges, smallest (after, before) first
    optional.sort_by_key(|&(b, a, _)| (a, b));
    for (b, a, c) in optional {
        if required.contains(&(b, a)) {
            // already enforced by the required twin
            continue;
        }
        if b == a || dag.reaches(a, b) {
            match config.optional_cycles {
                OptionalCycles::Break => {
                    log::debug!("dropping optional constraint that closes a cycle: {c}");
                    dropped.push(c);
                }
                OptionalCycles::Reject => {
                    if b != a {
                        dag.add_edge(b, a);
                    }
                    let members = if b == a { vec![a] } else { dag.cycle_members() };
                    return Err(RegistryError::cycle(
                        members.iter().map(|&i| &list[i]),
                        config.max_reported_items,
                    ));
                }
            }
        } else {
            dag.add_edge(b, a);
        }
    }
    dropped.sort_unstable();

    // 5) stable topological sort
    let Some(sorted) = dag.stable_topological_sort() else {
        let members = dag.cycle_members();
        return Err(RegistryError::cycle(
            members.iter().map(|&i| &list[i]),
            config.max_reported_items,
        ));
    };
    let order: Vec<R> = sorted.into_iter().map(|i| list[i].clone()).collect();
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("topological order: [{}]", order.iter().map(|r| format!("{r:?}")).join(", "));
    }
    Ok(Resolution { order, dropped })
}

/// Index-based adjacency over snapshot positions.
struct Dag {
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
}

impl Dag {
    fn new(n: usize) -> Self {
        Self {
            succ: vec![Vec::new(); n],
            pred: vec![Vec::new(); n],
        }
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.succ[from].push(to);
        self.pred[to].push(from);
    }

    /// Is `to` reachable from `from` along existing edges?
    fn reaches(&self, from: usize, to: usize) -> bool {
        let mut seen = vec![false; self.succ.len()];
        let mut stack = vec![from];
        seen[from] = true;
        while let Some(v) = stack.pop() {
            if v == to {
                return true;
            }
            for &w in &self.succ[v] {
                if !seen[w] {
                    seen[w] = true;
                    stack.push(w);
                }
            }
        }
        false
    }

    /// Nodes left after repeatedly trimming every source and every sink.
    /// Empty iff the graph is acyclic. Sorted by snapshot index.
    fn cycle_members(&self) -> Vec<usize> {
        let n = self.succ.len();
        let mut in_deg: Vec<usize> = self.pred.iter().map(Vec::len).collect();
        let mut out_deg: Vec<usize> = self.succ.iter().map(Vec::len).collect();
        let mut alive = vec![true; n];
        let mut stack: Vec<usize> = (0..n).filter(|&v| in_deg[v] == 0 || out_deg[v] == 0).collect();
        while let Some(v) = stack.pop() {
            if !alive[v] {
                continue;
            }
            alive[v] = false;
            for &w in &self.succ[v] {
                if alive[w] {
                    in_deg[w] -= 1;
                    if in_deg[w] == 0 {
                        stack.push(w);
                    }
                }
            }
            for &u in &self.pred[v] {
                if alive[u] {
                    out_deg[u] -= 1;
                    if out_deg[u] == 0 {
                        stack.push(u);
                    }
                }
            }
        }
        (0..n).filter(|&v| alive[v]).collect()
    }

    /// Kahn's algorithm, always emitting the smallest ready index.
    /// `None` if a cycle prevents a complete order.
    fn stable_topological_sort(&self) -> Option<Vec<usize>> {
        let n = self.succ.len();
        let mut in_deg: Vec<usize> = self.pred.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> =
            (0..n).filter(|&v| in_deg[v] == 0).map(Reverse).collect();
        let mut out = Vec::with_capacity(n);
        while let Some(Reverse(v)) = ready.pop() {
            out.push(v);
            for &w in &self.succ[v] {
                in_deg[w] -= 1;
                if in_deg[w] == 0 {
                    ready.push(Reverse(w));
                }
            }
        }
        (out.len() == n).then_some(out)
    }
}
