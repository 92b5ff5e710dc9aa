//! Common bound aliases used across the ordering engine.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds automatically implements them.

/// Canonical bound set for orderable items.
///
/// - `Clone` because items are copied into snapshots and unions
/// - `Eq + Hash` for the item set and the constraint map
/// - `Ord` for the natural tie-break order
/// - `Debug` for diagnostics and error reports
///
/// An item must not change its equality, hash or order after insertion.
pub trait ItemLike: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug {}
impl<T> ItemLike for T where T: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug {}
