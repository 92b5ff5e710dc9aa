//! The constraint-ordering engine.
//!
//! - [`OrderedContainer`]: items plus before/after constraints, with a cached
//!   resolved order
//! - [`ConstraintGraph`]: the `after -> before` constraint multimap
//! - [`resolve_order`]: the natural-then-topological resolution algorithm
//! - [`union`]: merge independently built containers
//! - [`ConstraintCheck`]: per-type validation strategy for new constraints

pub mod bounds;
pub mod cache;
pub mod check;
pub mod config;
pub mod constraint;
pub mod container;
pub mod graph;
pub mod resolve;
pub mod union;

pub use bounds::ItemLike;
pub use cache::InvalidateCache;
pub use check::{CheckFn, ConstraintCheck, Unchecked};
pub use config::{OptionalCycles, ResolveConfig};
pub use constraint::{Before, Constraint};
pub use container::OrderedContainer;
pub use graph::ConstraintGraph;
pub use resolve::{Resolution, resolve_order};
pub use union::union;
