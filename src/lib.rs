#![cfg_attr(docsrs, feature(doc_cfg))]
//! # resource-registry
//!
//! resource-registry keeps the page resources (stylesheets, scripts) a web
//! application emits, and orders them: items first follow their natural
//! order, then explicit "before" constraints reorder them with a stable
//! topological sort. Constraints are either required (violations fail the
//! resolution) or optional (dropped deterministically when they cannot hold).
//!
//! ## Features
//! - [`OrderedContainer`](ordering::OrderedContainer): thread-safe item set
//!   plus constraints with a cached resolved order
//! - [`union`](ordering::union()): merge containers built independently
//! - typed [`Style`](resources::Style) and [`Script`](resources::Script)
//!   items, with per-type constraint validation
//! - [`Registry`](registry::Registry): named groups of containers with
//!   activation flags
//!
//! ## Determinism
//!
//! Resolution depends only on the item set, the constraints and the
//! [`ResolveConfig`](ordering::ResolveConfig); insertion order and hashing
//! never leak into the result.
//!
//! ## Usage
//!
//! ```
//! use resource_registry::prelude::*;
//!
//! let styles = Styles::new();
//! styles.add(Style::new("/theme.css"));
//! styles.add(Style::new("/base.css"));
//! styles.add(Style::new("/reset.css"));
//! styles
//!     .add_constraint(Style::new("/reset.css"), Style::new("/base.css"), true)
//!     .unwrap();
//!
//! let order: Vec<_> = styles.resolve().unwrap().iter().map(|s| s.uri().to_owned()).collect();
//! assert_eq!(order, ["/reset.css", "/base.css", "/theme.css"]);
//! ```
//!
//! ## Invariant checks
//! Debug builds validate every freshly resolved order and panic on a
//! violation. Enable `check-invariants` (or `strict-invariants`) to keep the
//! checks in release builds. See [`DebugInvariants`].

pub mod debug_invariants;
pub mod ordering;
pub mod registry;
pub mod registry_error;
pub mod resources;

pub use debug_invariants::DebugInvariants;
pub use registry_error::RegistryError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::ordering::{
        CheckFn, Constraint, ConstraintCheck, ItemLike, OptionalCycles, OrderedContainer,
        ResolveConfig, Unchecked, union,
    };
    pub use crate::registry::{Group, GroupName, GroupResource, Registry, ResourceKind};
    pub use crate::registry_error::{MissingEndpoint, RegistryError};
    pub use crate::resources::{
        Direction, FromUri, Position, PositionOrder, Script, Scripts, Style, Styles, UriItems,
    };
}
