//! Named resource groups and their activation.
//!
//! A [`Registry`] maps [`GroupName`]s to [`Group`]s. Each group holds one
//! ordered container per [`ResourceKind`], created on first use. A renderer
//! asks the registry for [`Registry::union_activated`] and resolves each kind
//! of the merged group.

pub mod group;
pub mod name;
#[allow(clippy::module_inception)]
pub mod registry;

pub use group::{Group, GroupResource, ResourceKind};
pub use name::GroupName;
pub use registry::Registry;
