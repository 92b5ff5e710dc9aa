//! A closed set of per-kind resource containers.

use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

use crate::ordering::{ConstraintCheck, ItemLike, OrderedContainer, Unchecked};
use crate::resources::{PositionOrder, Script, Scripts, Style, Styles};

/// The kinds of resource a [`Group`] can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Styles,
    Scripts,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Styles, ResourceKind::Scripts];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Styles => "styles",
            ResourceKind::Scripts => "scripts",
        })
    }
}

/// Item types a [`Group`] keeps a container for.
///
/// Ties each item type to its constraint check and the group slot holding
/// its container.
pub trait GroupResource: ItemLike {
    type Check: ConstraintCheck<Self> + Default;

    #[doc(hidden)]
    fn slot(group: &Group) -> &OnceCell<OrderedContainer<Self, Self::Check>>;
}

impl GroupResource for Style {
    type Check = Unchecked;

    fn slot(group: &Group) -> &OnceCell<Styles> {
        &group.styles
    }
}

impl GroupResource for Script {
    type Check = PositionOrder;

    fn slot(group: &Group) -> &OnceCell<Scripts> {
        &group.scripts
    }
}

/// Per-kind containers, each created on first access.
///
/// Creation is atomic: concurrent first accesses all observe the same
/// container.
#[derive(Default)]
pub struct Group {
    styles: OnceCell<Styles>,
    scripts: OnceCell<Scripts>,
}

assert_impl_all!(Group: Send, Sync);

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// The container for `R`, created empty if absent.
    pub fn container<R: GroupResource>(&self) -> &OrderedContainer<R, R::Check> {
        R::slot(self).get_or_init(OrderedContainer::default)
    }

    /// The container for `R` if it was created already.
    pub fn existing<R: GroupResource>(&self) -> Option<&OrderedContainer<R, R::Check>> {
        R::slot(self).get()
    }

    #[inline]
    pub fn styles(&self) -> &Styles {
        self.container::<Style>()
    }

    #[inline]
    pub fn scripts(&self) -> &Scripts {
        self.container::<Script>()
    }

    /// Kinds whose container has been created, in [`ResourceKind::ALL`] order.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|&kind| self.has_kind(kind))
            .collect()
    }

    pub fn has_kind(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Styles => self.styles.get().is_some(),
            ResourceKind::Scripts => self.scripts.get().is_some(),
        }
    }

    /// True if every created container is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.get().is_none_or(|c| c.is_empty())
            && self.scripts.get().is_none_or(|c| c.is_empty())
    }

    /// Deep copy; only kinds created in `self` are created in the copy.
    pub fn copy(&self) -> Group {
        Group {
            styles: copy_slot(&self.styles),
            scripts: copy_slot(&self.scripts),
        }
    }

    /// Per kind, the union of the containers present in `groups`.
    ///
    /// A kind absent from every input is absent from the result.
    pub fn union<'a, I>(groups: I) -> Group
    where
        I: IntoIterator<Item = &'a Group>,
    {
        let groups: Vec<&Group> = groups.into_iter().collect();
        Group {
            styles: union_slot(groups.iter().map(|g| &g.styles)),
            scripts: union_slot(groups.iter().map(|g| &g.scripts)),
        }
    }
}

fn copy_slot<R, C>(slot: &OnceCell<OrderedContainer<R, C>>) -> OnceCell<OrderedContainer<R, C>>
where
    R: ItemLike,
    C: ConstraintCheck<R>,
{
    match slot.get() {
        Some(container) => OnceCell::with_value(container.copy()),
        None => OnceCell::new(),
    }
}

fn union_slot<'a, R, C, I>(slots: I) -> OnceCell<OrderedContainer<R, C>>
where
    R: ItemLike + 'a,
    C: ConstraintCheck<R> + Default + 'a,
    I: Iterator<Item = &'a OnceCell<OrderedContainer<R, C>>>,
{
    let present: Vec<&OrderedContainer<R, C>> = slots.filter_map(OnceCell::get).collect();
    if present.is_empty() {
        OnceCell::new()
    } else {
        OnceCell::with_value(OrderedContainer::union(present))
    }
}

impl Clone for Group {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("styles", &self.styles.get())
            .field("scripts", &self.scripts.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Position, UriItems};

    #[test]
    fn containers_are_created_on_demand() {
        let g = Group::new();
        assert!(g.kinds().is_empty());
        assert!(g.existing::<Style>().is_none());
        assert!(g.is_empty());
        g.styles().add_uri("/a.css");
        assert_eq!(g.kinds(), vec![ResourceKind::Styles]);
        assert!(!g.is_empty());
        assert!(std::ptr::eq(g.styles(), g.container::<Style>()));
    }

    #[test]
    fn script_container_enforces_positions() {
        let g = Group::new();
        let head = Script::builder("/h.js").position(Position::HeadStart).build();
        let body = Script::builder("/b.js").position(Position::BodyEnd).build();
        assert!(g.scripts().add_constraint(body, head, true).is_err());
        assert_eq!(g.scripts().constraint_count(), 0);
    }

    #[test]
    fn copy_is_isolated() {
        let g = Group::new();
        g.styles().add_uri("/a.css");
        let copy = g.copy();
        copy.styles().add_uri("/b.css");
        copy.scripts().add_uri("/a.js");
        assert_eq!(g.styles().len(), 1);
        assert_eq!(g.kinds(), vec![ResourceKind::Styles]);
        assert_eq!(copy.kinds(), ResourceKind::ALL.to_vec());
    }

    #[test]
    fn union_merges_per_kind() {
        let a = Group::new();
        a.styles().add_uri("/a.css");
        let b = Group::new();
        b.styles().add_uri("/b.css");
        b.styles().add_uri_constraint("/b.css", "/a.css", false).unwrap();
        b.scripts().add_uri("/b.js");
        let c = Group::new();

        let u = Group::union([&a, &b, &c]);
        assert_eq!(u.kinds(), ResourceKind::ALL.to_vec());
        let styles: Vec<_> = u.styles().resolve().unwrap().iter().map(|s| s.uri().to_string()).collect();
        assert_eq!(styles, vec!["/b.css", "/a.css"]);
        assert_eq!(u.scripts().len(), 1);

        assert!(Group::union([&c]).kinds().is_empty());
    }
}
