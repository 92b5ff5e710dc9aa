//! Named groups plus per-group activation flags.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use static_assertions::assert_impl_all;

use super::group::Group;
use super::name::GroupName;
use crate::registry_error::RegistryError;

/// Concurrent map of [`GroupName`] to [`Group`], and of group name to
/// activation flag.
///
/// Groups and activations are independent: a group may be activated before
/// it exists, and a group exists without being activated.
#[derive(Default)]
pub struct Registry {
    groups: DashMap<GroupName, Arc<Group>>,
    activations: DashMap<GroupName, bool>,
}

assert_impl_all!(Registry: Send, Sync);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The group named `name`, created empty if absent. Concurrent callers
    /// asking for the same name get the same group.
    pub fn group(&self, name: &GroupName) -> Arc<Group> {
        let entry = self.groups.entry(name.clone()).or_insert_with(|| {
            log::debug!("creating group {name}");
            Arc::new(Group::new())
        });
        Arc::clone(entry.value())
    }

    /// [`Registry::group`] for an unvalidated name.
    ///
    /// # Errors
    /// [`RegistryError::InvalidIdentifier`] if `name` is not a valid
    /// [`GroupName`].
    pub fn group_named(&self, name: &str) -> Result<Arc<Group>, RegistryError> {
        Ok(self.group(&GroupName::new(name)?))
    }

    /// Lookup without creation.
    pub fn get_group(&self, name: &GroupName) -> Option<Arc<Group>> {
        self.groups.get(name).map(|g| Arc::clone(g.value()))
    }

    /// Names of existing groups, sorted.
    pub fn group_names(&self) -> Vec<GroupName> {
        let mut names: Vec<GroupName> = self.groups.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    pub fn activate(&self, name: &GroupName) -> &Self {
        self.set_activation(name.clone(), Some(true));
        self
    }

    pub fn deactivate(&self, name: &GroupName) -> &Self {
        self.set_activation(name.clone(), Some(false));
        self
    }

    /// Set (`Some`) or clear (`None`) the activation of `name`, returning the
    /// previous value.
    pub fn set_activation(&self, name: GroupName, activation: Option<bool>) -> Option<bool> {
        log::trace!("activation of {name}: {activation:?}");
        match activation {
            Some(flag) => self.activations.insert(name, flag),
            None => self.activations.remove(&name).map(|(_, flag)| flag),
        }
    }

    pub fn activation(&self, name: &GroupName) -> Option<bool> {
        self.activations.get(name).map(|flag| *flag)
    }

    /// Snapshot of every activation flag, sorted by name.
    pub fn activations(&self) -> BTreeMap<GroupName, bool> {
        self.activations
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }

    /// No groups and no activations.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.activations.is_empty()
    }

    /// Deep copy: groups are copied, not shared.
    pub fn copy(&self) -> Registry {
        let groups = DashMap::with_capacity(self.groups.len());
        for entry in self.groups.iter() {
            groups.insert(entry.key().clone(), Arc::new(entry.value().copy()));
        }
        let activations = self.activations.clone();
        Registry { groups, activations }
    }

    /// Union of every activated group that exists, merged in name order.
    pub fn union_activated(&self) -> Group {
        let active: Vec<Arc<Group>> = self
            .activations()
            .into_iter()
            .filter(|&(_, active)| active)
            .filter_map(|(name, _)| self.get_group(&name))
            .collect();
        log::debug!("merging {} activated group(s)", active.len());
        Group::union(active.iter().map(Arc::as_ref))
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("groups", &self.group_names())
            .field("activations", &self.activations())
            .finish()
    }
}
