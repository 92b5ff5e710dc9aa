//! Concrete page resources and their typed containers.
//!
//! - [`Style`] / [`Styles`]: stylesheets, no extra constraint rule
//! - [`Script`] / [`Scripts`]: scripts, constraints checked by [`PositionOrder`]
//! - [`UriItems`]: string-keyed convenience calls for either container

pub mod natural;
pub mod script;
pub mod style;

pub use natural::natural_cmp;
pub use script::{Position, PositionOrder, Script, ScriptBuilder};
pub use style::{Direction, Style, StyleBuilder};

use crate::ordering::{ConstraintCheck, ItemLike, OrderedContainer, Unchecked};
use crate::registry_error::RegistryError;

/// Ordered stylesheets.
pub type Styles = OrderedContainer<Style, Unchecked>;

/// Ordered scripts; constraints may not point from a later position to an
/// earlier one.
pub type Scripts = OrderedContainer<Script, PositionOrder>;

/// Items that can be built from a bare URI with default attributes.
pub trait FromUri {
    fn from_uri(uri: &str) -> Self;
}

/// URI-keyed shorthands for containers of [`FromUri`] items.
///
/// Each call builds the item with default attributes, so it only matches
/// items that were added the same way.
pub trait UriItems {
    fn add_uri(&self, uri: &str) -> bool;

    fn remove_uri(&self, uri: &str) -> bool;

    fn add_uri_constraint(&self, before: &str, after: &str, required: bool) -> Result<bool, RegistryError>;

    fn remove_uri_constraint(&self, before: &str, after: &str, required: bool) -> Result<bool, RegistryError>;

    /// Constraints between consecutive URIs; see
    /// [`OrderedContainer::add_chain`].
    fn add_uri_chain<'a, I>(&self, required: bool, uris: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = &'a str>;
}

impl<R, C> UriItems for OrderedContainer<R, C>
where
    R: ItemLike + FromUri,
    C: ConstraintCheck<R>,
{
    fn add_uri(&self, uri: &str) -> bool {
        self.add(R::from_uri(uri))
    }

    fn remove_uri(&self, uri: &str) -> bool {
        self.remove(&R::from_uri(uri))
    }

    fn add_uri_constraint(&self, before: &str, after: &str, required: bool) -> Result<bool, RegistryError> {
        self.add_constraint(R::from_uri(before), R::from_uri(after), required)
    }

    fn remove_uri_constraint(&self, before: &str, after: &str, required: bool) -> Result<bool, RegistryError> {
        self.remove_constraint(&R::from_uri(before), &R::from_uri(after), required)
    }

    fn add_uri_chain<'a, I>(&self, required: bool, uris: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.add_chain(required, uris.into_iter().map(R::from_uri))
    }
}

/// Trim; empty becomes `None`.
pub(crate) fn trim_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
