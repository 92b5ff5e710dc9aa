//! Validated group names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry_error::RegistryError;

/// Name of a resource group: non-empty, without commas or whitespace.
///
/// Names are compared and ordered by their string value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    /// Validates and wraps `name`.
    ///
    /// # Errors
    /// [`RegistryError::InvalidIdentifier`] with the reason, see
    /// [`GroupName::validate`].
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(GroupName(name))
    }

    /// Checks `name` without building a `GroupName`. Positions in the error
    /// message are 1-based character positions.
    pub fn validate(name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidIdentifier(
                "Group names may not be empty".into(),
            ));
        }
        for (i, c) in name.chars().enumerate() {
            if c == ',' {
                return Err(RegistryError::InvalidIdentifier(format!(
                    "Group names may not contain commas (\",\" position {})",
                    i + 1
                )));
            }
            if c.is_whitespace() {
                return Err(RegistryError::InvalidIdentifier(format!(
                    "Group names may not contain whitespaces (position {})",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = RegistryError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        GroupName::new(name)
    }
}

impl TryFrom<&str> for GroupName {
    type Error = RegistryError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        GroupName::new(name)
    }
}

impl FromStr for GroupName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupName::new(s)
    }
}

impl From<GroupName> for String {
    fn from(name: GroupName) -> Self {
        name.0
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
