//! [`Tenant`] definitions.

use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Contract;

/// Person renting a property under a [`Contract`].
///
/// Owned by an external registry, so it's only ever read here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tenant {
    /// ID of this [`Tenant`].
    pub id: Id,

    /// [`Name`] of this [`Tenant`].
    pub name: Name,
}

/// ID of a [`Tenant`] in the external registry.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` is not blank.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`Id`] if the given `id` is not blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        !id.as_ref().trim().is_empty()
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id).ok_or("blank `tenant::Id`")
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Display name of a [`Tenant`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

#[cfg(test)]
mod spec {
    use super::Id;

    #[test]
    fn compares_as_str() {
        let id = Id::new("T1").unwrap();

        assert_eq!(id.as_ref(), "T1");
        assert_eq!(id.to_string(), "T1");
    }

    #[test]
    fn rejects_blank() {
        assert!(Id::new("").is_none());
        assert!(Id::new(" \t").is_none());
        assert!(serde_json::from_str::<Id>(r#""  ""#).is_err());
        assert_eq!(
            serde_json::from_str::<Id>(r#""T1""#).unwrap(),
            Id::new("T1").unwrap(),
        );
    }
}
