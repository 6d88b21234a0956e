//! [`Property`] definitions.

use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Contract;

/// Real estate rented out under a [`Contract`].
///
/// Owned by an external registry, so it's only ever read here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Description`] of this [`Property`].
    pub description: Description,
}

/// ID of a [`Property`] in the external registry.
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
        Self::new(id).ok_or("blank `property::Id`")
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Display description of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 512
    }
}
