//! [`Query`] collection related to a single [`Contract`].

use common::operations::By;

use crate::domain::{contract, Contract, Installment};
#[cfg(doc)]
use crate::Query;

use super::RegistryQuery;

/// Queries a [`Contract`] by its [`contract::Id`].
pub type ById = RegistryQuery<By<Option<Contract>, contract::Id>>;

/// Queries [`Installment`]s of a [`Contract`] by its [`contract::Id`], in
/// the order they are scheduled by.
pub type Installments = RegistryQuery<By<Vec<Installment>, contract::Id>>;
