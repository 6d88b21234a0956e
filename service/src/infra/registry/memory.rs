//! In-memory [`Registry`] implementation.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, list},
        property, tenant, Contract, Installment, Property, Tenant,
    },
    infra::registry,
};
#[cfg(doc)]
use crate::infra::Registry;

/// [`Registry`] keeping everything in memory.
///
/// [`Contract`]s and [`Installment`]s are returned in the order they were
/// put into it.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Known [`Tenant`]s.
    tenants: HashMap<tenant::Id, Tenant>,

    /// Known [`Property`]s.
    properties: HashMap<property::Id, Property>,

    /// Known [`Contract`]s.
    contracts: Vec<Contract>,

    /// Known [`Installment`]s.
    installments: Vec<Installment>,
}

impl InMemory {
    /// Creates a new empty [`InMemory`] registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the provided [`Tenant`], replacing the one with the same ID.
    #[must_use]
    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.put_tenant(tenant);
        self
    }

    /// Adds the provided [`Property`], replacing the one with the same ID.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.put_property(property);
        self
    }

    /// Adds the provided [`Contract`], replacing the one with the same ID.
    #[must_use]
    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.put_contract(contract);
        self
    }

    /// Adds the provided [`Installment`].
    #[must_use]
    pub fn with_installment(mut self, installment: Installment) -> Self {
        self.put_installment(installment);
        self
    }

    /// Puts the provided [`Tenant`], replacing the one with the same ID.
    pub fn put_tenant(&mut self, tenant: Tenant) {
        _ = self.tenants.insert(tenant.id.clone(), tenant);
    }

    /// Puts the provided [`Property`], replacing the one with the same ID.
    pub fn put_property(&mut self, property: Property) {
        _ = self.properties.insert(property.id.clone(), property);
    }

    /// Puts the provided [`Contract`], replacing the one with the same ID in
    /// place.
    pub fn put_contract(&mut self, contract: Contract) {
        if let Some(existing) =
            self.contracts.iter_mut().find(|c| c.id == contract.id)
        {
            *existing = contract;
        } else {
            self.contracts.push(contract);
        }
    }

    /// Puts the provided [`Installment`], replacing the one with the same ID
    /// in place.
    pub fn put_installment(&mut self, installment: Installment) {
        if let Some(existing) =
            self.installments.iter_mut().find(|i| i.id == installment.id)
        {
            *existing = installment;
        } else {
            self.installments.push(installment);
        }
    }
}

impl registry::Registry<Select<By<Option<Tenant>, tenant::Id>>> for InMemory {
    type Ok = Option<Tenant>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Tenant>, tenant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.tenants.get(&by.into_inner()).cloned())
    }
}

impl registry::Registry<Select<By<Option<Property>, property::Id>>>
    for InMemory
{
    type Ok = Option<Property>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.properties.get(&by.into_inner()).cloned())
    }
}

impl registry::Registry<Select<By<Option<Contract>, contract::Id>>>
    for InMemory
{
    type Ok = Option<Contract>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.contracts.iter().find(|c| c.id == id).cloned())
    }
}

impl registry::Registry<Select<By<Vec<Contract>, list::Filter>>>
    for InMemory
{
    type Ok = Vec<Contract>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .contracts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }
}

impl registry::Registry<Select<By<Vec<Installment>, contract::Id>>>
    for InMemory
{
    type Ok = Vec<Installment>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Installment>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .installments
            .iter()
            .filter(|i| i.contract_id == id)
            .cloned()
            .collect())
    }
}
