//! [`Query`] for the overview of a single [`Contract`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        contract, installment, property, tenant, Contract, Installment,
        Property, Tenant,
    },
    infra::{registry, Registry},
    Service,
};

use super::{
    contract::{ById, Installments},
    Query,
};

/// [`Query`] gathering a [`Contract`] along with its parties and its
/// [`Installment`]s, each with the [`installment::Status`] it has at `now`.
#[derive(Clone, Copy, Debug)]
pub struct ContractOverview {
    /// ID of the [`Contract`] to overview.
    pub contract_id: contract::Id,

    /// [`DateTime`] to derive the [`installment::Status`]es at.
    pub now: DateTime,
}

/// Overview of a single [`Contract`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Overview {
    /// Overviewed [`Contract`].
    pub contract: Contract,

    /// [`Tenant`] renting the [`Property`].
    pub tenant: Tenant,

    /// Rented [`Property`].
    pub property: Property,

    /// [`Installment`]s of the [`Contract`], in the order of the
    /// [`Registry`].
    pub installments: Vec<Scheduled>,
}

/// [`Installment`] with its derived [`installment::Status`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scheduled {
    /// Scheduled [`Installment`].
    pub installment: Installment,

    /// [`installment::Status`] of the [`Installment`].
    pub status: installment::Status,
}

impl<R> Query<ContractOverview> for Service<R>
where
    R: Registry<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Option<Tenant>, tenant::Id>>,
            Ok = Option<Tenant>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Vec<Installment>, contract::Id>>,
            Ok = Vec<Installment>,
            Err = Traced<registry::Error>,
        >,
{
    type Ok = Overview;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: ContractOverview,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ContractOverview { contract_id, now } = query;

        let contract = self
            .execute(ById::by(contract_id))
            .await
            .inspect_err(|e| log::error!("failed to select `Contract`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;

        let tenant_id = contract.tenant_id.clone();
        let tenant = self
            .registry()
            .execute(Select(By::<Option<Tenant>, _>::new(tenant_id.clone())))
            .await
            .inspect_err(|e| log::error!("failed to select `Tenant`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| {
                log::warn!(
                    "`Contract(id: {contract_id})` refers to missing \
                     `Tenant(id: {tenant_id})`",
                );
                E::TenantNotExists(tenant_id)
            })
            .map_err(tracerr::wrap!())?;

        let property_id = contract.property_id.clone();
        let property = self
            .registry()
            .execute(Select(By::<Option<Property>, _>::new(
                property_id.clone(),
            )))
            .await
            .inspect_err(|e| log::error!("failed to select `Property`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| {
                log::warn!(
                    "`Contract(id: {contract_id})` refers to missing \
                     `Property(id: {property_id})`",
                );
                E::PropertyNotExists(property_id)
            })
            .map_err(tracerr::wrap!())?;

        let offset = self.config().calendar.utc_offset;
        let installments = self
            .execute(Installments::by(contract_id))
            .await
            .inspect_err(|e| {
                log::error!("failed to select `Installment`s: {e}");
            })
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .map(|installment| {
                if installment.contract_id != contract_id {
                    log::warn!(
                        "`Installment(id: {})` of `Contract(id: {})` is \
                         listed under `Contract(id: {contract_id})`",
                        installment.id,
                        installment.contract_id,
                    );
                    return Err(tracerr::new!(E::InstallmentNotOwned(
                        installment.id,
                    )));
                }
                let status = installment.status_in(now, offset);
                Ok(Scheduled {
                    installment,
                    status,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Overview {
            contract,
            tenant,
            property,
            installments,
        })
    }
}

/// Error of [`ContractOverview`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Registry`] error.
    #[display("`Registry` operation failed: {_0}")]
    #[from]
    Registry(registry::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`Tenant`] of the [`Contract`] does not exist.
    #[display("`Tenant(id: {_0})` does not exist")]
    TenantNotExists(#[error(not(source))] tenant::Id),

    /// [`Property`] of the [`Contract`] does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Installment`] belongs to another [`Contract`].
    #[display("`Installment(id: {_0})` belongs to another `Contract`")]
    InstallmentNotOwned(#[error(not(source))] installment::Id),
}
