//! [`Query`] for listing [`Contract`]s.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract::list, Contract},
    infra::{registry, Registry},
    Service,
};

use super::{Query, RegistryQuery};

/// Queries all the [`Contract`]s matching a [`list::Filter`].
pub type Filtered = RegistryQuery<By<Vec<Contract>, list::Filter>>;

/// [`Query`] listing [`Contract`]s matching the provided [`list::Filter`].
///
/// Inactive [`Contract`]s are left out unless asked for explicitly.
#[derive(Clone, Debug, Default)]
pub struct ListContracts {
    /// [`list::Filter`] to narrow the [`Contract`]s with.
    pub filter: list::Filter,

    /// Indicator whether inactive [`Contract`]s should be listed too.
    pub include_inactive: bool,
}

impl<R> Query<ListContracts> for Service<R>
where
    R: Registry<
        Select<By<Vec<Contract>, list::Filter>>,
        Ok = Vec<Contract>,
        Err = Traced<registry::Error>,
    >,
{
    type Ok = Vec<Contract>;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        query: ListContracts,
    ) -> Result<Self::Ok, Self::Err> {
        let ListContracts {
            filter,
            include_inactive,
        } = query;

        let mut contracts = self
            .execute(Filtered::by(filter))
            .await
            .inspect_err(|e| log::error!("failed to select `Contract`s: {e}"))
            .map_err(tracerr::wrap!())?;
        if !include_inactive {
            contracts.retain(Contract::is_listed_by_default);
        }

        Ok(contracts)
    }
}
