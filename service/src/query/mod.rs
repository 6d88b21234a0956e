//! [`Query`] definition.

pub mod contract;
pub mod contract_overview;
pub mod contracts;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{registry, Registry},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    contract_overview::ContractOverview, contracts::ListContracts,
};

/// [`Query`] [`Select`]ing a `T`ype from a [`Registry`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct RegistryQuery<T>(T);

impl<W, B> RegistryQuery<By<W, B>> {
    /// Creates a new [`RegistryQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<R, W, B> Query<RegistryQuery<By<W, B>>> for Service<R>
where
    R: Registry<Select<By<W, B>>, Ok = W, Err = Traced<registry::Error>>,
{
    type Ok = W;
    type Err = Traced<registry::Error>;

    async fn execute(
        &self,
        RegistryQuery(by): RegistryQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.registry()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
